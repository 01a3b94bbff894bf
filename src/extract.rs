use select::document::Document;
use select::node::Node;
use select::predicate::{Class, Name, Predicate};
use url::Url;

use crate::error::ExtractionError;

/// Node names whose text is not prose and must not leak into word counts.
const NON_PROSE_NODES: [&str; 2] = ["pre", "code"];

/// The selector policy that locates an article's title and content.
///
/// The default [`PostExtractor`] targets one specific publishing template;
/// implement this trait to score pages with a different layout.
pub trait Extractor {
    /// Extract the post title text.
    fn title(&self, doc: &Document) -> Option<String>;

    /// Extract the post body text, with non-prose blocks removed.
    fn content_text(&self, doc: &Document) -> Option<String>;

    /// Extract title and body, turning an absent element into a layout
    /// mismatch error for `url`.
    fn extract(&self, url: &Url, doc: &Document) -> Result<(String, String), ExtractionError> {
        let title = self
            .title(doc)
            .ok_or_else(|| ExtractionError::MissingTitle { url: url.clone() })?;
        let body = self
            .content_text(doc)
            .ok_or_else(|| ExtractionError::MissingContent { url: url.clone() })?;
        Ok((title, body))
    }
}

/// Extractor for the blog template the scorer was written against: the title
/// is a `h1.entry-title` heading and the body lives in a `div.td-post-content`
/// container.
#[derive(Debug, Clone, Default)]
pub struct PostExtractor;

impl Extractor for PostExtractor {
    fn title(&self, doc: &Document) -> Option<String> {
        doc.find(Name("h1").and(Class("entry-title")))
            .next()
            .map(|node| node.text().trim().to_string())
    }

    fn content_text(&self, doc: &Document) -> Option<String> {
        doc.find(Name("div").and(Class("td-post-content")))
            .next()
            .map(|node| prose_text(&node))
    }
}

/// Collect all descendant text of `node`, skipping preformatted and code
/// blocks.
pub fn prose_text(node: &Node) -> String {
    fn recur_text(node: &Node, string: &mut String) {
        if let Some(name) = node.name() {
            if NON_PROSE_NODES.contains(&name) {
                return;
            }
        }
        if let Some(text) = node.as_text() {
            string.push_str(text);
        }
        for child in node.children() {
            recur_text(&child, string);
        }
    }

    let mut txt = String::new();
    recur_text(node, &mut txt);
    txt
}
