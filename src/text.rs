use lazy_static::lazy_static;
use regex::Regex;
use unicode_segmentation::UnicodeSegmentation;

use crate::lexicon::Lexicon;

lazy_static! {
    /// Runs of sentence-terminal punctuation.
    static ref RE_SENTENCE_TERMINAL: Regex = Regex::new(r"[.!?]+").unwrap();
}

/// Split a document into raw word tokens.
///
/// Newlines are flattened to spaces first, then the text is split on unicode
/// word boundaries. Case is preserved, punctuation pieces are kept as tokens
/// of their own and contractions stay attached.
pub fn tokenize(document: &str) -> Vec<String> {
    document
        .replace('\n', " ")
        .split_word_bounds()
        .filter(|piece| !piece.trim().is_empty())
        .map(str::to_string)
        .collect()
}

/// Derive the clean token sequence from raw tokens.
///
/// Tokens whose lowercased form is in the lexicon's stop set are dropped,
/// the rest is lowercased and anything not fully alphanumeric is discarded
/// entirely. Order is preserved, deletions only.
pub fn clean(raw_tokens: &[String], lexicon: &Lexicon) -> Vec<String> {
    raw_tokens
        .iter()
        .map(|token| token.to_lowercase())
        .filter(|token| !lexicon.is_stop_word(token))
        .filter(|token| !token.is_empty() && token.chars().all(char::is_alphanumeric))
        .collect()
}

/// Count the sentences of a document.
///
/// The document is split on its newline boundaries first, each piece is then
/// segmented on runs of `.`, `!` and `?` independently and the counts are
/// summed. A document without any sentence-terminal punctuation counts as a
/// single sentence.
pub fn sentence_count(document: &str) -> usize {
    let count: usize = document
        .lines()
        .map(|line| {
            RE_SENTENCE_TERMINAL
                .split(line)
                .filter(|piece| !piece.trim().is_empty())
                .count()
        })
        .sum();
    count.max(1)
}
