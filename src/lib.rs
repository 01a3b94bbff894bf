//! Sentiment and readability scoring for web articles.
//!
//! The pipeline fetches a page, extracts title and body text, tokenizes and
//! cleans it against a [`Lexicon`] and computes a fixed set of lexical
//! statistics per article.

pub use article::{Article, ArticleBuilder};
pub use batch::{Config, InputRow, ScoredRow, Scorer, ScorerBuilder};
pub use error::{ExtractionError, LexiconError};
pub use extract::{Extractor, PostExtractor};
pub use lexicon::Lexicon;
pub use metrics::ScoreRecord;

pub mod article;
pub mod batch;
mod error;
pub mod extract;
pub mod lexicon;
pub mod metrics;
pub mod text;

/// Rexported to implement custom extractors.
pub use select;
