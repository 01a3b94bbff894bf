use std::io;
use std::path::PathBuf;

use reqwest::StatusCode;
use thiserror::Error;
use url::Url;

/// Failures while fetching or extracting a single article.
///
/// Every variant is fatal for its url only; the batch driver logs it and
/// moves on to the next row.
#[derive(Error, Debug)]
pub enum ExtractionError {
    /// The configured url could not be parsed into a request target.
    #[error("Invalid article url: {error}")]
    InvalidUrl {
        /// The underlying reqwest error.
        error: reqwest::Error,
    },
    /// Failed to get a response, including timeouts.
    #[error("Request to {url} failed: {error}")]
    HttpRequestFailure {
        /// The url the request was sent to.
        url: Url,
        /// The reqwest error.
        error: reqwest::Error,
    },
    /// Received a non success Http response.
    #[error("Expected a 2xx Success for {url} but got: {status}")]
    NoHttpSuccess {
        /// Statuscode of the response.
        status: StatusCode,
        /// The url the request was sent to.
        url: Url,
    },
    /// Received a success response but failed to read the body as html.
    #[error("Failed to read response for {url} as html document")]
    ReadDocumentError {
        /// The url the response came from.
        url: Url,
    },
    /// The page misses the expected post title heading.
    #[error("No post title found at {url}")]
    MissingTitle {
        /// The url of the page.
        url: Url,
    },
    /// The page misses the expected post content container.
    #[error("No post content found at {url}")]
    MissingContent {
        /// The url of the page.
        url: Url,
    },
}

/// Failure to load one of the word lists.
///
/// Without dictionaries no scoring is possible, so this aborts the whole run
/// before any article is processed.
#[derive(Error, Debug)]
pub enum LexiconError {
    /// A word list file could not be read.
    #[error("Failed to read word list {path:?}: {source}")]
    WordListUnreadable {
        /// Path of the word list.
        path: PathBuf,
        /// The underlying io error.
        source: io::Error,
    },
}
