use std::time::Duration;

use anyhow::{Context, Result};
use reqwest::header::{HeaderMap, USER_AGENT};
use reqwest::{Client, IntoUrl, Url};
use select::document::Document;

use crate::batch::Config;
use crate::error::ExtractionError;
use crate::extract::{Extractor, PostExtractor};

/// One fetched and extracted article.
#[derive(Debug, Clone)]
pub struct Article {
    /// The url the article was fetched from.
    pub url: Url,
    /// The post title.
    pub title: String,
    /// The post body text, preformatted blocks removed.
    pub body: String,
}

impl Article {
    /// Convenience method for creating a new [`ArticleBuilder`]
    ///
    /// Same as calling [`ArticleBuilder::new`]
    pub fn builder<T: IntoUrl>(url: T) -> Result<ArticleBuilder, ExtractionError> {
        ArticleBuilder::new(url)
    }

    /// The document that gets scored: title and body, newline joined.
    pub fn text(&self) -> String {
        format!("{}\n{}", self.title, self.body)
    }
}

/// Fetch `url` with the given client and extract title and body.
pub(crate) async fn fetch_article<TExtract: Extractor>(
    client: &Client,
    url: Url,
    extractor: &TExtract,
    http_success_only: bool,
) -> Result<Article, ExtractionError> {
    let resp = client
        .get(url.clone())
        .send()
        .await
        .map_err(|error| ExtractionError::HttpRequestFailure {
            url: url.clone(),
            error,
        })?;

    if http_success_only && !resp.status().is_success() {
        return Err(ExtractionError::NoHttpSuccess {
            status: resp.status(),
            url,
        });
    }

    // redirects may have moved us
    let url = resp.url().to_owned();

    let body = resp
        .bytes()
        .await
        .map_err(|error| ExtractionError::HttpRequestFailure {
            url: url.clone(),
            error,
        })?;
    let doc = Document::from_read(&*body)
        .map_err(|_| ExtractionError::ReadDocumentError { url: url.clone() })?;

    let (title, body) = extractor.extract(&url, &doc)?;

    log::debug!("extracted {} chars of prose from {}", body.len(), url);

    Ok(Article { url, title, body })
}

pub struct ArticleBuilder {
    url: Url,
    timeout: Option<Duration>,
    http_success_only: Option<bool>,
    user_agent: Option<String>,
}

impl ArticleBuilder {
    pub fn new<T: IntoUrl>(url: T) -> Result<Self, ExtractionError> {
        let url = url
            .into_url()
            .map_err(|error| ExtractionError::InvalidUrl { error })?;

        Ok(ArticleBuilder {
            url,
            timeout: None,
            http_success_only: None,
            user_agent: None,
        })
    }

    pub fn timeout(mut self, dur: Duration) -> Self {
        self.timeout = Some(dur);
        self
    }

    pub fn http_success_only(mut self, http_success_only: bool) -> Self {
        self.http_success_only = Some(http_success_only);
        self
    }

    /// Some servers reject requests carrying a default library agent, so a
    /// non-default one is always sent; this overrides it.
    pub fn user_agent<T: ToString>(mut self, user_agent: T) -> Self {
        self.user_agent = Some(user_agent.to_string());
        self
    }

    pub async fn get(self) -> Result<Article> {
        self.get_with_extractor(&PostExtractor::default()).await
    }

    pub async fn get_with_extractor<TExtract: Extractor>(
        self,
        extractor: &TExtract,
    ) -> Result<Article> {
        let timeout = self
            .timeout
            .unwrap_or_else(|| Duration::from_secs(Config::DEFAULT_REQ_TIMEOUT_SEC));

        let mut headers = HeaderMap::with_capacity(1);
        headers.insert(
            USER_AGENT,
            self.user_agent
                .unwrap_or_else(Config::user_agent)
                .parse()
                .context("Failed to parse user agent header.")?,
        );

        let client = Client::builder()
            .timeout(timeout)
            .default_headers(headers)
            .build()?;

        let article = fetch_article(
            &client,
            self.url,
            extractor,
            self.http_success_only.unwrap_or(true),
        )
        .await?;

        Ok(article)
    }
}
