use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};
use futures::stream::{self, StreamExt};
use reqwest::header::{HeaderMap, USER_AGENT};
use reqwest::{Client, IntoUrl};
use serde::{Deserialize, Serialize};

use crate::article::fetch_article;
use crate::error::ExtractionError;
use crate::extract::{Extractor, PostExtractor};
use crate::lexicon::Lexicon;
use crate::metrics::{self, ScoreRecord};
use crate::text;

/// One row of the input table.
#[derive(Debug, Clone, Deserialize)]
pub struct InputRow {
    /// The article identifier the output is keyed by.
    #[serde(rename = "URL_ID")]
    pub url_id: String,
    /// The article url.
    #[serde(rename = "URL")]
    pub url: String,
}

/// The outcome for one input row, in input order.
#[derive(Debug)]
pub struct ScoredRow {
    pub url_id: String,
    pub url: String,
    pub record: Result<ScoreRecord, ExtractionError>,
}

/// Output row in the original output-schema column order.
#[derive(Debug, Serialize)]
struct OutputRow<'a> {
    #[serde(rename = "URL_ID")]
    url_id: &'a str,
    #[serde(rename = "URL")]
    url: &'a str,
    #[serde(rename = "POSITIVE SCORE")]
    positive_score: usize,
    #[serde(rename = "NEGATIVE SCORE")]
    negative_score: usize,
    #[serde(rename = "POLARITY SCORE")]
    polarity_score: f64,
    #[serde(rename = "SUBJECTIVITY SCORE")]
    subjective_score: f64,
    #[serde(rename = "AVG SENTENCE LENGTH")]
    average_sentence_length: f64,
    #[serde(rename = "COMPLEX WORD COUNT")]
    complex_words_count: usize,
    #[serde(rename = "PERCENTAGE OF COMPLEX WORDS")]
    complex_words_percentage: f64,
    #[serde(rename = "FOG INDEX")]
    fog_index: f64,
    #[serde(rename = "AVG NUMBER OF WORDS PER SENTENCE")]
    average_words_per_sentence: f64,
    #[serde(rename = "WORD COUNT")]
    words_count: usize,
    #[serde(rename = "SYLLABLE PER WORD")]
    syllable_count: usize,
    #[serde(rename = "PERSONAL PRONOUNS")]
    personal_pronouns_count: usize,
    #[serde(rename = "AVG WORD LENGTH")]
    average_word_length: f64,
}

impl<'a> OutputRow<'a> {
    fn new(url_id: &'a str, url: &'a str, record: &ScoreRecord) -> Self {
        OutputRow {
            url_id,
            url,
            positive_score: record.positive_score,
            negative_score: record.negative_score,
            polarity_score: record.polarity_score,
            subjective_score: record.subjective_score,
            average_sentence_length: record.average_sentence_length,
            complex_words_count: record.complex_words_count,
            complex_words_percentage: record.complex_words_percentage,
            fog_index: record.fog_index,
            average_words_per_sentence: record.average_words_per_sentence,
            words_count: record.words_count,
            syllable_count: record.syllable_count,
            personal_pronouns_count: record.personal_pronouns_count,
            average_word_length: record.average_word_length,
        }
    }
}

/// Read the ordered `(URL_ID, URL)` rows from a csv file.
pub fn read_input<P: AsRef<Path>>(path: P) -> Result<Vec<InputRow>> {
    let path = path.as_ref();
    let mut reader =
        csv::Reader::from_path(path).with_context(|| format!("Failed to open {:?}", path))?;
    reader
        .deserialize()
        .collect::<Result<Vec<InputRow>, _>>()
        .with_context(|| format!("Failed to parse input rows from {:?}", path))
}

/// Write the scored rows to a csv file, input order preserved.
///
/// Rows whose article could not be fetched or extracted are logged and
/// omitted.
pub fn write_output<P: AsRef<Path>>(path: P, rows: &[ScoredRow]) -> Result<()> {
    let path = path.as_ref();
    let mut writer =
        csv::Writer::from_path(path).with_context(|| format!("Failed to create {:?}", path))?;

    for row in rows {
        match &row.record {
            Ok(record) => {
                writer.serialize(OutputRow::new(&row.url_id, &row.url, record))?;
            }
            Err(err) => {
                log::warn!("skipping {} ({}): {}", row.url_id, row.url, err);
            }
        }
    }

    writer.flush()?;
    Ok(())
}

/// Scores a batch of article urls against one shared read-only [`Lexicon`].
#[derive(Debug)]
pub struct Scorer<TExtract: Extractor = PostExtractor> {
    /// The [`reqwest::Client`] that drives requests.
    client: Client,
    /// The word lists, loaded once and never mutated.
    lexicon: Lexicon,
    /// The selector policy used on fetched pages.
    extractor: TExtract,
    config: Config,
}

impl Scorer {
    /// Convenience method for creating a new [`ScorerBuilder`]
    ///
    /// Same as calling [`ScorerBuilder::new`]
    #[inline]
    pub fn builder(lexicon: Lexicon) -> ScorerBuilder {
        ScorerBuilder::new(lexicon)
    }
}

impl<TExtract: Extractor> Scorer<TExtract> {
    pub fn lexicon(&self) -> &Lexicon {
        &self.lexicon
    }

    /// Score an already extracted document.
    pub fn score_text(&self, document: &str) -> ScoreRecord {
        let raw_tokens = text::tokenize(document);
        let clean_tokens = text::clean(&raw_tokens, &self.lexicon);
        metrics::score(document, &raw_tokens, &clean_tokens, &self.lexicon)
    }

    /// Fetch, extract and score a single url.
    pub async fn score_url<T: IntoUrl>(&self, url: T) -> Result<ScoreRecord, ExtractionError> {
        let url = url
            .into_url()
            .map_err(|error| ExtractionError::InvalidUrl { error })?;
        let article = fetch_article(
            &self.client,
            url,
            &self.extractor,
            self.config.http_success_only,
        )
        .await?;
        Ok(self.score_text(&article.text()))
    }

    /// Score every row, returning one outcome per row in input order.
    ///
    /// Rows are fetched `concurrency` at a time; `buffered` keeps completed
    /// records in input order regardless of completion order. Failed urls
    /// stay in the result as errors so the sink can report them.
    pub async fn run(&self, rows: Vec<InputRow>) -> Vec<ScoredRow> {
        let total = rows.len();
        stream::iter(rows.into_iter().enumerate().map(|(i, row)| async move {
            let record = self.score_url(row.url.as_str()).await;
            match &record {
                Ok(_) => log::info!("scored {}/{}: {}", i + 1, total, row.url),
                Err(err) => log::warn!("failed {}/{}: {}", i + 1, total, err),
            }
            ScoredRow {
                url_id: row.url_id,
                url: row.url,
                record,
            }
        }))
        .buffered(self.config.concurrency.max(1))
        .collect()
        .await
    }
}

/// Configuration for fetching and scoring.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// The user-agent used for requests.
    user_agent: String,
    /// Timeout for requests.
    request_timeout: Duration,
    /// Whether a non 2xx response fails the url.
    http_success_only: bool,
    /// Number of urls fetched at a time.
    concurrency: usize,
}

impl Config {
    /// Default timeout for requests made inside `fogscore`.
    pub const DEFAULT_REQ_TIMEOUT_SEC: u64 = 7;

    /// Default user agent for `fogscore`.
    #[inline]
    pub(crate) fn user_agent() -> String {
        format!("fogscore/{}", env!("CARGO_PKG_VERSION"))
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            user_agent: Config::user_agent(),
            request_timeout: Duration::from_secs(Config::DEFAULT_REQ_TIMEOUT_SEC),
            http_success_only: true,
            concurrency: 1,
        }
    }
}

#[derive(Debug)]
pub struct ScorerBuilder {
    lexicon: Lexicon,
    user_agent: Option<String>,
    request_timeout: Option<Duration>,
    http_success_only: Option<bool>,
    concurrency: Option<usize>,
}

impl ScorerBuilder {
    pub fn new(lexicon: Lexicon) -> Self {
        Self {
            lexicon,
            user_agent: None,
            request_timeout: None,
            http_success_only: None,
            concurrency: None,
        }
    }

    pub fn user_agent<T: ToString>(mut self, user_agent: T) -> Self {
        self.user_agent = Some(user_agent.to_string());
        self
    }

    pub fn request_timeout(mut self, request_timeout: Duration) -> Self {
        self.request_timeout = Some(request_timeout);
        self
    }

    pub fn http_success_only(mut self, http_success_only: bool) -> Self {
        self.http_success_only = Some(http_success_only);
        self
    }

    pub fn concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = Some(concurrency);
        self
    }

    pub fn build_with_extractor<TExtract: Extractor>(
        self,
        extractor: TExtract,
    ) -> Result<Scorer<TExtract>> {
        let config = Config {
            user_agent: self.user_agent.unwrap_or_else(Config::user_agent),
            request_timeout: self
                .request_timeout
                .unwrap_or_else(|| Duration::from_secs(Config::DEFAULT_REQ_TIMEOUT_SEC)),
            http_success_only: self.http_success_only.unwrap_or(true),
            concurrency: self.concurrency.unwrap_or(1),
        };

        let mut headers = HeaderMap::with_capacity(1);
        headers.insert(
            USER_AGENT,
            config
                .user_agent
                .parse()
                .context("Failed to parse user agent header.")?,
        );

        let client = Client::builder()
            .timeout(config.request_timeout)
            .default_headers(headers)
            .build()?;

        Ok(Scorer {
            client,
            lexicon: self.lexicon,
            extractor,
            config,
        })
    }

    pub fn build(self) -> Result<Scorer> {
        self.build_with_extractor(PostExtractor::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn input_rows_deserialize() {
        let data = "URL_ID,URL\nblackassign0001,https://example.com/a\nblackassign0002,https://example.com/b\n";
        let rows: Vec<InputRow> = csv::Reader::from_reader(data.as_bytes())
            .deserialize()
            .collect::<Result<_, _>>()
            .unwrap();

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].url_id, "blackassign0001");
        assert_eq!(rows[1].url, "https://example.com/b");
    }

    #[test]
    fn output_schema_headers() {
        let lexicon = Lexicon::from_words(&["great"], &[], &[]);
        let scorer = Scorer::builder(lexicon).build().unwrap();
        let record = scorer.score_text("Great news.");

        let mut writer = csv::Writer::from_writer(vec![]);
        writer
            .serialize(OutputRow::new("id1", "https://example.com", &record))
            .unwrap();
        let out = String::from_utf8(writer.into_inner().unwrap()).unwrap();

        let header = out.lines().next().unwrap();
        assert_eq!(
            header,
            "URL_ID,URL,POSITIVE SCORE,NEGATIVE SCORE,POLARITY SCORE,SUBJECTIVITY SCORE,\
             AVG SENTENCE LENGTH,COMPLEX WORD COUNT,PERCENTAGE OF COMPLEX WORDS,FOG INDEX,\
             AVG NUMBER OF WORDS PER SENTENCE,WORD COUNT,SYLLABLE PER WORD,PERSONAL PRONOUNS,\
             AVG WORD LENGTH"
        );
    }

    #[tokio::test]
    async fn run_keeps_input_order_and_reports_failures() {
        let lexicon = Lexicon::from_words(&[], &[], &[]);
        let scorer = Scorer::builder(lexicon).concurrency(4).build().unwrap();

        // unparseable urls fail before any request is sent
        let rows = vec![
            InputRow {
                url_id: "a".to_string(),
                url: "not a url".to_string(),
            },
            InputRow {
                url_id: "b".to_string(),
                url: "also bad".to_string(),
            },
        ];

        let scored = scorer.run(rows).await;
        assert_eq!(scored.len(), 2);
        assert_eq!(scored[0].url_id, "a");
        assert_eq!(scored[1].url_id, "b");
        assert!(matches!(
            scored[0].record,
            Err(ExtractionError::InvalidUrl { .. })
        ));
    }
}
