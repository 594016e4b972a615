//! HTTP action dispatcher for the Google Translate v2 API
//!
//! One [`GoogleApi`] instance wraps one configured endpoint and issues a
//! single GET request per call. The three supported actions map to URL
//! path segments, with `translate` mapping to the empty segment (the
//! request goes to `{base}/`). Texts to translate are sent as repeated
//! `q` query parameters (`q=a&q=b`), percent-encoded like any other
//! parameter.
//!
//! The [`TranslateApi`] trait is the seam between the batching layer and
//! the wire: one call equals one remote request, and chunking is the
//! caller's concern. [`MockApi`](crate::mock::MockApi) implements the same
//! trait for tests.
//!
//! # Example
//!
//! ```ignore
//! use tmgmt_google::{GoogleApi, GoogleConfig};
//!
//! let api = GoogleApi::new(GoogleConfig::from_env()?)?;
//! let texts = vec!["Hello".to_string(), "Goodbye".to_string()];
//! let translated = api.translate_texts(&texts, "en", "fr").await?;
//! assert_eq!(translated.len(), 2);
//! ```

use crate::config::GoogleConfig;
use crate::error::{GoogleError, GoogleResult};
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;
use std::fmt;
use std::str::FromStr;
use std::time::Duration;
use tracing::debug;

/// Translation service URL
pub const DEFAULT_BASE_URL: &str = "https://translation.googleapis.com/language/translate/v2";

/// Timeout applied to every request
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Actions the service understands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiAction {
    Translate,
    Languages,
    Detect,
}

impl ApiAction {
    /// URL path segment for this action
    ///
    /// The translate action is requested without a segment; its URL is the
    /// bare endpoint followed by a slash.
    pub fn path_segment(&self) -> &'static str {
        match self {
            ApiAction::Translate => "",
            ApiAction::Languages => "languages",
            ApiAction::Detect => "detect",
        }
    }
}

impl fmt::Display for ApiAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ApiAction::Translate => "translate",
            ApiAction::Languages => "languages",
            ApiAction::Detect => "detect",
        };
        write!(f, "{}", name)
    }
}

impl FromStr for ApiAction {
    type Err = GoogleError;

    /// Parse an action name, rejecting anything outside the supported set
    /// before any request is built
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "translate" => Ok(ApiAction::Translate),
            "languages" => Ok(ApiAction::Languages),
            "detect" => Ok(ApiAction::Detect),
            other => Err(GoogleError::InvalidAction(other.to_string())),
        }
    }
}

/// One language-detection candidate for an input text
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Detection {
    pub language: String,
    #[serde(default)]
    pub confidence: f32,
    #[serde(rename = "isReliable", default)]
    pub is_reliable: bool,
}

#[derive(Debug, Deserialize)]
struct TranslationsData {
    translations: Vec<Translation>,
}

#[derive(Debug, Deserialize)]
struct Translation {
    #[serde(rename = "translatedText")]
    translated_text: String,
}

#[derive(Debug, Deserialize)]
struct LanguagesData {
    languages: Vec<Language>,
}

#[derive(Debug, Deserialize)]
struct Language {
    language: String,
}

#[derive(Debug, Deserialize)]
struct DetectionsData {
    detections: Vec<Vec<Detection>>,
}

/// Seam between the batching layer and the wire
///
/// One call is one remote request; callers own chunking and retry policy
/// (of which there is none).
#[async_trait]
pub trait TranslateApi: Send + Sync {
    /// Translate the given texts in one request, preserving input order
    async fn translate(
        &self,
        q: &[String],
        source: &str,
        target: &str,
    ) -> GoogleResult<Vec<String>>;

    /// Language codes the service supports, in its own vocabulary
    async fn languages(&self) -> GoogleResult<Vec<String>>;

    /// Best detection candidate for each input text, in input order
    async fn detect(&self, q: &[String]) -> GoogleResult<Vec<Detection>>;
}

/// Dispatcher for the Google Translate v2 HTTP API
pub struct GoogleApi {
    config: GoogleConfig,
    client: reqwest::Client,
}

impl GoogleApi {
    /// Create a dispatcher with its own HTTP client
    pub fn new(config: GoogleConfig) -> GoogleResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| GoogleError::Transport(format!("failed to create HTTP client: {}", e)))?;
        Ok(Self::with_client(config, client))
    }

    /// Create a dispatcher around an existing HTTP client
    pub fn with_client(config: GoogleConfig, client: reqwest::Client) -> Self {
        Self { config, client }
    }

    fn base_url(&self) -> &str {
        self.config.base_url.as_deref().unwrap_or(DEFAULT_BASE_URL)
    }

    /// Build the request URL for an action: the API key, any extra
    /// parameters, then each `q` value as a repeated query parameter
    fn build_url(
        &self,
        action: ApiAction,
        params: &[(&str, &str)],
        q: &[String],
    ) -> GoogleResult<reqwest::Url> {
        let endpoint = format!(
            "{}/{}",
            self.base_url().trim_end_matches('/'),
            action.path_segment()
        );
        let mut url = reqwest::Url::parse(&endpoint)
            .map_err(|e| GoogleError::Config(format!("invalid service URL '{}': {}", endpoint, e)))?;
        {
            let mut pairs = url.query_pairs_mut();
            pairs.append_pair("key", &self.config.api_key);
            for (name, value) in params {
                pairs.append_pair(name, value);
            }
            for text in q {
                pairs.append_pair("q", text);
            }
        }
        Ok(url)
    }

    /// Perform one GET request against the service
    ///
    /// # Returns
    ///
    /// * `Ok(Value)` - Parsed JSON body, guaranteed to carry a top-level
    ///   `data` field
    /// * `Err(GoogleError::Transport)` - Network failure or non-success
    ///   HTTP status, with the upstream `error.message` when present
    /// * `Err(GoogleError::Service)` - Success status whose body is not
    ///   JSON or lacks `data`, with the nested `error.message` when present
    pub async fn request(
        &self,
        action: ApiAction,
        params: &[(&str, &str)],
        q: &[String],
    ) -> GoogleResult<Value> {
        let url = self.build_url(action, params, q)?;
        debug!(%action, q = q.len(), "dispatching request");

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| GoogleError::Transport(format!("request failed: {}", e)))?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| GoogleError::Transport(format!("failed to read response: {}", e)))?;
        let body: Option<Value> = serde_json::from_str(&text).ok();

        if !status.is_success() {
            let detail = body
                .as_ref()
                .and_then(error_message)
                .unwrap_or_else(|| text.trim().to_string());
            return Err(GoogleError::Transport(format!("HTTP {}: {}", status, detail)));
        }

        let body = body.ok_or_else(|| {
            GoogleError::Service("response body is not valid JSON".to_string())
        })?;
        if body.get("data").is_none() {
            let detail = error_message(&body)
                .unwrap_or_else(|| "response is missing the 'data' field".to_string());
            return Err(GoogleError::Service(detail));
        }

        Ok(body)
    }

    /// Translate a batch of texts in one request, preserving input order
    pub async fn translate_texts(
        &self,
        q: &[String],
        source: &str,
        target: &str,
    ) -> GoogleResult<Vec<String>> {
        let body = self
            .request(
                ApiAction::Translate,
                &[("source", source), ("target", target)],
                q,
            )
            .await?;
        let data: TranslationsData = parse_data(body)?;
        Ok(data
            .translations
            .into_iter()
            .map(|t| t.translated_text)
            .collect())
    }

    /// Fetch the language codes the service supports
    pub async fn supported_languages(&self) -> GoogleResult<Vec<String>> {
        let body = self.request(ApiAction::Languages, &[], &[]).await?;
        let data: LanguagesData = parse_data(body)?;
        Ok(data.languages.into_iter().map(|l| l.language).collect())
    }

    /// Detect the language of each input text
    pub async fn detect_languages(&self, q: &[String]) -> GoogleResult<Vec<Detection>> {
        let body = self.request(ApiAction::Detect, &[], q).await?;
        let data: DetectionsData = parse_data(body)?;
        data.detections
            .into_iter()
            .map(|candidates| {
                candidates.into_iter().next().ok_or_else(|| {
                    GoogleError::Service("no detection returned for an input".to_string())
                })
            })
            .collect()
    }
}

#[async_trait]
impl TranslateApi for GoogleApi {
    async fn translate(
        &self,
        q: &[String],
        source: &str,
        target: &str,
    ) -> GoogleResult<Vec<String>> {
        self.translate_texts(q, source, target).await
    }

    async fn languages(&self) -> GoogleResult<Vec<String>> {
        self.supported_languages().await
    }

    async fn detect(&self, q: &[String]) -> GoogleResult<Vec<Detection>> {
        self.detect_languages(q).await
    }
}

/// Pull the nested `error.message` out of an error payload
fn error_message(body: &Value) -> Option<String> {
    body.get("error")?
        .get("message")?
        .as_str()
        .map(str::to_string)
}

/// Deserialize the `data` field of a validated response body
fn parse_data<T: serde::de::DeserializeOwned>(mut body: Value) -> GoogleResult<T> {
    // `request` already guarantees the field exists
    let data = body
        .get_mut("data")
        .map(Value::take)
        .unwrap_or(Value::Null);
    serde_json::from_value(data)
        .map_err(|e| GoogleError::Service(format!("unexpected response shape: {}", e)))
}
