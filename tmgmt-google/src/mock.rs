//! Deterministic test backend for the Google plugin
//!
//! [`MockApi`] implements [`TranslateApi`] without touching the network,
//! so batching, reassembly and failure handling can be tested in isolation.
//! Call counters let tests assert how many requests a job produced, or
//! that none were made at all.
//!
//! # Example
//!
//! ```ignore
//! use tmgmt_google::{MockApi, MockMode, TranslateApi};
//!
//! let mock = MockApi::new(MockMode::Suffix);
//! let texts = vec!["hello".to_string()];
//! let result = mock.translate(&texts, "en", "fr").await.unwrap();
//! assert_eq!(result, vec!["hello_fr"]);
//! ```

use crate::api::{Detection, TranslateApi};
use crate::error::{GoogleError, GoogleResult};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Mock behaviors for translate calls
#[derive(Debug, Clone)]
pub enum MockMode {
    /// Append the target language: "hello" → "hello_fr"
    Suffix,

    /// Predefined (text, target) → translation pairs, falling back to
    /// suffix mode for unknown inputs
    Mappings(HashMap<(String, String), String>),

    /// Every call fails with the given message
    Error(String),

    /// Translate calls succeed in suffix mode until the nth call
    /// (1-based), which fails and keeps failing
    FailOnCall(usize, String),
}

/// API double that simulates translate/languages/detect calls
pub struct MockApi {
    mode: MockMode,
    languages: Vec<String>,
    translate_calls: AtomicUsize,
    language_calls: AtomicUsize,
}

impl MockApi {
    pub fn new(mode: MockMode) -> Self {
        Self {
            mode,
            languages: vec!["en".to_string(), "de".to_string(), "fr".to_string()],
            translate_calls: AtomicUsize::new(0),
            language_calls: AtomicUsize::new(0),
        }
    }

    /// Replace the language list reported by `languages()`
    pub fn with_languages(mut self, languages: &[&str]) -> Self {
        self.languages = languages.iter().map(|l| l.to_string()).collect();
        self
    }

    /// Number of translate calls made so far
    pub fn translate_calls(&self) -> usize {
        self.translate_calls.load(Ordering::SeqCst)
    }

    /// Number of language-list calls made so far
    pub fn language_calls(&self) -> usize {
        self.language_calls.load(Ordering::SeqCst)
    }

    fn suffix(text: &str, target: &str) -> String {
        format!("{}_{}", text, target)
    }
}

#[async_trait]
impl TranslateApi for MockApi {
    async fn translate(
        &self,
        q: &[String],
        _source: &str,
        target: &str,
    ) -> GoogleResult<Vec<String>> {
        let call = self.translate_calls.fetch_add(1, Ordering::SeqCst) + 1;
        match &self.mode {
            MockMode::Suffix => Ok(q.iter().map(|t| Self::suffix(t, target)).collect()),
            MockMode::Mappings(map) => Ok(q
                .iter()
                .map(|t| {
                    map.get(&(t.clone(), target.to_string()))
                        .cloned()
                        .unwrap_or_else(|| Self::suffix(t, target))
                })
                .collect()),
            MockMode::Error(msg) => Err(GoogleError::Service(msg.clone())),
            MockMode::FailOnCall(n, msg) => {
                if call >= *n {
                    Err(GoogleError::Transport(msg.clone()))
                } else {
                    Ok(q.iter().map(|t| Self::suffix(t, target)).collect())
                }
            }
        }
    }

    async fn languages(&self) -> GoogleResult<Vec<String>> {
        self.language_calls.fetch_add(1, Ordering::SeqCst);
        if let MockMode::Error(msg) = &self.mode {
            return Err(GoogleError::Service(msg.clone()));
        }
        Ok(self.languages.clone())
    }

    async fn detect(&self, q: &[String]) -> GoogleResult<Vec<Detection>> {
        if let MockMode::Error(msg) = &self.mode {
            return Err(GoogleError::Service(msg.clone()));
        }
        Ok(q.iter()
            .map(|_| Detection {
                language: "en".to_string(),
                confidence: 1.0,
                is_reliable: false,
            })
            .collect())
    }
}
