//! The Google translator plugin: batching, reassembly and job orchestration
//!
//! [`GoogleTranslator`] flattens a job's data into an ordered list of
//! `(key, text)` units, splits the texts into chunks of at most
//! [`CHUNK_SIZE`], issues one dispatcher call per chunk and zips each
//! chunk's results back onto its keys in order. The unit of atomicity is
//! the whole job: the first failing chunk rejects it and discards every
//! already-translated chunk. There is no retry.
//!
//! Language-set queries degrade instead of failing: a misconfigured
//! translator reports an empty set rather than surfacing an error to the
//! host.

use crate::api::{Detection, GoogleApi, TranslateApi};
use crate::config::GoogleConfig;
use crate::error::{GoogleError, GoogleResult};
use async_trait::async_trait;
use std::collections::{BTreeSet, HashMap};
use std::sync::Arc;
use tmgmt::{DataKey, Job, Translator, TranslatorPlugin};
use tracing::{debug, warn};

/// Max number of texts sent in one translate request
const CHUNK_SIZE: usize = 5;

/// Maximum supported length per text, in Unicode code points
const MAX_CHARACTERS: usize = 5000;

/// Google translator plugin
pub struct GoogleTranslator {
    config: GoogleConfig,
    api: Arc<dyn TranslateApi>,
    chunk_size: usize,
    max_characters: usize,
}

impl GoogleTranslator {
    /// Create a plugin instance talking to the configured endpoint
    pub fn new(config: GoogleConfig) -> GoogleResult<Self> {
        let api = Arc::new(GoogleApi::new(config.clone())?);
        Ok(Self::with_api(config, api))
    }

    /// Create a plugin instance around an explicit API backend
    ///
    /// This is the injection point for test doubles; production code uses
    /// [`GoogleTranslator::new`].
    pub fn with_api(config: GoogleConfig, api: Arc<dyn TranslateApi>) -> Self {
        Self {
            config,
            api,
            chunk_size: CHUNK_SIZE,
            max_characters: MAX_CHARACTERS,
        }
    }

    /// Detect the language of each input text
    pub async fn detect(&self, texts: &[String]) -> GoogleResult<Vec<Detection>> {
        self.api.detect(texts).await
    }

    /// One remote call for one chunk, with the order/count invariant
    /// enforced at this boundary
    async fn translate_chunk(
        &self,
        chunk: &[String],
        source: &str,
        target: &str,
    ) -> GoogleResult<Vec<String>> {
        let results = self.api.translate(chunk, source, target).await?;
        if results.len() != chunk.len() {
            return Err(GoogleError::Service(format!(
                "expected {} translations, got {}",
                chunk.len(),
                results.len()
            )));
        }
        Ok(results)
    }
}

#[async_trait]
impl TranslatorPlugin for GoogleTranslator {
    fn plugin_id(&self) -> &'static str {
        "google"
    }

    fn is_available(&self, _translator: &Translator) -> bool {
        self.config.is_configured()
    }

    fn can_translate(&self, translator: &Translator, job: &Job) -> bool {
        if !self.is_available(translator) {
            return false;
        }
        // If one of the texts in this job exceeds the character limit the
        // whole job is blocked before any request is sent.
        job.translatable_items()
            .iter()
            .all(|(_, item)| item.text.chars().count() <= self.max_characters)
    }

    async fn request_translation(&self, translator: &Translator, job: &mut Job) {
        let (keys, texts): (Vec<DataKey>, Vec<String>) = job
            .translatable_items()
            .into_iter()
            .map(|(key, item)| (key, item.text.clone()))
            .unzip();

        let source = translator.map_to_remote_language(&job.source_language);
        let target = translator.map_to_remote_language(&job.target_language);
        debug!(units = keys.len(), %source, %target, "submitting job");

        let mut translated: Vec<(DataKey, String)> = Vec::with_capacity(keys.len());
        for (chunk_index, chunk) in texts.chunks(self.chunk_size).enumerate() {
            match self.translate_chunk(chunk, &source, &target).await {
                Ok(results) => {
                    // Collect translated texts under the original keys.
                    let offset = chunk_index * self.chunk_size;
                    for (i, text) in results.into_iter().enumerate() {
                        translated.push((keys[offset + i].clone(), text));
                    }
                }
                Err(e) => {
                    job.rejected(format!(
                        "Translation has been rejected with following error: {}",
                        e
                    ));
                    return;
                }
            }
        }

        // Reached only once every chunk succeeded.
        job.submitted("The translation job has been submitted.");
        if let Err(e) = job.add_translated_data(translated) {
            job.rejected(format!(
                "Translation has been rejected with following error: {}",
                e
            ));
        }
    }

    async fn supported_remote_languages(&self, translator: &Translator) -> BTreeSet<String> {
        // Prevent access if the translator isn't configured yet.
        if !self.is_available(translator) {
            return BTreeSet::new();
        }
        match self.api.languages().await {
            Ok(languages) => languages.into_iter().collect(),
            Err(e) => {
                warn!("failed to fetch supported languages: {}", e);
                BTreeSet::new()
            }
        }
    }

    async fn supported_target_languages(
        &self,
        translator: &Translator,
        source_language: &str,
    ) -> BTreeSet<String> {
        let remote = self.supported_remote_languages(translator).await;
        let mut languages: BTreeSet<String> = remote
            .iter()
            .map(|remote_language| translator.map_to_local_language(remote_language))
            .collect();

        // A source outside the supported set cannot be translated from.
        if !languages.remove(source_language) {
            return BTreeSet::new();
        }
        languages
    }

    fn default_remote_language_mappings(&self) -> HashMap<String, String> {
        HashMap::from([
            ("zh-hans".to_string(), "zh-CHS".to_string()),
            ("zh-hant".to_string(), "zh-CHT".to_string()),
        ])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::{MockApi, MockMode};
    use tmgmt::{DataItem, DataTree, JobState, MessageSeverity};

    fn plugin_with(mode: MockMode) -> (GoogleTranslator, Arc<MockApi>) {
        let api = Arc::new(MockApi::new(mode));
        let plugin = GoogleTranslator::with_api(GoogleConfig::new("correct key"), api.clone());
        (plugin, api)
    }

    fn translator_for(plugin: &GoogleTranslator) -> Translator {
        Translator::new("Google translator", plugin.plugin_id())
            .with_mappings(plugin.default_remote_language_mappings())
    }

    fn job_with_items(count: usize) -> Job {
        let children = (0..count)
            .map(|i| {
                (
                    format!("item-{}", i),
                    DataTree::Leaf(DataItem::new(format!("text {}", i))),
                )
            })
            .collect();
        Job::new("en", "de", DataTree::Group(children))
    }

    #[test]
    fn test_is_available_requires_api_key() {
        let (plugin, _) = plugin_with(MockMode::Suffix);
        let translator = translator_for(&plugin);
        assert!(plugin.is_available(&translator));

        let unconfigured =
            GoogleTranslator::with_api(GoogleConfig::new(""), Arc::new(MockApi::new(MockMode::Suffix)));
        assert!(!unconfigured.is_available(&translator));
    }

    #[test]
    fn test_can_translate_counts_code_points() {
        let (plugin, _) = plugin_with(MockMode::Suffix);
        let translator = translator_for(&plugin);

        // 5000 two-byte characters are within the limit; the measure is
        // code points, not bytes.
        let at_limit = Job::new(
            "en",
            "de",
            DataTree::Leaf(DataItem::new("ü".repeat(5000))),
        );
        assert!(plugin.can_translate(&translator, &at_limit));

        let over_limit = Job::new(
            "en",
            "de",
            DataTree::Leaf(DataItem::new("ü".repeat(5001))),
        );
        assert!(!plugin.can_translate(&translator, &over_limit));
    }

    #[test]
    fn test_one_oversized_unit_blocks_the_whole_job() {
        let (plugin, _) = plugin_with(MockMode::Suffix);
        let translator = translator_for(&plugin);
        let data = DataTree::Group(vec![
            ("ok".to_string(), DataTree::Leaf(DataItem::new("short"))),
            (
                "big".to_string(),
                DataTree::Leaf(DataItem::new("x".repeat(5001))),
            ),
        ]);
        let job = Job::new("en", "de", data);
        assert!(!plugin.can_translate(&translator, &job));
    }

    #[tokio::test]
    async fn test_chunking_dispatches_ceil_m_over_n_calls() {
        let (plugin, api) = plugin_with(MockMode::Suffix);
        let translator = translator_for(&plugin);
        let mut job = job_with_items(12);

        plugin.request_translation(&translator, &mut job).await;

        assert_eq!(job.state(), JobState::Submitted);
        assert_eq!(api.translate_calls(), 3);

        // Every unit translated, in order, nothing duplicated or dropped.
        let items = job.data().flatten();
        assert_eq!(items.len(), 12);
        for (i, (_, item)) in items.iter().enumerate() {
            assert_eq!(
                item.translation.as_deref(),
                Some(format!("text {}_de", i).as_str())
            );
        }
    }

    #[tokio::test]
    async fn test_reassembly_preserves_key_association() {
        let mut map = HashMap::new();
        map.insert(("Hello".to_string(), "de".to_string()), "Hallo".to_string());
        map.insert(("World".to_string(), "de".to_string()), "Welt".to_string());
        let (plugin, _) = plugin_with(MockMode::Mappings(map));
        let translator = translator_for(&plugin);

        let data = DataTree::Group(vec![
            ("k1".to_string(), DataTree::Leaf(DataItem::new("Hello"))),
            ("k2".to_string(), DataTree::Leaf(DataItem::new("World"))),
        ]);
        let mut job = Job::new("en", "de", data);
        plugin.request_translation(&translator, &mut job).await;

        let items = job.data().flatten();
        assert_eq!(items[0].1.translation.as_deref(), Some("Hallo"));
        assert_eq!(items[1].1.translation.as_deref(), Some("Welt"));
    }

    #[tokio::test]
    async fn test_untranslatable_items_are_not_submitted() {
        let (plugin, api) = plugin_with(MockMode::Suffix);
        let translator = translator_for(&plugin);
        let data = DataTree::Group(vec![
            ("a".to_string(), DataTree::Leaf(DataItem::new("translate me"))),
            (
                "b".to_string(),
                DataTree::Leaf(DataItem::untranslatable("not me")),
            ),
        ]);
        let mut job = Job::new("en", "de", data);
        plugin.request_translation(&translator, &mut job).await;

        assert_eq!(api.translate_calls(), 1);
        let items = job.data().flatten();
        assert_eq!(items[0].1.translation.as_deref(), Some("translate me_de"));
        assert_eq!(items[1].1.translation, None);
    }

    #[tokio::test]
    async fn test_failing_chunk_rejects_whole_job() {
        let (plugin, api) = plugin_with(MockMode::FailOnCall(2, "HTTP 400: Bad Request".to_string()));
        let translator = translator_for(&plugin);
        let mut job = job_with_items(12);

        plugin.request_translation(&translator, &mut job).await;

        assert_eq!(job.state(), JobState::Rejected);
        // Remaining chunks were not dispatched after the failure.
        assert_eq!(api.translate_calls(), 2);
        // No partial translations survive, including chunk 1's.
        assert!(job.data().flatten().iter().all(|(_, item)| item.translation.is_none()));

        let message = &job.messages()[0];
        assert_eq!(message.severity, MessageSeverity::Error);
        assert!(message.text.contains("HTTP 400"));
    }

    #[tokio::test]
    async fn test_count_mismatch_rejects_job() {
        struct TruncatingApi;

        #[async_trait]
        impl TranslateApi for TruncatingApi {
            async fn translate(
                &self,
                q: &[String],
                _source: &str,
                _target: &str,
            ) -> GoogleResult<Vec<String>> {
                Ok(q.iter().skip(1).cloned().collect())
            }

            async fn languages(&self) -> GoogleResult<Vec<String>> {
                Ok(Vec::new())
            }

            async fn detect(&self, _q: &[String]) -> GoogleResult<Vec<Detection>> {
                Ok(Vec::new())
            }
        }

        let plugin =
            GoogleTranslator::with_api(GoogleConfig::new("correct key"), Arc::new(TruncatingApi));
        let translator = translator_for(&plugin);
        let mut job = job_with_items(2);

        plugin.request_translation(&translator, &mut job).await;

        assert_eq!(job.state(), JobState::Rejected);
        assert!(job.messages()[0].text.contains("expected 2 translations"));
    }

    #[tokio::test]
    async fn test_submitted_job_carries_status_message() {
        let (plugin, _) = plugin_with(MockMode::Suffix);
        let translator = translator_for(&plugin);
        let mut job = job_with_items(1);

        plugin.request_translation(&translator, &mut job).await;

        assert_eq!(job.state(), JobState::Submitted);
        assert_eq!(
            job.messages()[0].text,
            "The translation job has been submitted."
        );
    }

    #[tokio::test]
    async fn test_unconfigured_translator_makes_no_network_calls() {
        let api = Arc::new(MockApi::new(MockMode::Suffix));
        let plugin = GoogleTranslator::with_api(GoogleConfig::new(""), api.clone());
        let translator = translator_for(&plugin);

        assert!(!plugin.is_available(&translator));
        let languages = plugin.supported_remote_languages(&translator).await;
        assert!(languages.is_empty());
        assert_eq!(api.language_calls(), 0);
    }

    #[tokio::test]
    async fn test_language_fetch_errors_degrade_to_empty_set() {
        let (plugin, api) = plugin_with(MockMode::Error("keyInvalid".to_string()));
        let translator = translator_for(&plugin);

        let languages = plugin.supported_remote_languages(&translator).await;
        assert!(languages.is_empty());
        assert_eq!(api.language_calls(), 1);
    }

    #[tokio::test]
    async fn test_target_languages_exclude_the_source() {
        let api = Arc::new(MockApi::new(MockMode::Suffix).with_languages(&["en", "de", "fr"]));
        let plugin = GoogleTranslator::with_api(GoogleConfig::new("correct key"), api);
        let translator = translator_for(&plugin);

        let targets = plugin.supported_target_languages(&translator, "en").await;
        let expected: BTreeSet<String> = ["de", "fr"].iter().map(|s| s.to_string()).collect();
        assert_eq!(targets, expected);
    }

    #[tokio::test]
    async fn test_unsupported_source_yields_empty_set() {
        let api = Arc::new(MockApi::new(MockMode::Suffix).with_languages(&["en", "de"]));
        let plugin = GoogleTranslator::with_api(GoogleConfig::new("correct key"), api);
        let translator = translator_for(&plugin);

        let targets = plugin.supported_target_languages(&translator, "pt").await;
        assert!(targets.is_empty());
    }

    #[tokio::test]
    async fn test_remote_codes_are_remapped_before_source_exclusion() {
        let api = Arc::new(MockApi::new(MockMode::Suffix).with_languages(&["en", "zh-CHS", "zh-CHT"]));
        let plugin = GoogleTranslator::with_api(GoogleConfig::new("correct key"), api);
        let translator = translator_for(&plugin);

        let targets = plugin.supported_target_languages(&translator, "en").await;
        assert!(targets.contains("zh-hans"));
        assert!(targets.contains("zh-hant"));
        assert!(!targets.contains("zh-CHS"));
        assert!(!targets.contains("zh-CHT"));
        assert!(!targets.contains("en"));
    }

    #[tokio::test]
    async fn test_custom_chunk_size_is_honored() {
        let api = Arc::new(MockApi::new(MockMode::Suffix));
        let mut plugin = GoogleTranslator::with_api(GoogleConfig::new("correct key"), api.clone());
        plugin.chunk_size = 2;
        let translator = translator_for(&plugin);
        let mut job = job_with_items(5);

        plugin.request_translation(&translator, &mut job).await;

        assert_eq!(job.state(), JobState::Submitted);
        assert_eq!(api.translate_calls(), 3);
    }
}
