//! Translator plugin interface and registry
//!
//! [`TranslatorPlugin`] is the seam between the host and a concrete
//! translation service. Implementations own their settings and HTTP
//! machinery; the host only sees availability checks, the submission
//! precondition, the side-effecting [`request_translation`] call and the
//! language-set queries.
//!
//! Failures during [`request_translation`] never propagate as errors: the
//! plugin converts them into a job rejection so the host can report the
//! outcome through the job's messages.
//!
//! [`request_translation`]: TranslatorPlugin::request_translation

use crate::job::Job;
use crate::translator::Translator;
use async_trait::async_trait;
use std::collections::{BTreeSet, HashMap};
use std::sync::Arc;

/// Interface a translation service plugin exposes to the host
#[async_trait]
pub trait TranslatorPlugin: Send + Sync {
    /// Stable identifier this plugin is registered under
    fn plugin_id(&self) -> &'static str;

    /// Whether the plugin is configured well enough to be used at all
    fn is_available(&self, translator: &Translator) -> bool;

    /// Whether this job may be submitted
    ///
    /// This is a pure precondition check; it must not perform I/O. A job
    /// failing it is blocked before any request is sent.
    fn can_translate(&self, translator: &Translator, job: &Job) -> bool;

    /// Submit the job to the remote service
    ///
    /// On success the job transitions to submitted with translated data
    /// attached; on any failure it transitions to rejected and keeps no
    /// partial results.
    async fn request_translation(&self, translator: &Translator, job: &mut Job);

    /// Language codes the remote service supports, in its own vocabulary
    ///
    /// Returns the empty set when the translator is not configured or the
    /// remote call fails; language listing never hard-fails the host.
    async fn supported_remote_languages(&self, translator: &Translator) -> BTreeSet<String>;

    /// Local language codes this translator can translate into from
    /// `source_language`
    async fn supported_target_languages(
        &self,
        translator: &Translator,
        source_language: &str,
    ) -> BTreeSet<String>;

    /// Local → remote language mappings a translator for this plugin
    /// should start from
    fn default_remote_language_mappings(&self) -> HashMap<String, String> {
        HashMap::new()
    }
}

/// Plain lookup table of plugins keyed by plugin identifier
#[derive(Default)]
pub struct PluginRegistry {
    plugins: HashMap<&'static str, Arc<dyn TranslatorPlugin>>,
}

impl PluginRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a plugin under its own identifier, replacing any previous
    /// registration for that identifier
    pub fn register(&mut self, plugin: Arc<dyn TranslatorPlugin>) {
        self.plugins.insert(plugin.plugin_id(), plugin);
    }

    pub fn get(&self, plugin_id: &str) -> Option<Arc<dyn TranslatorPlugin>> {
        self.plugins.get(plugin_id).cloned()
    }

    /// Registered identifiers, sorted for stable output
    pub fn ids(&self) -> Vec<&'static str> {
        let mut ids: Vec<_> = self.plugins.keys().copied().collect();
        ids.sort_unstable();
        ids
    }
}
