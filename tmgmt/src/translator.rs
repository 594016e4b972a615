//! Translator entities and language mapping
//!
//! A [`Translator`] is one configured connection to a translation service.
//! It owns the mapping table between the host's local language codes and
//! the remote service's vocabulary. The table is explicit: callers seed it
//! from a plugin's defaults (see
//! [`TranslatorPlugin::default_remote_language_mappings`](crate::plugin::TranslatorPlugin::default_remote_language_mappings))
//! and may override individual entries per translator. Codes without an
//! entry pass through unchanged in both directions.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A configured connection to a translation service
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Translator {
    /// Human-readable label
    pub label: String,
    /// Identifier of the plugin backing this translator
    pub plugin: String,
    /// Local language code → remote language code
    remote_mappings: HashMap<String, String>,
}

impl Translator {
    pub fn new(label: impl Into<String>, plugin: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            plugin: plugin.into(),
            remote_mappings: HashMap::new(),
        }
    }

    /// Replace the whole mapping table
    pub fn with_mappings(mut self, mappings: HashMap<String, String>) -> Self {
        self.remote_mappings = mappings;
        self
    }

    /// Override a single local → remote mapping
    pub fn set_mapping(&mut self, local: impl Into<String>, remote: impl Into<String>) {
        self.remote_mappings.insert(local.into(), remote.into());
    }

    /// Translate a local language code into the remote service's vocabulary
    pub fn map_to_remote_language(&self, local: &str) -> String {
        self.remote_mappings
            .get(local)
            .cloned()
            .unwrap_or_else(|| local.to_string())
    }

    /// Translate a remote language code back into a local code
    pub fn map_to_local_language(&self, remote: &str) -> String {
        self.remote_mappings
            .iter()
            .find(|(_, mapped)| mapped.as_str() == remote)
            .map(|(local, _)| local.clone())
            .unwrap_or_else(|| remote.to_string())
    }
}
