//! Translator settings for the Google plugin
//!
//! Settings are a typed struct validated when loaded, not a dynamic bag.
//! The only required value is the API key; the endpoint override exists so
//! tests can point the plugin at a local double of the service.

use crate::error::{GoogleError, GoogleResult};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Environment variable holding the API key
pub const API_KEY_ENV: &str = "GOOGLE_TRANSLATE_API_KEY";

/// Environment variable overriding the service endpoint
pub const BASE_URL_ENV: &str = "GOOGLE_TRANSLATE_URL";

/// Settings for one Google translator
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GoogleConfig {
    /// API key sent as the `key` query parameter
    pub api_key: String,

    /// Endpoint override, used to point the plugin at a test double
    pub base_url: Option<String>,
}

impl GoogleConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: None,
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    /// Load settings from the environment
    ///
    /// Reads the API key from `GOOGLE_TRANSLATE_API_KEY` and an optional
    /// endpoint override from `GOOGLE_TRANSLATE_URL`.
    ///
    /// # Returns
    ///
    /// * `Ok(Self)` - Usable settings
    /// * `Err(GoogleError::Config)` - If the key is unset or empty
    pub fn from_env() -> GoogleResult<Self> {
        let api_key = std::env::var(API_KEY_ENV).map_err(|_| {
            GoogleError::Config(format!("{} environment variable not set", API_KEY_ENV))
        })?;
        if api_key.trim().is_empty() {
            return Err(GoogleError::Config("API key cannot be empty".to_string()));
        }
        Ok(Self {
            api_key,
            base_url: std::env::var(BASE_URL_ENV).ok(),
        })
    }

    /// True once a non-empty API key is present
    pub fn is_configured(&self) -> bool {
        !self.api_key.trim().is_empty()
    }
}

impl fmt::Debug for GoogleConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GoogleConfig")
            .field("api_key", &"***")
            .field("base_url", &self.base_url)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_configured_with_key() {
        assert!(GoogleConfig::new("some-key").is_configured());
    }

    #[test]
    fn test_unconfigured_with_empty_or_blank_key() {
        assert!(!GoogleConfig::new("").is_configured());
        assert!(!GoogleConfig::new("   ").is_configured());
    }

    #[test]
    fn test_from_env_without_key() {
        // Ensure env var is not set for this test
        unsafe {
            std::env::remove_var(API_KEY_ENV);
        }
        let result = GoogleConfig::from_env();
        match result {
            Err(GoogleError::Config(msg)) => assert!(msg.contains("not set")),
            _ => panic!("Expected Config error"),
        }
    }

    #[test]
    fn test_base_url_override() {
        let config = GoogleConfig::new("key").with_base_url("http://127.0.0.1:3000");
        assert_eq!(config.base_url.as_deref(), Some("http://127.0.0.1:3000"));
    }

    #[test]
    fn test_debug_masks_api_key() {
        let config = GoogleConfig::new("secret-key");
        let debug = format!("{:?}", config);
        assert!(debug.contains("***"));
        assert!(!debug.contains("secret-key"));
    }
}
