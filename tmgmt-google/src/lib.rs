//! Google Translate v2 plugin for the tmgmt core
//!
//! This crate connects the tmgmt translation-management entities to the
//! Google Translate v2 HTTP API: typed translator settings, an action
//! dispatcher issuing one GET request per call, and a
//! [`GoogleTranslator`] plugin that batches a job's texts into chunks,
//! submits them sequentially and reassembles the results onto the job.
//!
//! # Workflow Example
//!
//! ```ignore
//! use tmgmt::{DataItem, DataTree, Job, Translator, TranslatorPlugin};
//! use tmgmt_google::{GoogleConfig, GoogleTranslator};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // 1. Load settings and build the plugin
//!     let plugin = GoogleTranslator::new(GoogleConfig::from_env()?)?;
//!
//!     // 2. Configure a translator with the plugin's default mappings
//!     let translator = Translator::new("Google translator", plugin.plugin_id())
//!         .with_mappings(plugin.default_remote_language_mappings());
//!
//!     // 3. Build a job and submit it
//!     let data = DataTree::Group(vec![(
//!         "body".to_string(),
//!         DataTree::Leaf(DataItem::new("Hello world")),
//!     )]);
//!     let mut job = Job::new("en", "de", data);
//!
//!     if plugin.can_translate(&translator, &job) {
//!         plugin.request_translation(&translator, &mut job).await;
//!     }
//!
//!     println!("{:?}", job.state());
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod config;
pub mod error;
pub mod mock;
pub mod plugin;

// Re-export main types for convenient access
pub use api::{ApiAction, DEFAULT_BASE_URL, Detection, GoogleApi, TranslateApi};
pub use config::GoogleConfig;
pub use error::{GoogleError, GoogleResult};
pub use mock::{MockApi, MockMode};
pub use plugin::GoogleTranslator;
