//! Core translation-management entities
//!
//! This crate holds the host-side surface that translator plugins program
//! against: the job data tree, the [`Job`] entity with its state machine,
//! the [`Translator`] entity carrying local/remote language mappings, and
//! the [`TranslatorPlugin`] trait together with a plain [`PluginRegistry`]
//! lookup table.
//!
//! Plugins are constructed explicitly and registered under their plugin
//! identifier; there is no runtime discovery.
//!
//! # Example
//!
//! ```ignore
//! use tmgmt::{DataItem, DataTree, Job, PluginRegistry, Translator};
//!
//! let mut registry = PluginRegistry::new();
//! registry.register(std::sync::Arc::new(my_plugin));
//!
//! let plugin = registry.get("google").unwrap();
//! let translator = Translator::new("Google translator", plugin.plugin_id())
//!     .with_mappings(plugin.default_remote_language_mappings());
//!
//! let data = DataTree::Group(vec![(
//!     "body".to_string(),
//!     DataTree::Leaf(DataItem::new("Hello world")),
//! )]);
//! let mut job = Job::new("en", "de", data);
//!
//! if plugin.can_translate(&translator, &job) {
//!     plugin.request_translation(&translator, &mut job).await;
//! }
//! ```

pub mod data;
pub mod job;
pub mod plugin;
pub mod translator;

pub use data::{DataError, DataItem, DataKey, DataTree};
pub use job::{Job, JobMessage, JobState, MessageSeverity};
pub use plugin::{PluginRegistry, TranslatorPlugin};
pub use translator::Translator;
