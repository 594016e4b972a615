//! Job data trees and flattening helpers
//!
//! A job carries its translatable content as an ordered tree of named
//! groups with text leaves. Plugins work on the flat view: an ordered list
//! of `(DataKey, item)` pairs produced by [`DataTree::flatten`], translated
//! out of band, and written back into the nested tree with
//! [`DataTree::set_translation`].
//!
//! # Example
//!
//! ```ignore
//! use tmgmt::{DataItem, DataKey, DataTree};
//!
//! let mut tree = DataTree::Group(vec![(
//!     "body".to_string(),
//!     DataTree::Leaf(DataItem::new("Hello world")),
//! )]);
//!
//! let items = tree.translatable_items();
//! assert_eq!(items[0].1.text, "Hello world");
//!
//! let key = items[0].0.clone();
//! tree.set_translation(&key, "Hallo Welt".to_string()).unwrap();
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;

/// A single translatable text leaf in a job data tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DataItem {
    /// Source text to be submitted for translation
    pub text: String,

    /// Leaves flagged `false` stay in the tree but are never submitted
    pub translate: bool,

    /// Translated text, attached after a successful submission
    pub translation: Option<String>,
}

impl DataItem {
    /// Create a translatable leaf with the given source text
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            translate: true,
            translation: None,
        }
    }

    /// Create a leaf that is carried along but excluded from submission
    pub fn untranslatable(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            translate: false,
            translation: None,
        }
    }
}

/// Path of a leaf inside a [`DataTree`]
///
/// Keys are opaque to plugins: they only guarantee that a key taken from a
/// flattened tree addresses the same leaf when writing results back.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct DataKey(Vec<String>);

impl DataKey {
    pub fn new(parts: Vec<String>) -> Self {
        Self(parts)
    }

    pub fn parts(&self) -> &[String] {
        &self.0
    }

    fn child(&self, part: &str) -> Self {
        let mut parts = self.0.clone();
        parts.push(part.to_string());
        Self(parts)
    }
}

impl fmt::Display for DataKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.join("."))
    }
}

impl From<&str> for DataKey {
    /// Build a key from a `.`-separated path, for tests and diagnostics
    fn from(path: &str) -> Self {
        Self(path.split('.').map(String::from).collect())
    }
}

/// Error attaching translated data to a tree
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DataError {
    /// No leaf exists at the given key
    UnknownKey(DataKey),
}

impl fmt::Display for DataError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataError::UnknownKey(key) => write!(f, "no data item under key '{}'", key),
        }
    }
}

impl std::error::Error for DataError {}

/// Ordered tree of job data: named groups with text leaves
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum DataTree {
    Leaf(DataItem),
    Group(Vec<(String, DataTree)>),
}

impl DataTree {
    /// Flatten the tree depth-first into `(key, item)` pairs
    ///
    /// The order of the result is the document order of the leaves; no leaf
    /// is duplicated or dropped.
    pub fn flatten(&self) -> Vec<(DataKey, &DataItem)> {
        let mut out = Vec::new();
        self.collect(&DataKey::new(Vec::new()), &mut out);
        out
    }

    /// Leaves eligible for submission: flagged translatable, non-empty text
    pub fn translatable_items(&self) -> Vec<(DataKey, &DataItem)> {
        self.flatten()
            .into_iter()
            .filter(|(_, item)| item.translate && !item.text.is_empty())
            .collect()
    }

    /// Attach a translation to the leaf addressed by `key`
    pub fn set_translation(&mut self, key: &DataKey, translation: String) -> Result<(), DataError> {
        match self.leaf_mut(key.parts()) {
            Some(item) => {
                item.translation = Some(translation);
                Ok(())
            }
            None => Err(DataError::UnknownKey(key.clone())),
        }
    }

    fn collect<'a>(&'a self, prefix: &DataKey, out: &mut Vec<(DataKey, &'a DataItem)>) {
        match self {
            DataTree::Leaf(item) => out.push((prefix.clone(), item)),
            DataTree::Group(children) => {
                for (name, child) in children {
                    child.collect(&prefix.child(name), out);
                }
            }
        }
    }

    fn leaf_mut(&mut self, parts: &[String]) -> Option<&mut DataItem> {
        match (self, parts) {
            (DataTree::Leaf(item), []) => Some(item),
            (DataTree::Group(children), [head, rest @ ..]) => children
                .iter_mut()
                .find(|(name, _)| name == head)
                .and_then(|(_, child)| child.leaf_mut(rest)),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_tree() -> DataTree {
        DataTree::Group(vec![
            (
                "title".to_string(),
                DataTree::Leaf(DataItem::new("A title")),
            ),
            (
                "body".to_string(),
                DataTree::Group(vec![
                    ("0".to_string(), DataTree::Leaf(DataItem::new("First"))),
                    ("1".to_string(), DataTree::Leaf(DataItem::new("Second"))),
                ]),
            ),
        ])
    }

    #[test]
    fn test_flatten_preserves_document_order() {
        let tree = sample_tree();
        let items = tree.flatten();
        assert_eq!(items.len(), 3);
        assert_eq!(items[0].0, DataKey::from("title"));
        assert_eq!(items[1].0, DataKey::from("body.0"));
        assert_eq!(items[2].0, DataKey::from("body.1"));
        assert_eq!(items[1].1.text, "First");
    }

    #[test]
    fn test_translatable_items_filters_flagged_leaves() {
        let tree = DataTree::Group(vec![
            ("a".to_string(), DataTree::Leaf(DataItem::new("keep"))),
            (
                "b".to_string(),
                DataTree::Leaf(DataItem::untranslatable("skip")),
            ),
            ("c".to_string(), DataTree::Leaf(DataItem::new(""))),
        ]);
        let items = tree.translatable_items();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].1.text, "keep");
    }

    #[test]
    fn test_set_translation_reaches_nested_leaf() {
        let mut tree = sample_tree();
        let key = DataKey::from("body.1");
        tree.set_translation(&key, "Zweite".to_string()).unwrap();

        let items = tree.flatten();
        assert_eq!(items[2].1.translation.as_deref(), Some("Zweite"));
        assert_eq!(items[0].1.translation, None);
    }

    #[test]
    fn test_set_translation_unknown_key() {
        let mut tree = sample_tree();
        let key = DataKey::from("body.7");
        let err = tree.set_translation(&key, "x".to_string()).unwrap_err();
        assert_eq!(err, DataError::UnknownKey(key));
    }

    #[test]
    fn test_group_key_is_not_a_leaf() {
        let mut tree = sample_tree();
        let err = tree
            .set_translation(&DataKey::from("body"), "x".to_string())
            .unwrap_err();
        assert!(matches!(err, DataError::UnknownKey(_)));
    }

    #[test]
    fn test_key_display_joins_parts() {
        assert_eq!(DataKey::from("body.0.value").to_string(), "body.0.value");
    }
}
