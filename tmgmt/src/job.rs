//! Translation jobs and their state machine
//!
//! A [`Job`] bundles a data tree with a source and target language and
//! tracks what happened to it. Plugins drive the two transitions:
//! [`Job::submitted`] once every remote request succeeded, or
//! [`Job::rejected`] carrying the upstream error. Both record a
//! [`JobMessage`] so the host can surface the outcome.

use crate::data::{DataError, DataItem, DataKey, DataTree};
use serde::{Deserialize, Serialize};

/// Lifecycle state of a job
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum JobState {
    /// Created but not yet handed to a translation service
    Unprocessed,
    /// All requests succeeded and translated data is attached
    Submitted,
    /// A request failed; no translated data is kept
    Rejected,
}

/// Severity of a recorded job message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MessageSeverity {
    Status,
    Error,
}

/// A message recorded against a job during processing
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobMessage {
    pub text: String,
    pub severity: MessageSeverity,
}

/// A unit of translation work
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Job {
    /// Local language code of the source content
    pub source_language: String,
    /// Local language code the job should be translated into
    pub target_language: String,
    data: DataTree,
    state: JobState,
    messages: Vec<JobMessage>,
}

impl Job {
    pub fn new(
        source_language: impl Into<String>,
        target_language: impl Into<String>,
        data: DataTree,
    ) -> Self {
        Self {
            source_language: source_language.into(),
            target_language: target_language.into(),
            data,
            state: JobState::Unprocessed,
            messages: Vec::new(),
        }
    }

    pub fn data(&self) -> &DataTree {
        &self.data
    }

    pub fn state(&self) -> JobState {
        self.state
    }

    pub fn messages(&self) -> &[JobMessage] {
        &self.messages
    }

    /// The ordered items a plugin should submit for this job
    pub fn translatable_items(&self) -> Vec<(DataKey, &DataItem)> {
        self.data.translatable_items()
    }

    /// Mark the job as submitted and record a status message
    pub fn submitted(&mut self, message: impl Into<String>) {
        self.state = JobState::Submitted;
        self.messages.push(JobMessage {
            text: message.into(),
            severity: MessageSeverity::Status,
        });
    }

    /// Mark the job as rejected and record an error message
    pub fn rejected(&mut self, message: impl Into<String>) {
        self.state = JobState::Rejected;
        self.messages.push(JobMessage {
            text: message.into(),
            severity: MessageSeverity::Error,
        });
    }

    /// Attach translated texts, restructured back into the nested tree
    pub fn add_translated_data(
        &mut self,
        translations: Vec<(DataKey, String)>,
    ) -> Result<(), DataError> {
        for (key, text) in translations {
            self.data.set_translation(&key, text)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn job() -> Job {
        let data = DataTree::Group(vec![(
            "body".to_string(),
            DataTree::Leaf(DataItem::new("Hello world")),
        )]);
        Job::new("en", "de", data)
    }

    #[test]
    fn test_new_job_is_unprocessed() {
        let job = job();
        assert_eq!(job.state(), JobState::Unprocessed);
        assert!(job.messages().is_empty());
    }

    #[test]
    fn test_submitted_records_status_message() {
        let mut job = job();
        job.submitted("The translation job has been submitted.");
        assert_eq!(job.state(), JobState::Submitted);
        assert_eq!(job.messages().len(), 1);
        assert_eq!(job.messages()[0].severity, MessageSeverity::Status);
    }

    #[test]
    fn test_rejected_records_error_message() {
        let mut job = job();
        job.rejected("upstream failure");
        assert_eq!(job.state(), JobState::Rejected);
        assert_eq!(job.messages()[0].severity, MessageSeverity::Error);
        assert_eq!(job.messages()[0].text, "upstream failure");
    }

    #[test]
    fn test_add_translated_data_writes_into_tree() {
        let mut job = job();
        let key = job.translatable_items()[0].0.clone();
        job.add_translated_data(vec![(key, "Hallo Welt".to_string())])
            .unwrap();
        let items = job.data().flatten();
        assert_eq!(items[0].1.translation.as_deref(), Some("Hallo Welt"));
    }

    #[test]
    fn test_add_translated_data_unknown_key() {
        let mut job = job();
        let result = job.add_translated_data(vec![(DataKey::from("nope"), "x".to_string())]);
        assert!(result.is_err());
    }
}
