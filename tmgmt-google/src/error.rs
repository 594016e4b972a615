/// Error types for the Google translator plugin
///
/// Remote-call failures are distinguished by where they were detected:
/// [`Transport`](GoogleError::Transport) covers network failures and
/// non-success HTTP statuses, [`Service`](GoogleError::Service) covers
/// well-formed HTTP responses whose payload signals an error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GoogleError {
    /// Action outside the supported set, caught before any network I/O
    InvalidAction(String),
    /// Network failure or non-success HTTP status
    Transport(String),
    /// Success status with an error payload or an unexpected body
    Service(String),
    /// Job content violates a submission precondition
    Precondition(String),
    /// Missing or unusable translator settings
    Config(String),
}

impl std::fmt::Display for GoogleError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GoogleError::InvalidAction(action) => {
                write!(f, "Invalid action requested: {}", action)
            }
            GoogleError::Transport(msg) => {
                write!(f, "Unable to reach the Google Translate service: {}", msg)
            }
            GoogleError::Service(msg) => {
                write!(f, "Google Translate service returned an error: {}", msg)
            }
            GoogleError::Precondition(msg) => write!(f, "Job cannot be submitted: {}", msg),
            GoogleError::Config(msg) => write!(f, "Configuration error: {}", msg),
        }
    }
}

impl std::error::Error for GoogleError {}

/// Result type for plugin operations
pub type GoogleResult<T> = Result<T, GoogleError>;
