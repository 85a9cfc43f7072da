use thiserror::Error;

/// All possible errors in the task tracker.
///
/// Validation and index errors are always recoverable: they are reported
/// to the user and leave the task list unchanged. IO errors surface from
/// the storage layer.
#[derive(Error, Debug)]
pub enum TaskError {
    #[error("{0}")]
    Validation(String),

    #[error("No task at that position")]
    Index(usize),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl TaskError {
    /// Shorthand for a validation failure with a user-facing message.
    pub fn validation(msg: impl Into<String>) -> Self {
        TaskError::Validation(msg.into())
    }
}

/// Result type alias
pub type Result<T> = std::result::Result<T, TaskError>;
