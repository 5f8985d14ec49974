use thiserror::Error;

/// Errors raised while building report chunks
#[derive(Error, Debug)]
pub enum ExplanationError {
    /// A missing or wrongly typed argument. The message is shown verbatim.
    #[error("{0}")]
    InvalidArgument(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl ExplanationError {
    pub fn invalid_argument(msg: impl Into<String>) -> Self {
        Self::InvalidArgument(msg.into())
    }
}

/// Type alias for Result with `ExplanationError`
pub type Result<T> = std::result::Result<T, ExplanationError>;
