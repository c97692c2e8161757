/// Result alias used throughout the crate.
pub type RecorderResult<T> = Result<T, RecorderError>;

/// Errors surfaced by the recorder and by the contexts it wraps.
#[derive(thiserror::Error, Debug)]
pub enum RecorderError {
    /// Malformed input (capture logs, options).
    #[error("validation error: {0}")]
    Validation(String),

    /// Failure reported by the real drawing context.
    #[error("context error: {0}")]
    Context(String),

    /// A method the wrapped context does not expose.
    #[error("unknown method: {0}")]
    UnknownMethod(String),

    /// A value could not be turned into script text.
    #[error("encoding error: {0}")]
    Encoding(String),

    /// Anything else, usually IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl RecorderError {
    /// Build a [`RecorderError::Validation`].
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`RecorderError::Context`].
    pub fn context(msg: impl Into<String>) -> Self {
        Self::Context(msg.into())
    }

    /// Build a [`RecorderError::UnknownMethod`].
    pub fn unknown_method(name: impl Into<String>) -> Self {
        Self::UnknownMethod(name.into())
    }

    /// Build a [`RecorderError::Encoding`].
    pub fn encoding(msg: impl Into<String>) -> Self {
        Self::Encoding(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
