/// Convenience result type used across captionreel.
pub type ReelResult<T> = Result<T, ReelError>;

/// Top-level error taxonomy. Every variant is fatal to the run.
#[derive(thiserror::Error, Debug)]
pub enum ReelError {
    /// A required input (directory, font, transcript or cue file) does not exist.
    #[error("input not found: {0}")]
    InputNotFound(String),

    /// Transcript and cue data disagree or are malformed.
    #[error("data integrity error: {0}")]
    DataIntegrity(String),

    /// Font loading, glyph drawing or frame image writing failed.
    #[error("rasterization error: {0}")]
    Rasterization(String),

    /// Invalid configuration values.
    #[error("validation error: {0}")]
    Validation(String),

    /// Filesystem failure not covered by a more specific variant.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Context-wrapped library error.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl ReelError {
    /// Build an [`ReelError::InputNotFound`].
    pub fn input_not_found(msg: impl Into<String>) -> Self {
        Self::InputNotFound(msg.into())
    }

    /// Build a [`ReelError::DataIntegrity`].
    pub fn data_integrity(msg: impl Into<String>) -> Self {
        Self::DataIntegrity(msg.into())
    }

    /// Build a [`ReelError::Rasterization`].
    pub fn rasterization(msg: impl Into<String>) -> Self {
        Self::Rasterization(msg.into())
    }

    /// Build a [`ReelError::Validation`].
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
