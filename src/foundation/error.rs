/// Convenience result alias used throughout the crate.
pub type ReelResult<T> = Result<T, ReelError>;

/// Error type for reel construction, rendering and capture.
#[derive(thiserror::Error, Debug)]
pub enum ReelError {
    /// Invalid input data or configuration.
    #[error("validation error: {0}")]
    Validation(String),

    /// Invalid timeline construction (bad field, duration, anchor).
    #[error("timeline error: {0}")]
    Timeline(String),

    /// Rendering failed.
    #[error("render error: {0}")]
    Render(String),

    /// Asset could not be read or decoded.
    #[error("asset error: {0}")]
    Asset(String),

    /// Capture/export failed (encoder unavailable, I/O, ...).
    #[error("capture error: {0}")]
    Capture(String),

    /// (De)serialization failed.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl ReelError {
    /// Build a [`ReelError::Validation`].
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`ReelError::Timeline`].
    pub fn timeline(msg: impl Into<String>) -> Self {
        Self::Timeline(msg.into())
    }

    /// Build a [`ReelError::Render`].
    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }

    /// Build a [`ReelError::Asset`].
    pub fn asset(msg: impl Into<String>) -> Self {
        Self::Asset(msg.into())
    }

    /// Build a [`ReelError::Capture`].
    pub fn capture(msg: impl Into<String>) -> Self {
        Self::Capture(msg.into())
    }

    /// Build a [`ReelError::Serde`].
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
