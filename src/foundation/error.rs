/// Convenience result type used across Podium.
pub type PodiumResult<T> = Result<T, PodiumError>;

/// Top-level error taxonomy used by engine APIs.
///
/// A render either produces a complete image or fails with exactly one of these values.
/// Per-asset fetch/decode problems never surface here; the resolver turns them into
/// [`crate::ResolvedAsset::Unavailable`].
#[derive(thiserror::Error, Debug)]
pub enum PodiumError {
    /// Invalid user-provided input (request contract, upload payload, canvas size).
    #[error("validation error: {0}")]
    Validation(String),

    /// Invalid or unreadable configuration.
    #[error("config error: {0}")]
    Config(String),

    /// Errors while fetching or decoding a single asset.
    #[error("asset error: {0}")]
    Asset(String),

    /// Unrecoverable fault while painting or encoding the surface.
    #[error("render error: {0}")]
    Render(String),

    /// Errors when serializing or deserializing data structures.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl PodiumError {
    /// Build a [`PodiumError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`PodiumError::Config`] value.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Build a [`PodiumError::Asset`] value.
    pub fn asset(msg: impl Into<String>) -> Self {
        Self::Asset(msg.into())
    }

    /// Build a [`PodiumError::Render`] value.
    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }

    /// Build a [`PodiumError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
