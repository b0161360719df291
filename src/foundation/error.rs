/// Convenience result type used across rankcard.
pub type RankCardResult<T> = Result<T, RankCardError>;

/// Top-level error taxonomy used by the renderer APIs.
#[derive(thiserror::Error, Debug)]
pub enum RankCardError {
    /// Input bytes could not be decoded as a raster image.
    #[error("invalid image format: {0}")]
    InvalidImageFormat(String),

    /// A required font, mask or overlay file is missing or unreadable.
    #[error("invalid asset: {0}")]
    InvalidAsset(String),

    /// Invalid user-provided card, settings or layout data.
    #[error("validation error: {0}")]
    Validation(String),

    /// Backend invariant violated while executing a plan.
    #[error("render error: {0}")]
    Render(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl RankCardError {
    /// Build a [`RankCardError::InvalidImageFormat`] value.
    pub fn invalid_image(msg: impl Into<String>) -> Self {
        Self::InvalidImageFormat(msg.into())
    }

    /// Build a [`RankCardError::InvalidAsset`] value.
    pub fn invalid_asset(msg: impl Into<String>) -> Self {
        Self::InvalidAsset(msg.into())
    }

    /// Build a [`RankCardError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`RankCardError::Render`] value.
    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
