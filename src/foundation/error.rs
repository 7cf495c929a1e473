/// Convenience result type used across gltihc.
pub type GlitchResult<T> = Result<T, GlitchError>;

/// Top-level error taxonomy used by engine APIs.
#[derive(thiserror::Error, Debug)]
pub enum GlitchError {
    /// Out-of-range or inconsistent options, or an allow-list naming an unknown entry.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// The block grid cannot hold a single block or the minimum segment.
    #[error("image too small: {0}")]
    ImageTooSmall(String),

    /// A cancellation flag was raised between iterations.
    #[error("glitch run cancelled")]
    Cancelled,

    /// Wrapped lower-level error from dependencies.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl GlitchError {
    /// Build a [`GlitchError::Configuration`] value.
    pub fn configuration(msg: impl Into<String>) -> Self {
        Self::Configuration(msg.into())
    }

    /// Build a [`GlitchError::ImageTooSmall`] value.
    pub fn image_too_small(msg: impl Into<String>) -> Self {
        Self::ImageTooSmall(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
