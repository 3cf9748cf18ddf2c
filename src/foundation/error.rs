/// Convenience result type used across the photobooth engine.
pub type PhotoboothResult<T> = Result<T, PhotoboothError>;

/// Top-level error taxonomy used by engine APIs.
///
/// Most boundaries absorb these into a log line and an empty result; the variants exist so the
/// cause survives until that point.
#[derive(thiserror::Error, Debug)]
pub enum PhotoboothError {
    /// Invalid user-provided data (template names, style values, image dimensions).
    #[error("validation error: {0}")]
    Validation(String),

    /// Camera acquisition or frame source failure.
    #[error("camera error: {0}")]
    Camera(String),

    /// An offscreen raster surface could not be created or drawn to.
    #[error("surface error: {0}")]
    Surface(String),

    /// Image decode or encode failure.
    #[error("codec error: {0}")]
    Codec(String),

    /// Invalid or unreadable configuration.
    #[error("config error: {0}")]
    Config(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl PhotoboothError {
    /// Build a [`PhotoboothError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`PhotoboothError::Camera`] value.
    pub fn camera(msg: impl Into<String>) -> Self {
        Self::Camera(msg.into())
    }

    /// Build a [`PhotoboothError::Surface`] value.
    pub fn surface(msg: impl Into<String>) -> Self {
        Self::Surface(msg.into())
    }

    /// Build a [`PhotoboothError::Codec`] value.
    pub fn codec(msg: impl Into<String>) -> Self {
        Self::Codec(msg.into())
    }

    /// Build a [`PhotoboothError::Config`] value.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
