/// Convenience result type used across svgburst.
pub type SvgBurstResult<T> = Result<T, SvgBurstError>;

/// Text shown to users for any failed assembly or export.
pub const CREATION_PROBLEM: &str = "There was a problem creating your animation. :(";

/// Top-level error taxonomy used by library APIs.
///
/// User input problems on the burst and image settings are not errors: they are reported as
/// field sets by [`crate::validate`] and [`crate::validate_settings`].
#[derive(thiserror::Error, Debug)]
pub enum SvgBurstError {
    /// Invalid caller-provided data (empty frame list, zero-sized canvas, bad interval).
    #[error("validation error: {0}")]
    Validation(String),

    /// A frame document without a single `<svg>` root, without a `viewBox`, or with broken XML.
    #[error("malformed frame: {0}")]
    MalformedFrame(String),

    /// Composite construction failed after the inputs were accepted.
    #[error("assembly error: {0}")]
    Assembly(String),

    /// Rasterizer or encoder failure.
    #[error("export error: {0}")]
    Export(String),

    /// Errors when serializing or deserializing records.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl SvgBurstError {
    /// Build a [`SvgBurstError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`SvgBurstError::MalformedFrame`] value.
    pub fn malformed_frame(msg: impl Into<String>) -> Self {
        Self::MalformedFrame(msg.into())
    }

    /// Build a [`SvgBurstError::Assembly`] value.
    pub fn assembly(msg: impl Into<String>) -> Self {
        Self::Assembly(msg.into())
    }

    /// Build a [`SvgBurstError::Export`] value.
    pub fn export(msg: impl Into<String>) -> Self {
        Self::Export(msg.into())
    }

    /// Build a [`SvgBurstError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }

    /// Message suitable for a user-facing notice.
    ///
    /// Validation errors keep their own text. Everything else collapses into
    /// [`CREATION_PROBLEM`].
    pub fn user_message(&self) -> String {
        match self {
            Self::Validation(msg) => msg.clone(),
            _ => CREATION_PROBLEM.to_owned(),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
