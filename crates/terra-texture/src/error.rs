//! Texture generation error types.

/// Errors reported when texture generation inputs are rejected.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum TextureError {
    /// A generation or classification parameter is out of its valid range.
    #[error("invalid parameter `{name}`: {reason}")]
    InvalidParameter {
        /// Name of the offending parameter (e.g. `width`, `base.octaves`).
        name: &'static str,
        /// Human-readable explanation.
        reason: String,
    },
}

impl TextureError {
    pub(crate) fn invalid(name: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidParameter {
            name,
            reason: reason.into(),
        }
    }
}
