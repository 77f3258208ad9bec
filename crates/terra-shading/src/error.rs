//! Shading error types.

/// Errors reported when shading inputs are rejected.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ShadingError {
    /// An input vector or parameter is malformed (non-unit light direction,
    /// non-finite component, negative strength, ...).
    #[error("invalid input `{name}`: {reason}")]
    InvalidInput {
        /// Name of the offending input.
        name: &'static str,
        /// Human-readable explanation.
        reason: String,
    },
}

impl ShadingError {
    pub(crate) fn invalid(name: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidInput {
            name,
            reason: reason.into(),
        }
    }
}
