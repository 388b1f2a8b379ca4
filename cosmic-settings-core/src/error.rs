//! Unified error type definition

use serde::Serialize;
use thiserror::Error;

// Re-export library error type
pub use cosmic_settings_api::ApiError;

/// Why an input field was rejected before dispatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum ValidationReason {
    /// Required field absent or blank.
    Required,
    /// Not a TCP port in `1..=65535`.
    InvalidPort,
    /// Not a non-negative integer.
    InvalidInteger,
}

impl std::fmt::Display for ValidationReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Required => f.write_str("is required"),
            Self::InvalidPort => f.write_str("must be a port between 1 and 65535"),
            Self::InvalidInteger => f.write_str("must be a non-negative integer"),
        }
    }
}

/// Core layer error type
#[derive(Error, Debug, Serialize)]
#[serde(tag = "code", content = "details")]
pub enum CoreError {
    /// Transport failure or error response from the management API
    #[error("{0}")]
    Remote(ApiError),

    /// Input rejected before any remote call
    #[error("Validation error: {label} ({field}) {reason}")]
    Validation {
        field: String,
        label: String,
        reason: ValidationReason,
    },

    /// Response lacked the envelope or entity key its operation nests results under
    #[error("Envelope mismatch: {operation} response has no '{envelope}.{key}'")]
    EnvelopeMismatch {
        operation: String,
        envelope: String,
        key: String,
    },

    /// No panel or section with this identifier
    #[error("Unknown panel: {0}")]
    UnknownPanel(String),

    /// The panel does not declare this action or view
    #[error("Panel {panel} does not support {action}")]
    UnsupportedAction { panel: String, action: String },

    /// Detail lookup returned nothing
    #[error("Row not found: {panel} '{id}'")]
    RowNotFound { panel: String, id: String },

    /// Descriptor violates a structural rule
    #[error("Invalid descriptor {panel}: {reason}")]
    InvalidDescriptor { panel: String, reason: String },

    /// The navigation context has no selected resource type
    #[error("No resource type selected in section {0}")]
    MissingSelection(String),
}

impl From<ApiError> for CoreError {
    fn from(err: ApiError) -> Self {
        match err {
            ApiError::EnvelopeMismatch {
                operation,
                envelope,
                key,
            } => Self::EnvelopeMismatch {
                operation,
                envelope,
                key,
            },
            other => Self::Remote(other),
        }
    }
}

impl CoreError {
    /// Whether it is expected behavior (user input, missing row, server-side rejection), used
    /// for log classification.
    ///
    /// Level `warn` should be used when returning `true` and level `error` when returning `false`.
    /// **Please update this method simultaneously when new variants are added.**
    #[must_use]
    pub fn is_expected(&self) -> bool {
        match self {
            Self::Validation { .. }
            | Self::UnknownPanel(_)
            | Self::UnsupportedAction { .. }
            | Self::RowNotFound { .. }
            | Self::MissingSelection(_) => true,
            Self::Remote(e) => e.is_expected(),
            Self::EnvelopeMismatch { .. } | Self::InvalidDescriptor { .. } => false,
        }
    }

    pub(crate) fn validation(field: &str, label: &str, reason: ValidationReason) -> Self {
        Self::Validation {
            field: field.to_string(),
            label: label.to_string(),
            reason,
        }
    }
}

/// Core layer Result type alias
pub type CoreResult<T> = std::result::Result<T, CoreError>;
