use serde::{Deserialize, Serialize};

/// Unified error type for all remote management API calls.
///
/// Each variant carries the `operation` (remote procedure name, e.g. `listConfigurations`)
/// that produced it, plus variant-specific context. All variants are serializable for
/// structured error reporting.
///
/// Nothing in this crate retries; every error is reported to the caller as-is.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "code")]
pub enum ApiError {
    /// A network-level error occurred (DNS resolution failure, connection refused, etc.).
    NetworkError {
        /// Operation that produced the error.
        operation: String,
        /// Error details.
        detail: String,
    },

    /// The HTTP request timed out.
    Timeout {
        /// Operation that produced the error.
        operation: String,
        /// Error details.
        detail: String,
    },

    /// The session is missing, expired, or the caller lacks access (HTTP 401/432).
    Unauthorized {
        /// Operation that produced the error.
        operation: String,
        /// Original error message from the API, if available.
        raw_message: Option<String>,
    },

    /// The API answered with an error status and a server-provided message.
    Api {
        /// Operation that produced the error.
        operation: String,
        /// HTTP status code.
        status: u16,
        /// `errorcode` reported inside the response envelope, if any.
        error_code: Option<u32>,
        /// `errortext` reported inside the response envelope.
        raw_message: String,
    },

    /// The response did not contain the envelope or entity key this operation nests
    /// its payload under.
    EnvelopeMismatch {
        /// Operation that produced the error.
        operation: String,
        /// Expected envelope key (e.g. `listconfigurationsresponse`).
        envelope: String,
        /// Expected key inside the envelope, or the envelope itself when it was absent.
        key: String,
    },

    /// A request parameter is invalid before it ever reaches the wire.
    InvalidParameter {
        /// Operation that produced the error.
        operation: String,
        /// Name of the invalid parameter.
        param: String,
        /// Description of what's wrong.
        detail: String,
    },

    /// Failed to parse the API response.
    ParseError {
        /// Operation that produced the error.
        operation: String,
        /// Details about the parse failure.
        detail: String,
    },

    /// Failed to serialize a request parameter.
    SerializationError {
        /// Operation that produced the error.
        operation: String,
        /// Details about the serialization failure.
        detail: String,
    },
}

impl ApiError {
    /// Whether this is expected behavior (bad input, missing session, server-side rejection),
    /// used to pick the log level.
    ///
    /// `true` should be logged at `warn`, `false` at `error`.
    /// **Keep in sync when adding variants.**
    #[must_use]
    pub fn is_expected(&self) -> bool {
        match self {
            Self::Unauthorized { .. } | Self::InvalidParameter { .. } => true,
            Self::Api { status, .. } => *status < 500,
            _ => false,
        }
    }

    /// Remote operation that produced this error.
    pub fn operation(&self) -> &str {
        match self {
            Self::NetworkError { operation, .. }
            | Self::Timeout { operation, .. }
            | Self::Unauthorized { operation, .. }
            | Self::Api { operation, .. }
            | Self::EnvelopeMismatch { operation, .. }
            | Self::InvalidParameter { operation, .. }
            | Self::ParseError { operation, .. }
            | Self::SerializationError { operation, .. } => operation,
        }
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NetworkError { operation, detail } => {
                write!(f, "[{operation}] Network error: {detail}")
            }
            Self::Timeout { operation, detail } => {
                write!(f, "[{operation}] Request timeout: {detail}")
            }
            Self::Unauthorized {
                operation,
                raw_message,
            } => {
                if let Some(msg) = raw_message {
                    write!(f, "[{operation}] Unauthorized: {msg}")
                } else {
                    write!(f, "[{operation}] Unauthorized")
                }
            }
            Self::Api {
                operation,
                status,
                error_code,
                raw_message,
            } => {
                if let Some(code) = error_code {
                    write!(f, "[{operation}] HTTP {status} ({code}): {raw_message}")
                } else {
                    write!(f, "[{operation}] HTTP {status}: {raw_message}")
                }
            }
            Self::EnvelopeMismatch {
                operation,
                envelope,
                key,
            } => {
                if envelope == key {
                    write!(f, "[{operation}] Response is missing envelope '{envelope}'")
                } else {
                    write!(f, "[{operation}] Response envelope '{envelope}' has no '{key}'")
                }
            }
            Self::InvalidParameter {
                operation,
                param,
                detail,
            } => {
                write!(f, "[{operation}] Invalid parameter '{param}': {detail}")
            }
            Self::ParseError { operation, detail } => {
                write!(f, "[{operation}] Parse error: {detail}")
            }
            Self::SerializationError { operation, detail } => {
                write!(f, "[{operation}] Serialization error: {detail}")
            }
        }
    }
}

impl std::error::Error for ApiError {}

/// Convenience type alias for `Result<T, ApiError>`.
pub type Result<T> = std::result::Result<T, ApiError>;
