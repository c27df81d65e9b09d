//! Failure taxonomy for a single generation.
//!
//! Every way a request can fail ends up as a [`PathError`]. The error's
//! `Display` output is diagnostic and meant for server logs; what a client
//! gets to see is [`PathError::user_message`], which never contains model
//! output or upstream error text.

use std::fmt;
use std::time::Duration;

use serde::Serialize;

use crate::invoker::InvokeError;

/// Stable category of a [`PathError`].
#[derive(Serialize, Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    InvalidRequest,
    UpstreamTimeout,
    UpstreamFailure,
    MalformedResponse,
    SchemaViolation,
    InternalError,
}

impl ErrorCategory {
    pub fn as_str(self) -> &'static str {
        match self {
            ErrorCategory::InvalidRequest => "InvalidRequest",
            ErrorCategory::UpstreamTimeout => "UpstreamTimeout",
            ErrorCategory::UpstreamFailure => "UpstreamFailure",
            ErrorCategory::MalformedResponse => "MalformedResponse",
            ErrorCategory::SchemaViolation => "SchemaViolation",
            ErrorCategory::InternalError => "InternalError",
        }
    }

    /// Recommended HTTP status for this category.
    pub fn status_code(self) -> u16 {
        match self {
            ErrorCategory::InvalidRequest => 400,
            _ => 500,
        }
    }

    /// Fixed client-facing message for categories the client cannot fix.
    pub fn generic_message(self) -> &'static str {
        match self {
            ErrorCategory::InvalidRequest => "The request is invalid.",
            ErrorCategory::UpstreamTimeout => {
                "The learning path generator took too long to respond. Please try again."
            }
            ErrorCategory::UpstreamFailure => {
                "The learning path generator is unavailable right now. Please try again later."
            }
            ErrorCategory::MalformedResponse => {
                "There was an error processing the generated learning path. Please try again."
            }
            ErrorCategory::SchemaViolation => {
                "The generated learning path had an unexpected structure. Please try again."
            }
            ErrorCategory::InternalError => "An unexpected server error occurred.",
        }
    }
}

impl fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A classified generation failure.
#[derive(Debug, thiserror::Error)]
pub enum PathError {
    /// Rejected before the model was called. The message is produced by the
    /// request guard and is safe to show.
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    #[error("model call timed out after {:.1}s", .0.as_secs_f64())]
    UpstreamTimeout(Duration),

    #[error("model call failed: {0}")]
    UpstreamFailure(String),

    /// The reply could not be parsed. `raw` is the normalized reply text.
    #[error("model reply is not valid JSON: {reason}")]
    MalformedResponse { raw: String, reason: String },

    /// The reply parsed but does not have the expected document shape.
    /// `field` is the dotted path of the first offending field.
    #[error("model reply does not match the document shape at `{field}`: {reason}")]
    SchemaViolation { field: String, reason: String },

    #[error("internal error: {0}")]
    Internal(String),
}

impl PathError {
    pub(crate) fn violation(field: impl Into<String>, reason: impl Into<String>) -> Self {
        PathError::SchemaViolation {
            field: field.into(),
            reason: reason.into(),
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            PathError::InvalidRequest(_) => ErrorCategory::InvalidRequest,
            PathError::UpstreamTimeout(_) => ErrorCategory::UpstreamTimeout,
            PathError::UpstreamFailure(_) => ErrorCategory::UpstreamFailure,
            PathError::MalformedResponse { .. } => ErrorCategory::MalformedResponse,
            PathError::SchemaViolation { .. } => ErrorCategory::SchemaViolation,
            PathError::Internal(_) => ErrorCategory::InternalError,
        }
    }

    pub fn status_code(&self) -> u16 {
        self.category().status_code()
    }

    /// The message a client is allowed to see.
    pub fn user_message(&self) -> &str {
        match self {
            PathError::InvalidRequest(reason) => reason,
            other => other.category().generic_message(),
        }
    }
}

impl From<InvokeError> for PathError {
    fn from(err: InvokeError) -> Self {
        match err {
            InvokeError::Timeout(after) => PathError::UpstreamTimeout(after),
            other => PathError::UpstreamFailure(other.to_string()),
        }
    }
}
