//! Application error types.

use crate::ports::model_gateway::GatewayError;
use relay_domain::ValidationError;
use serde::Serialize;
use thiserror::Error;

/// Errors raised by the thread store
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("thread not found: {0}")]
    ThreadNotFound(String),
}

/// Coarse error class reported to the caller
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCategory {
    /// Bad payload; nothing was changed
    Validation,
    NotFound,
    /// Provider failure, unknown model, timeout or cancellation
    Upstream,
}

impl ErrorCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCategory::Validation => "validation",
            ErrorCategory::NotFound => "not_found",
            ErrorCategory::Upstream => "upstream",
        }
    }
}

/// Errors returned by tool execution
#[derive(Error, Debug)]
pub enum ToolError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("{source}")]
    NotFound {
        source: StoreError,
        continuation_id: String,
    },

    #[error("{source}")]
    Upstream {
        source: GatewayError,
        /// Thread that already holds the turns persisted before the failure
        continuation_id: Option<String>,
    },
}

impl ToolError {
    pub fn upstream(source: GatewayError, thread_id: &str) -> Self {
        ToolError::Upstream {
            source,
            continuation_id: Some(thread_id.to_string()),
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            ToolError::Validation(_) => ErrorCategory::Validation,
            ToolError::NotFound { .. } => ErrorCategory::NotFound,
            ToolError::Upstream { .. } => ErrorCategory::Upstream,
        }
    }

    /// Thread id the caller can continue with, when one was established.
    pub fn continuation_id(&self) -> Option<&str> {
        match self {
            ToolError::Validation(_) => None,
            ToolError::NotFound {
                continuation_id, ..
            } => Some(continuation_id),
            ToolError::Upstream {
                continuation_id, ..
            } => continuation_id.as_deref(),
        }
    }
}

impl From<StoreError> for ToolError {
    fn from(err: StoreError) -> Self {
        let StoreError::ThreadNotFound(id) = &err;
        ToolError::NotFound {
            continuation_id: id.clone(),
            source: err,
        }
    }
}

impl From<serde_json::Error> for ToolError {
    fn from(err: serde_json::Error) -> Self {
        ToolError::Validation(ValidationError::Malformed(err.to_string()))
    }
}
