// crates/query-guard-tools/src/error.rs
// ============================================================================
// Module: Tool Errors
// Description: Failures a tool call reports outside its response envelope.
// Purpose: Keep caller-code defects and backend faults off the message lists.
// Dependencies: thiserror, query-guard-core
// ============================================================================

//! ## Overview
//! Request parameter problems never surface here; they become envelope
//! errors. A [`ToolError`] means the invoking code broke its contract, the
//! payload could not be decoded at all, or the backend failed.

use query_guard_core::ContractViolation;
use thiserror::Error;

/// Tool invocation errors.
#[derive(Debug, Error)]
pub enum ToolError {
    /// Required identifier missing or blank.
    #[error(transparent)]
    Contract(#[from] ContractViolation),
    /// Tool payload deserialization failed.
    #[error("invalid parameters: {0}")]
    InvalidParams(String),
    /// Backend failed while serving a valid request.
    #[error(transparent)]
    Backend(#[from] BackendError),
    /// Tool payload serialization failed.
    #[error("serialization failure")]
    Serialization,
}

/// Failure reported by a search or lookup backend.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("backend failure: {message}")]
pub struct BackendError {
    /// Backend-provided description.
    message: String,
}

impl BackendError {
    /// Creates a backend error.
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// Returns the backend-provided description.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }
}
