// crates/query-guard-tools/src/scope.rs
// ============================================================================
// Module: Scope Identifier
// Description: Validated identifier for the application or tenant searched.
// Purpose: Reject blank scopes before any request normalization.
// Dependencies: serde, query-guard-core
// ============================================================================

//! Scope identifiers passed explicitly by the invoking code.

use std::fmt;

use query_guard_core::ContractViolation;
use query_guard_core::require_identifier;
use serde::Serialize;

/// Non-blank, trimmed scope identifier supplied by the invoking code.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct ScopeId(String);

impl ScopeId {
    /// Parses a scope identifier.
    ///
    /// # Errors
    ///
    /// Returns [`ContractViolation::BlankIdentifier`] when `raw` is blank.
    pub fn parse(raw: &str) -> Result<Self, ContractViolation> {
        require_identifier("scope", Some(raw)).map(|scope| Self(scope.to_string()))
    }

    /// Returns the identifier text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ScopeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
