// crates/query-guard-core/src/contract.rs
// ============================================================================
// Module: Caller Contract
// Description: Checks on values the invoking code itself must supply.
// Purpose: Separate programmer errors from correctable request problems.
// Dependencies: thiserror
// ============================================================================

//! ## Overview
//! Identifiers that the invoking code passes explicitly (a scope, a record id)
//! cannot be corrected by adjusting request parameters. Their absence is a
//! contract violation returned as `Err`, never accumulated on a
//! [`crate::ValidationContext`].

use thiserror::Error;

/// Caller-contract violation.
///
/// # Invariants
/// - Variants are stable for error classification.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ContractViolation {
    /// A required identifier was missing or blank.
    #[error("{0} is required and must not be blank")]
    BlankIdentifier(String),
}

/// Returns the trimmed identifier or a [`ContractViolation`].
///
/// # Errors
///
/// Returns [`ContractViolation::BlankIdentifier`] when `value` is absent or blank.
pub fn require_identifier<'v>(name: &str, value: Option<&'v str>) -> Result<&'v str, ContractViolation> {
    value
        .map(str::trim)
        .filter(|text| !text.is_empty())
        .ok_or_else(|| ContractViolation::BlankIdentifier(name.to_string()))
}
