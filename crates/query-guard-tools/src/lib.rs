// crates/query-guard-tools/src/lib.rs
// ============================================================================
// Module: Query Guard Tools
// Description: Search and lookup tool adapters over pluggable backends.
// Purpose: Gate backend calls behind request normalization and audit them.
// Dependencies: query-guard-core, query-guard-config, serde, serde_json
// ============================================================================

//! ## Overview
//! Tools accept raw JSON parameters from an automated caller, normalize them
//! through [`query_guard_core::ValidationContext`], and call a backend only
//! when the request is valid. Every call produces exactly one envelope or a
//! [`ToolError`] for problems the caller's own code must fix.
//!
//! Security posture: tool inputs are untrusted; audit events never carry raw
//! parameter values.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod audit;
pub mod codec;
pub mod error;
pub mod lookup;
pub mod scope;
pub mod search;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use audit::AuditSink;
pub use audit::FileAuditSink;
pub use audit::NoopAuditSink;
pub use audit::StderrAuditSink;
pub use audit::ToolAuditEvent;
pub use audit::ToolAuditEventParams;
pub use audit::ToolOutcome;
pub use audit::audit_sink_from_config;
pub use error::BackendError;
pub use error::ToolError;
pub use lookup::LookupBackend;
pub use lookup::LookupRequest;
pub use lookup::LookupTool;
pub use scope::ScopeId;
pub use search::QUICK_FILTERS;
pub use search::SORT_FIELDS;
pub use search::STATUSES;
pub use search::SearchBackend;
pub use search::SearchCriteria;
pub use search::SearchQuery;
pub use search::SearchRequest;
pub use search::SearchTool;
pub use search::Severity;
