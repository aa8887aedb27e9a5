// crates/query-guard-core/src/lib.rs
// ============================================================================
// Module: Query Guard Core
// Description: Request parameter validation and pagination normalization.
// Purpose: Turn loosely-typed tool parameters into typed, bounded values.
// Dependencies: serde, serde_json, thiserror, time
// ============================================================================

//! ## Overview
//! Query Guard Core sits between an automated caller and a search backend. It
//! normalizes optional, possibly malformed request parameters through a fluent
//! spec DSL, records every correction as a warning and every caller-correctable
//! mistake as an error, and assembles paginated response envelopes.
//!
//! Security posture: all request parameters are untrusted. Malformed optional
//! input never raises; it becomes an error or warning entry on the
//! [`ValidationContext`].
//!
//! ## Invariants
//! - [`ValidationContext::is_valid`] is the only gate for downstream execution.
//! - [`PaginationParams`] are always within bounds and `offset == (page - 1) * page_size`.
//! - Envelopes report `is_success()` iff their error list is empty.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod context;
pub mod contract;
pub mod metadata;
pub mod pagination;
pub mod response;
pub mod spec;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use context::ValidationContext;
pub use context::ValidationMessages;
pub use contract::ContractViolation;
pub use contract::require_identifier;
pub use metadata::MetadataFilterError;
pub use metadata::MetadataFilterLimits;
pub use metadata::UnresolvedMetadataFilter;
pub use metadata::parse_metadata_filters;
pub use pagination::DEFAULT_PAGE_SIZE;
pub use pagination::MAX_PAGE_SIZE;
pub use pagination::PaginationLimits;
pub use pagination::PaginationParams;
pub use response::FetchedPage;
pub use response::ItemResponse;
pub use response::NO_ITEMS_FOUND;
pub use response::PaginatedResponse;
pub use spec::BoolSpec;
pub use spec::DateSpec;
pub use spec::EnumSetSpec;
pub use spec::IntSpec;
pub use spec::MetadataFilterSpec;
pub use spec::NamedConstant;
pub use spec::SortDirection;
pub use spec::SortOrder;
pub use spec::SortSpec;
pub use spec::StringListSpec;
pub use spec::StringSpec;
pub use spec::canonicalize;
pub use spec::parse_date_bound;
pub use spec::parse_sort;
pub use spec::split_tokens;
