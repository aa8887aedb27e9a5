// crates/query-guard-core/src/spec/mod.rs
// ============================================================================
// Module: Parameter Specs
// Description: Fluent, single-use normalization units per parameter shape.
// Purpose: Resolve raw request values into typed values with feedback.
// Dependencies: crate::context
// ============================================================================

//! ## Overview
//! Each spec is obtained from a [`crate::ValidationContext`] factory, configured
//! through chained calls such as `default_to`, `range`, `allowed_values`,
//! `required`, and `uppercase`, and consumed by a single `resolve` call.
//! Resolving appends warnings for applied corrections and errors for
//! caller-correctable mistakes, and returns the normalized value.
//!
//! A `None` returned from `resolve` is advisory only. Whether the request may
//! proceed is decided exclusively by [`crate::ValidationContext::is_valid`].

// ============================================================================
// SECTION: Modules
// ============================================================================

mod boolean;
mod date;
mod enum_set;
mod integer;
mod list;
mod metadata;
mod sort;
mod string;

pub use boolean::BoolSpec;
pub use date::DateSpec;
pub use date::parse_date_bound;
pub use enum_set::EnumSetSpec;
pub use integer::IntSpec;
pub use list::StringListSpec;
pub use list::split_tokens;
pub use metadata::MetadataFilterSpec;
pub use sort::SortDirection;
pub use sort::SortOrder;
pub use sort::SortSpec;
pub use sort::parse_sort;
pub use string::StringSpec;

// ============================================================================
// SECTION: Named Constants
// ============================================================================

/// A closed set of named constants usable with enumerated-set specs.
///
/// Implementors list every variant in [`NamedConstant::ALL`] and expose a
/// stable, canonical name per variant. Parsing is case-insensitive.
pub trait NamedConstant: Copy + Ord + 'static {
    /// Every variant, in the order used when listing valid options.
    const ALL: &'static [Self];

    /// Returns the canonical name of the variant.
    fn as_str(self) -> &'static str;

    /// Finds the variant whose canonical name matches `name`, ignoring case.
    #[must_use]
    fn from_name(name: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|candidate| candidate.as_str().eq_ignore_ascii_case(name))
    }
}

// ============================================================================
// SECTION: Shared Helpers
// ============================================================================

/// Returns the trimmed value when it is present and not blank.
pub(crate) fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|text| !text.is_empty())
}

/// Joins options into a comma-separated listing for messages.
pub(crate) fn join_options<S: AsRef<str>>(options: &[S]) -> String {
    options.iter().map(AsRef::as_ref).collect::<Vec<_>>().join(", ")
}

/// Maps a token to its canonical allowed form, ignoring ASCII case.
#[must_use]
pub fn canonicalize<'s>(token: &str, allowed: &[&'s str]) -> Option<&'s str> {
    allowed.iter().copied().find(|candidate| candidate.eq_ignore_ascii_case(token))
}
