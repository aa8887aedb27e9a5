// crates/query-guard-core/src/spec/sort.rs
// ============================================================================
// Module: Sort Spec
// Description: Parsing of `field` / `-field` sort tokens.
// Purpose: Reject malformed sort expressions before they reach a backend.
// Dependencies: crate::context, serde
// ============================================================================

//! ## Overview
//! A sort token is an optional `-` (descending) followed by a field name made
//! of an ASCII letter and then letters, digits, `_`, or `.`. Anything else is
//! a hard error. An optional field allowlist canonicalizes the field name
//! case-insensitively.

use serde::Serialize;

use crate::context::ValidationContext;
use crate::spec::canonicalize;
use crate::spec::join_options;
use crate::spec::non_blank;

// ============================================================================
// SECTION: Types
// ============================================================================

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SortDirection {
    /// Smallest first.
    Ascending,
    /// Largest first; requested with a leading `-`.
    Descending,
}

/// Parsed sort expression.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SortOrder {
    /// Field to sort on.
    pub field: String,
    /// Sort direction.
    pub direction: SortDirection,
}

// ============================================================================
// SECTION: Parsing
// ============================================================================

/// Parses a sort token. Returns `None` when the token is malformed.
#[must_use]
pub fn parse_sort(text: &str) -> Option<SortOrder> {
    let text = text.trim();
    let (field, direction) = match text.strip_prefix('-') {
        Some(rest) => (rest, SortDirection::Descending),
        None => (text, SortDirection::Ascending),
    };
    let mut chars = field.chars();
    let first = chars.next()?;
    if !first.is_ascii_alphabetic() {
        return None;
    }
    if !chars.all(|ch| ch.is_ascii_alphanumeric() || ch == '_' || ch == '.') {
        return None;
    }
    Some(SortOrder {
        field: field.to_string(),
        direction,
    })
}

// ============================================================================
// SECTION: Spec
// ============================================================================

/// Single-use spec for an optional sort token.
pub struct SortSpec<'a> {
    /// Context receiving messages.
    ctx: &'a mut ValidationContext,
    /// Display name used in messages.
    name: &'a str,
    /// Raw input value.
    value: Option<&'a str>,
    /// Default sort token and the reason it applies.
    default: Option<(&'a str, &'a str)>,
    /// Sortable field names.
    allowed_fields: Option<&'a [&'a str]>,
}

impl<'a> SortSpec<'a> {
    /// Creates a spec over `value`; prefer [`ValidationContext::sort_param`].
    pub const fn new(ctx: &'a mut ValidationContext, value: Option<&'a str>, name: &'a str) -> Self {
        Self {
            ctx,
            name,
            value,
            default: None,
            allowed_fields: None,
        }
    }

    /// Applies the sort token `value` when absent, warning with `reason`.
    #[must_use]
    pub const fn default_to(mut self, value: &'a str, reason: &'a str) -> Self {
        self.default = Some((value, reason));
        self
    }

    /// Restricts the field name to `fields`, matched case-insensitively.
    #[must_use]
    pub const fn allowed_fields(mut self, fields: &'a [&'a str]) -> Self {
        self.allowed_fields = Some(fields);
        self
    }

    /// Resolves the sort order.
    pub fn resolve(self) -> Option<SortOrder> {
        let text = match (non_blank(self.value), self.default) {
            (Some(text), _) => text,
            (None, Some((fallback, reason))) => {
                self.ctx.warning(format!(
                    "{} not specified, using default '{fallback}' ({reason})",
                    self.name
                ));
                fallback
            }
            (None, None) => return None,
        };
        let Some(mut order) = parse_sort(text) else {
            self.ctx.error(format!(
                "Invalid {} format '{text}'. Expected a field name optionally prefixed with '-' \
                 for descending order (e.g. 'name' or '-name')",
                self.name
            ));
            return None;
        };
        if let Some(fields) = self.allowed_fields {
            let Some(canonical) = canonicalize(&order.field, fields) else {
                self.ctx.error(format!(
                    "Invalid {} field '{}'. Valid fields: {}",
                    self.name,
                    order.field,
                    join_options(fields)
                ));
                return None;
            };
            order.field = canonical.to_string();
        }
        Some(order)
    }
}
