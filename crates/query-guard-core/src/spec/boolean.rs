// crates/query-guard-core/src/spec/boolean.rs
// ============================================================================
// Module: Boolean Spec
// Description: Defaulting for optional boolean flags.
// Purpose: Make implicit flag values visible to the caller.
// Dependencies: crate::context
// ============================================================================

//! ## Overview
//! Boolean flags cannot be malformed once decoded, so the only correction is
//! applying a default, which is reported as a warning.

use crate::context::ValidationContext;

/// Single-use spec for an optional boolean flag.
pub struct BoolSpec<'a> {
    /// Context receiving warnings.
    ctx: &'a mut ValidationContext,
    /// Display name used in messages.
    name: &'a str,
    /// Raw input value.
    value: Option<bool>,
    /// Default value and the reason it applies.
    default: Option<(bool, &'a str)>,
}

impl<'a> BoolSpec<'a> {
    /// Creates a spec over `value`; prefer [`ValidationContext::bool_param`].
    pub const fn new(ctx: &'a mut ValidationContext, value: Option<bool>, name: &'a str) -> Self {
        Self {
            ctx,
            name,
            value,
            default: None,
        }
    }

    /// Applies `value` when the flag is absent, warning with `reason`.
    #[must_use]
    pub const fn default_to(mut self, value: bool, reason: &'a str) -> Self {
        self.default = Some((value, reason));
        self
    }

    /// Resolves the flag.
    pub fn resolve(self) -> Option<bool> {
        match (self.value, self.default) {
            (Some(value), _) => Some(value),
            (None, Some((fallback, reason))) => {
                self.ctx.warning(format!(
                    "{} not specified, using default {fallback} ({reason})",
                    self.name
                ));
                Some(fallback)
            }
            (None, None) => None,
        }
    }
}
