// crates/query-guard-core/src/spec/integer.rs
// ============================================================================
// Module: Integer Spec
// Description: Defaulting and range clamping for integer parameters.
// Purpose: Self-correct numeric inputs without ever failing the request.
// Dependencies: crate::context
// ============================================================================

//! ## Overview
//! Integer inputs are always self-correcting: a missing value takes the
//! configured default and an out-of-range value is clamped to the nearest
//! bound. Both corrections are reported as warnings; this spec never records
//! an error.

use crate::context::ValidationContext;

/// Single-use spec for an optional integer parameter.
pub struct IntSpec<'a> {
    /// Context receiving warnings.
    ctx: &'a mut ValidationContext,
    /// Display name used in messages.
    name: &'a str,
    /// Raw input value.
    value: Option<i64>,
    /// Default value and the reason it applies.
    default: Option<(i64, &'a str)>,
    /// Inclusive `(min, max)` bounds.
    range: Option<(i64, i64)>,
}

impl<'a> IntSpec<'a> {
    /// Creates a spec over `value`; prefer [`ValidationContext::int_param`].
    pub const fn new(ctx: &'a mut ValidationContext, value: Option<i64>, name: &'a str) -> Self {
        Self {
            ctx,
            name,
            value,
            default: None,
            range: None,
        }
    }

    /// Applies `value` when the input is absent, warning with `reason`.
    #[must_use]
    pub const fn default_to(mut self, value: i64, reason: &'a str) -> Self {
        self.default = Some((value, reason));
        self
    }

    /// Clamps the resolved value into `[min, max]`.
    ///
    /// Reversed bounds are reordered.
    #[must_use]
    pub fn range(mut self, min: i64, max: i64) -> Self {
        self.range = Some((min.min(max), min.max(max)));
        self
    }

    /// Resolves the value, recording a warning for every correction.
    pub fn resolve(self) -> Option<i64> {
        let value = match (self.value, self.default) {
            (Some(value), _) => value,
            (None, Some((fallback, reason))) => {
                self.ctx.warning(format!(
                    "{} not specified, using default {fallback} ({reason})",
                    self.name
                ));
                fallback
            }
            (None, None) => return None,
        };
        let Some((min, max)) = self.range else {
            return Some(value);
        };
        if value < min {
            self.ctx.warning(format!("{} clamped from {value} to minimum {min}", self.name));
            return Some(min);
        }
        if value > max {
            self.ctx.warning(format!("{} clamped from {value} to maximum {max}", self.name));
            return Some(max);
        }
        Some(value)
    }
}
