// crates/query-guard-core/src/spec/string.rs
// ============================================================================
// Module: String Spec
// Description: Defaulting, required checks, and allowlists for strings.
// Purpose: Normalize single string parameters such as quick-filter tokens.
// Dependencies: crate::context
// ============================================================================

//! ## Overview
//! Blank input is treated as absent. A configured default fills absent input
//! with a warning; a `required` parameter that is still absent is an error.
//! When an allowlist is configured, a value outside it is an error naming
//! every valid option.

use crate::context::ValidationContext;
use crate::spec::join_options;
use crate::spec::non_blank;

/// Single-use spec for an optional string parameter.
pub struct StringSpec<'a> {
    /// Context receiving messages.
    ctx: &'a mut ValidationContext,
    /// Display name used in messages.
    name: &'a str,
    /// Raw input value.
    value: Option<&'a str>,
    /// Default value and the reason it applies.
    default: Option<(&'a str, &'a str)>,
    /// Exact values accepted after normalization.
    allowed: Option<&'a [&'a str]>,
    /// Whether an absent value is an error.
    required: bool,
    /// Whether to upper-case the value before checking it.
    upper_case: bool,
}

impl<'a> StringSpec<'a> {
    /// Creates a spec over `value`; prefer [`ValidationContext::string_param`].
    pub const fn new(ctx: &'a mut ValidationContext, value: Option<&'a str>, name: &'a str) -> Self {
        Self {
            ctx,
            name,
            value,
            default: None,
            allowed: None,
            required: false,
            upper_case: false,
        }
    }

    /// Applies `value` when the input is blank or absent, warning with `reason`.
    #[must_use]
    pub const fn default_to(mut self, value: &'a str, reason: &'a str) -> Self {
        self.default = Some((value, reason));
        self
    }

    /// Restricts the resolved value to `allowed`.
    #[must_use]
    pub const fn allowed_values(mut self, allowed: &'a [&'a str]) -> Self {
        self.allowed = Some(allowed);
        self
    }

    /// Records an error when no value (and no default) is available.
    #[must_use]
    pub const fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// Upper-cases the value before the allowlist check.
    #[must_use]
    pub const fn uppercase(mut self) -> Self {
        self.upper_case = true;
        self
    }

    /// Resolves the value.
    pub fn resolve(self) -> Option<String> {
        let resolved = match (non_blank(self.value), self.default) {
            (Some(value), _) => self.normalize(value),
            (None, Some((fallback, reason))) => {
                let fallback = self.normalize(fallback);
                self.ctx.warning(format!(
                    "{} not specified, using default '{fallback}' ({reason})",
                    self.name
                ));
                fallback
            }
            (None, None) => {
                if self.required {
                    self.ctx.error(format!("{} is required", self.name));
                }
                return None;
            }
        };
        if let Some(allowed) = self.allowed
            && !allowed.contains(&resolved.as_str())
        {
            self.ctx.error(format!(
                "Invalid {} '{resolved}'. Valid options: {}",
                self.name,
                join_options(allowed)
            ));
            return None;
        }
        Some(resolved)
    }

    /// Applies configured case folding.
    fn normalize(&self, value: &str) -> String {
        if self.upper_case { value.to_uppercase() } else { value.to_string() }
    }
}
