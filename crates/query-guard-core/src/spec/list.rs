// crates/query-guard-core/src/spec/list.rs
// ============================================================================
// Module: String List Spec
// Description: Comma-separated list parsing with case-insensitive allowlists.
// Purpose: Normalize status/type style list parameters to canonical tokens.
// Dependencies: crate::context
// ============================================================================

//! ## Overview
//! Input is split on commas, tokens are trimmed, and empty tokens dropped.
//! With an allowlist configured each token maps case-insensitively to its
//! canonical spelling; a case change is reported as a warning and an
//! unmappable token as one error per token. Duplicates after
//! canonicalization are collapsed, keeping first-seen order.

use crate::context::ValidationContext;
use crate::spec::canonicalize;
use crate::spec::join_options;

/// Splits a comma-separated value into trimmed, non-empty tokens.
#[must_use]
pub fn split_tokens(value: &str) -> Vec<&str> {
    value.split(',').map(str::trim).filter(|token| !token.is_empty()).collect()
}

/// Single-use spec for a comma-separated string list.
pub struct StringListSpec<'a> {
    /// Context receiving messages.
    ctx: &'a mut ValidationContext,
    /// Display name used in messages.
    name: &'a str,
    /// Raw comma-separated input.
    value: Option<&'a str>,
    /// Default tokens and the reason they apply.
    default: Option<(&'a [&'a str], &'a str)>,
    /// Canonical tokens accepted.
    allowed: Option<&'a [&'a str]>,
}

impl<'a> StringListSpec<'a> {
    /// Creates a spec over `value`; prefer [`ValidationContext::string_list_param`].
    pub const fn new(ctx: &'a mut ValidationContext, value: Option<&'a str>, name: &'a str) -> Self {
        Self {
            ctx,
            name,
            value,
            default: None,
            allowed: None,
        }
    }

    /// Applies `values` when the input has no tokens, warning with `reason`.
    #[must_use]
    pub const fn default_to(mut self, values: &'a [&'a str], reason: &'a str) -> Self {
        self.default = Some((values, reason));
        self
    }

    /// Restricts tokens to `allowed`, matched case-insensitively.
    #[must_use]
    pub const fn allowed_values(mut self, allowed: &'a [&'a str]) -> Self {
        self.allowed = Some(allowed);
        self
    }

    /// Resolves the list. Returns `None` when any token was rejected.
    pub fn resolve(self) -> Option<Vec<String>> {
        let tokens = self.value.map(split_tokens).unwrap_or_default();
        if tokens.is_empty() {
            let (values, reason) = self.default?;
            self.ctx.warning(format!(
                "{} not specified, using default [{}] ({reason})",
                self.name,
                join_options(values)
            ));
            return Some(values.iter().map(|value| (*value).to_string()).collect());
        }
        let Some(allowed) = self.allowed else {
            return Some(dedup(tokens.into_iter().map(str::to_string)));
        };
        let mut resolved = Vec::with_capacity(tokens.len());
        let mut rejected = false;
        for token in tokens {
            match canonicalize(token, allowed) {
                Some(canonical) => {
                    if canonical != token {
                        self.ctx.warning(format!(
                            "{} value '{token}' normalized to '{canonical}'",
                            self.name
                        ));
                    }
                    resolved.push(canonical.to_string());
                }
                None => {
                    rejected = true;
                    self.ctx.error(format!(
                        "Invalid {} value '{token}'. Valid options: {}",
                        self.name,
                        join_options(allowed)
                    ));
                }
            }
        }
        if rejected { None } else { Some(dedup(resolved)) }
    }
}

/// Removes repeated tokens while preserving first-seen order.
fn dedup(tokens: impl IntoIterator<Item = String>) -> Vec<String> {
    let mut unique: Vec<String> = Vec::new();
    for token in tokens {
        if !unique.contains(&token) {
            unique.push(token);
        }
    }
    unique
}
