// crates/query-guard-core/src/spec/enum_set.rs
// ============================================================================
// Module: Enumerated Set Spec
// Description: Case-insensitive parsing of comma-separated named constants.
// Purpose: Convert severity-style lists into a typed set.
// Dependencies: crate::context, crate::spec::NamedConstant
// ============================================================================

//! ## Overview
//! Tokens are matched against [`NamedConstant::ALL`] ignoring case. Every
//! unrecognized token yields its own error listing all valid names, so a
//! caller sees every mistake in one round trip.

use std::collections::BTreeSet;
use std::marker::PhantomData;

use crate::context::ValidationContext;
use crate::spec::NamedConstant;
use crate::spec::list::split_tokens;

/// Single-use spec for a comma-separated set of `E` constants.
pub struct EnumSetSpec<'a, E: NamedConstant> {
    /// Context receiving messages.
    ctx: &'a mut ValidationContext,
    /// Display name used in messages.
    name: &'a str,
    /// Raw comma-separated input.
    value: Option<&'a str>,
    /// Default constants and the reason they apply.
    default: Option<(&'a [E], &'a str)>,
    /// Marker for the constant type.
    marker: PhantomData<E>,
}

impl<'a, E: NamedConstant> EnumSetSpec<'a, E> {
    /// Creates a spec over `value`; prefer [`ValidationContext::enum_set_param`].
    pub const fn new(ctx: &'a mut ValidationContext, value: Option<&'a str>, name: &'a str) -> Self {
        Self {
            ctx,
            name,
            value,
            default: None,
            marker: PhantomData,
        }
    }

    /// Applies `values` when the input has no tokens, warning with `reason`.
    #[must_use]
    pub const fn default_to(mut self, values: &'a [E], reason: &'a str) -> Self {
        self.default = Some((values, reason));
        self
    }

    /// Resolves the set. Returns `None` when any token was rejected.
    pub fn resolve(self) -> Option<BTreeSet<E>> {
        let tokens = self.value.map(split_tokens).unwrap_or_default();
        if tokens.is_empty() {
            let (values, reason) = self.default?;
            let names: Vec<&str> = values.iter().map(|value| value.as_str()).collect();
            self.ctx.warning(format!(
                "{} not specified, using default [{}] ({reason})",
                self.name,
                names.join(", ")
            ));
            return Some(values.iter().copied().collect());
        }
        let mut resolved = BTreeSet::new();
        let mut rejected = false;
        for token in tokens {
            if let Some(constant) = E::from_name(token) {
                if constant.as_str() != token {
                    self.ctx.warning(format!(
                        "{} value '{token}' normalized to '{}'",
                        self.name,
                        constant.as_str()
                    ));
                }
                resolved.insert(constant);
            } else {
                rejected = true;
                self.ctx.error(format!(
                    "Invalid {} value '{token}'. Valid options: {}",
                    self.name,
                    valid_names::<E>()
                ));
            }
        }
        if rejected { None } else { Some(resolved) }
    }
}

/// Lists every canonical name of `E`.
fn valid_names<E: NamedConstant>() -> String {
    E::ALL.iter().map(|constant| constant.as_str()).collect::<Vec<_>>().join(", ")
}
