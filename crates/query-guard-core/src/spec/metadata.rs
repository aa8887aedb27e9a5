// crates/query-guard-core/src/spec/metadata.rs
// ============================================================================
// Module: Metadata Filter Spec
// Description: Spec wrapper over metadata filter parsing.
// Purpose: Feed metadata filter problems into the validation context.
// Dependencies: crate::context, crate::metadata
// ============================================================================

//! Routes metadata filter parse failures onto the validation context.

use crate::context::ValidationContext;
use crate::metadata::MetadataFilterLimits;
use crate::metadata::UnresolvedMetadataFilter;
use crate::metadata::parse_metadata_filters;
use crate::spec::non_blank;

/// Single-use spec for a JSON metadata filter payload.
pub struct MetadataFilterSpec<'a> {
    /// Context receiving messages.
    ctx: &'a mut ValidationContext,
    /// Display name used in messages.
    name: &'a str,
    /// Raw JSON payload.
    value: Option<&'a str>,
    /// Payload size bounds.
    limits: MetadataFilterLimits,
}

impl<'a> MetadataFilterSpec<'a> {
    /// Creates a spec over `value`; prefer [`ValidationContext::metadata_filter_param`].
    pub const fn new(
        ctx: &'a mut ValidationContext,
        value: Option<&'a str>,
        name: &'a str,
        limits: MetadataFilterLimits,
    ) -> Self {
        Self {
            ctx,
            name,
            value,
            limits,
        }
    }

    /// Overrides the payload size bounds.
    #[must_use]
    pub const fn limits(mut self, limits: MetadataFilterLimits) -> Self {
        self.limits = limits;
        self
    }

    /// Resolves the filters. Absent or blank payloads resolve to `None`.
    pub fn resolve(self) -> Option<Vec<UnresolvedMetadataFilter>> {
        let payload = non_blank(self.value)?;
        match parse_metadata_filters(self.name, payload, &self.limits) {
            Ok(filters) => Some(filters),
            Err(errors) => {
                for error in errors {
                    self.ctx.error(error);
                }
                None
            }
        }
    }
}
