// crates/query-guard-core/src/context.rs
// ============================================================================
// Module: Validation Context
// Description: Request-scoped accumulator for validation errors and warnings.
// Purpose: Provide the single validity gate shared by all parameter specs.
// Dependencies: time
// ============================================================================

//! ## Overview
//! A [`ValidationContext`] is created once per inbound tool call. Parameter
//! specs borrow it mutably, append messages while resolving, and are dropped.
//! The caller then consults [`ValidationContext::is_valid`] before invoking any
//! downstream fetch.
//!
//! ## Invariants
//! - `is_valid() == errors().is_empty()`.
//! - Messages are append-only; once an error is recorded validity never returns.
//! - Message order matches the order in which specs were resolved.

// ============================================================================
// SECTION: Imports
// ============================================================================

use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;

use crate::metadata::MetadataFilterLimits;
use crate::spec::BoolSpec;
use crate::spec::DateSpec;
use crate::spec::EnumSetSpec;
use crate::spec::IntSpec;
use crate::spec::MetadataFilterSpec;
use crate::spec::NamedConstant;
use crate::spec::SortSpec;
use crate::spec::StringListSpec;
use crate::spec::StringSpec;

// ============================================================================
// SECTION: Context
// ============================================================================

/// Request-scoped accumulator of validation errors and warnings.
///
/// # Invariants
/// - Errors and warnings are kept as two independent ordered lists.
/// - There is no API to remove a message.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationContext {
    /// Fatal, caller-correctable problems.
    errors: Vec<String>,
    /// Non-fatal notices about applied defaults and corrections.
    warnings: Vec<String>,
}

/// Owned messages drained from a finished [`ValidationContext`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationMessages {
    /// Recorded errors in resolution order.
    pub errors: Vec<String>,
    /// Recorded warnings in resolution order.
    pub warnings: Vec<String>,
}

impl ValidationContext {
    /// Creates an empty, valid context.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            errors: Vec::new(),
            warnings: Vec::new(),
        }
    }

    /// Records a fatal error. The context is invalid from this point on.
    pub fn error(&mut self, message: impl Into<String>) {
        self.errors.push(message.into());
    }

    /// Records a non-fatal warning.
    pub fn warning(&mut self, message: impl Into<String>) {
        self.warnings.push(message.into());
    }

    /// Appends warnings produced outside of a spec (for example pagination).
    pub fn extend_warnings<I>(&mut self, warnings: I)
    where
        I: IntoIterator<Item = String>,
    {
        self.warnings.extend(warnings);
    }

    /// Returns true when no error has ever been recorded.
    #[must_use]
    pub const fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// Returns the recorded errors.
    #[must_use]
    pub fn errors(&self) -> &[String] {
        &self.errors
    }

    /// Returns the recorded warnings.
    #[must_use]
    pub fn warnings(&self) -> &[String] {
        &self.warnings
    }

    /// Consumes the context and returns its messages.
    #[must_use]
    pub fn into_messages(self) -> ValidationMessages {
        ValidationMessages {
            errors: self.errors,
            warnings: self.warnings,
        }
    }

    // ------------------------------------------------------------------------
    // Spec factories
    // ------------------------------------------------------------------------

    /// Starts an integer parameter spec.
    pub fn int_param<'a>(&'a mut self, value: Option<i64>, name: &'a str) -> IntSpec<'a> {
        IntSpec::new(self, value, name)
    }

    /// Starts a boolean flag spec.
    pub fn bool_param<'a>(&'a mut self, value: Option<bool>, name: &'a str) -> BoolSpec<'a> {
        BoolSpec::new(self, value, name)
    }

    /// Starts a single string parameter spec.
    pub fn string_param<'a>(
        &'a mut self,
        value: Option<&'a str>,
        name: &'a str,
    ) -> StringSpec<'a> {
        StringSpec::new(self, value, name)
    }

    /// Starts a comma-separated string list spec.
    pub fn string_list_param<'a>(
        &'a mut self,
        value: Option<&'a str>,
        name: &'a str,
    ) -> StringListSpec<'a> {
        StringListSpec::new(self, value, name)
    }

    /// Starts a comma-separated enumerated set spec over `E`.
    pub fn enum_set_param<'a, E: NamedConstant>(
        &'a mut self,
        value: Option<&'a str>,
        name: &'a str,
    ) -> EnumSetSpec<'a, E> {
        EnumSetSpec::new(self, value, name)
    }

    /// Starts a date parameter spec (`YYYY-MM-DD` or epoch milliseconds).
    pub fn date_param<'a>(&'a mut self, value: Option<&'a str>, name: &'a str) -> DateSpec<'a> {
        DateSpec::new(self, value, name)
    }

    /// Starts a sort token spec (`field` or `-field`).
    pub fn sort_param<'a>(&'a mut self, value: Option<&'a str>, name: &'a str) -> SortSpec<'a> {
        SortSpec::new(self, value, name)
    }

    /// Starts a JSON metadata filter spec using default limits.
    pub fn metadata_filter_param<'a>(
        &'a mut self,
        value: Option<&'a str>,
        name: &'a str,
    ) -> MetadataFilterSpec<'a> {
        MetadataFilterSpec::new(self, value, name, MetadataFilterLimits::default())
    }

    // ------------------------------------------------------------------------
    // Cross-field checks
    // ------------------------------------------------------------------------

    /// Records an error when both bounds are present and `start` is after `end`.
    pub fn check_date_range(
        &mut self,
        start: Option<OffsetDateTime>,
        end: Option<OffsetDateTime>,
        start_name: &str,
        end_name: &str,
    ) {
        if let (Some(start), Some(end)) = (start, end)
            && start > end
        {
            self.error(format!(
                "{start_name} ({}) must not be after {end_name} ({})",
                render_instant(start),
                render_instant(end)
            ));
        }
    }
}

/// Renders an instant for inclusion in a message.
fn render_instant(instant: OffsetDateTime) -> String {
    instant.format(&Rfc3339).unwrap_or_else(|_| instant.unix_timestamp().to_string())
}
