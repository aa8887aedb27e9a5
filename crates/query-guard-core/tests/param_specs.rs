// crates/query-guard-core/tests/param_specs.rs
// ============================================================================
// Module: Parameter Spec Tests
// Description: Tests for integer, boolean, list, enum, date, and sort specs.
// Purpose: Pin per-type defaulting, clamping, and rejection policy.
// ============================================================================

//! Parameter spec tests.

#![allow(
    clippy::panic,
    clippy::print_stdout,
    clippy::print_stderr,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::use_debug,
    clippy::dbg_macro,
    clippy::panic_in_result_fn,
    clippy::unwrap_in_result,
    reason = "Test-only output and panic-based assertions are permitted."
)]

use std::collections::BTreeSet;

use query_guard_core::NamedConstant;
use query_guard_core::SortDirection;
use query_guard_core::SortOrder;
use query_guard_core::ValidationContext;
use query_guard_core::parse_date_bound;
use query_guard_core::parse_sort;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum Level {
    Critical,
    High,
    Low,
}

impl NamedConstant for Level {
    const ALL: &'static [Self] = &[Self::Critical, Self::High, Self::Low];

    fn as_str(self) -> &'static str {
        match self {
            Self::Critical => "CRITICAL",
            Self::High => "HIGH",
            Self::Low => "LOW",
        }
    }
}

const STATUSES: &[&str] = &["Reported", "Suspicious", "Confirmed", "Fixed"];

// ============================================================================
// SECTION: Integer
// ============================================================================

#[test]
fn integer_default_applies_with_reason() {
    let mut ctx = ValidationContext::new();
    let value = ctx.int_param(None, "limit").default_to(25, "typical page").resolve();
    assert_eq!(value, Some(25));
    assert_eq!(ctx.warnings().len(), 1);
    assert!(ctx.warnings()[0].contains("typical page"));
}

#[test]
fn integer_clamps_high_and_low_without_errors() {
    let mut ctx = ValidationContext::new();
    let high = ctx.int_param(Some(500), "pageSize").range(1, 100).resolve();
    let low = ctx.int_param(Some(-3), "pageSize").range(1, 100).resolve();
    assert_eq!(high, Some(100));
    assert_eq!(low, Some(1));
    assert!(ctx.is_valid());
    assert_eq!(ctx.warnings()[0], "pageSize clamped from 500 to maximum 100");
    assert_eq!(ctx.warnings()[1], "pageSize clamped from -3 to minimum 1");
}

#[test]
fn integer_in_range_is_untouched() {
    let mut ctx = ValidationContext::new();
    assert_eq!(ctx.int_param(Some(42), "n").range(1, 100).resolve(), Some(42));
    assert!(ctx.warnings().is_empty());
}

#[test]
fn integer_reversed_range_is_reordered() {
    let mut ctx = ValidationContext::new();
    assert_eq!(ctx.int_param(Some(0), "n").range(10, 5).resolve(), Some(5));
}

#[test]
fn integer_absent_without_default_is_none() {
    let mut ctx = ValidationContext::new();
    assert_eq!(ctx.int_param(None, "n").range(1, 5).resolve(), None);
    assert!(ctx.warnings().is_empty());
}

// ============================================================================
// SECTION: Boolean
// ============================================================================

#[test]
fn boolean_default_is_reported() {
    let mut ctx = ValidationContext::new();
    assert_eq!(ctx.bool_param(None, "includeArchived").default_to(false, "hide old").resolve(), Some(false));
    assert_eq!(ctx.bool_param(Some(true), "includeArchived").default_to(false, "hide old").resolve(), Some(true));
    assert_eq!(ctx.warnings().len(), 1);
}

// ============================================================================
// SECTION: String List
// ============================================================================

#[test]
fn list_splits_trims_and_drops_empty_tokens() {
    let mut ctx = ValidationContext::new();
    let values = ctx.string_list_param(Some(" a, ,b ,, c"), "tags").resolve();
    assert_eq!(values, Some(vec!["a".to_string(), "b".to_string(), "c".to_string()]));
    assert!(ctx.warnings().is_empty());
}

#[test]
fn list_canonicalizes_case_with_warning() {
    let mut ctx = ValidationContext::new();
    let values =
        ctx.string_list_param(Some("reported,CONFIRMED"), "statuses").allowed_values(STATUSES).resolve();
    assert_eq!(values, Some(vec!["Reported".to_string(), "Confirmed".to_string()]));
    assert!(ctx.is_valid());
    assert_eq!(ctx.warnings().len(), 2);
}

#[test]
fn list_canonicalization_is_idempotent() {
    let mut ctx = ValidationContext::new();
    let first = ctx.string_list_param(Some("reported"), "statuses").allowed_values(STATUSES).resolve();
    let joined = first.clone().unwrap().join(",");
    let mut again = ValidationContext::new();
    let second = again.string_list_param(Some(joined.as_str()), "statuses").allowed_values(STATUSES).resolve();
    assert_eq!(first, second);
    assert!(again.warnings().is_empty());
}

#[test]
fn list_reports_one_error_per_bad_token() {
    let mut ctx = ValidationContext::new();
    let values =
        ctx.string_list_param(Some("Reported,bogus,Fixed,other"), "statuses").allowed_values(STATUSES).resolve();
    assert_eq!(values, None);
    assert_eq!(ctx.errors().len(), 2);
    assert!(ctx.errors()[0].contains("bogus"));
    assert!(ctx.errors()[1].contains("other"));
    for status in STATUSES {
        assert!(ctx.errors()[0].contains(status));
    }
}

#[test]
fn list_default_applies_when_no_tokens() {
    let mut ctx = ValidationContext::new();
    let values =
        ctx.string_list_param(Some(" , "), "statuses").default_to(&["Reported"], "open items").resolve();
    assert_eq!(values, Some(vec!["Reported".to_string()]));
    assert_eq!(ctx.warnings().len(), 1);
}

#[test]
fn list_collapses_duplicates() {
    let mut ctx = ValidationContext::new();
    let values = ctx.string_list_param(Some("Fixed,fixed"), "statuses").allowed_values(STATUSES).resolve();
    assert_eq!(values, Some(vec!["Fixed".to_string()]));
}

// ============================================================================
// SECTION: Enumerated Set
// ============================================================================

#[test]
fn enum_set_parses_case_insensitively() {
    let mut ctx = ValidationContext::new();
    let set = ctx.enum_set_param::<Level>(Some("critical, HIGH"), "severities").resolve();
    assert_eq!(set, Some(BTreeSet::from([Level::Critical, Level::High])));
    assert!(ctx.is_valid());
    assert_eq!(ctx.warnings().len(), 1);
}

#[test]
fn enum_set_errors_name_token_and_all_constants() {
    let mut ctx = ValidationContext::new();
    let set = ctx.enum_set_param::<Level>(Some("HIGH,EXTREME,MEDIUM"), "severities").resolve();
    assert_eq!(set, None);
    assert_eq!(ctx.errors().len(), 2);
    assert!(ctx.errors()[0].contains("EXTREME"));
    assert!(ctx.errors()[1].contains("MEDIUM"));
    for level in Level::ALL {
        assert!(ctx.errors()[0].contains(level.as_str()));
    }
}

#[test]
fn enum_set_default_applies_when_absent() {
    let mut ctx = ValidationContext::new();
    let set = ctx.enum_set_param::<Level>(None, "severities").default_to(&[Level::Critical], "focus").resolve();
    assert_eq!(set, Some(BTreeSet::from([Level::Critical])));
    assert_eq!(ctx.warnings().len(), 1);
}

// ============================================================================
// SECTION: Date
// ============================================================================

#[test]
fn date_parses_calendar_and_epoch_forms() {
    let start = parse_date_bound("2024-05-01", false).unwrap();
    assert_eq!(start.unix_timestamp(), 1_714_521_600);
    let end = parse_date_bound("2024-05-01", true).unwrap();
    assert_eq!(end.unix_timestamp(), 1_714_521_600 + 86_399);
    let epoch = parse_date_bound("1714521600000", false).unwrap();
    assert_eq!(epoch, start);
    assert!(parse_date_bound("-1000", false).is_some());
}

#[test]
fn date_rejects_malformed_input() {
    for raw in ["2024-13-01", "05/01/2024", "yesterday", "-", "2024-5-1x"] {
        assert!(parse_date_bound(raw, false).is_none(), "accepted {raw}");
    }
    let mut ctx = ValidationContext::new();
    assert_eq!(ctx.date_param(Some("yesterday"), "startDate").resolve(), None);
    assert_eq!(ctx.errors().len(), 1);
    assert!(ctx.errors()[0].contains("YYYY-MM-DD"));
    assert!(ctx.errors()[0].contains("yesterday"));
}

#[test]
fn date_blank_is_absent() {
    let mut ctx = ValidationContext::new();
    assert_eq!(ctx.date_param(Some(" "), "startDate").resolve(), None);
    assert!(ctx.is_valid());
}

// ============================================================================
// SECTION: Sort
// ============================================================================

#[test]
fn sort_parses_direction_prefix() {
    assert_eq!(
        parse_sort("-lastSeen"),
        Some(SortOrder {
            field: "lastSeen".to_string(),
            direction: SortDirection::Descending,
        })
    );
    assert_eq!(parse_sort("severity").map(|order| order.direction), Some(SortDirection::Ascending));
    assert!(parse_sort("app.name_2").is_some());
}

#[test]
fn sort_rejects_malformed_tokens() {
    for raw in ["bad format!", "-", "--name", "1field", "na me", ""] {
        assert!(parse_sort(raw).is_none(), "accepted {raw}");
    }
    let mut ctx = ValidationContext::new();
    assert_eq!(ctx.sort_param(Some("bad format!"), "sort").resolve(), None);
    assert_eq!(ctx.errors().len(), 1);
    assert!(ctx.errors()[0].contains("bad format!"));
}

#[test]
fn sort_allowlist_canonicalizes_field() {
    let mut ctx = ValidationContext::new();
    let order =
        ctx.sort_param(Some("-SEVERITY"), "sort").allowed_fields(&["severity", "lastSeen"]).resolve();
    assert_eq!(
        order,
        Some(SortOrder {
            field: "severity".to_string(),
            direction: SortDirection::Descending,
        })
    );
    let rejected = ctx.sort_param(Some("title"), "sort").allowed_fields(&["severity", "lastSeen"]).resolve();
    assert_eq!(rejected, None);
    assert!(ctx.errors()[0].contains("lastSeen"));
}

#[test]
fn sort_default_applies_with_warning() {
    let mut ctx = ValidationContext::new();
    let order = ctx.sort_param(None, "sort").default_to("-lastSeen", "newest first").resolve();
    assert_eq!(order.map(|order| order.field), Some("lastSeen".to_string()));
    assert_eq!(ctx.warnings().len(), 1);
}
