// crates/query-guard-tools/tests/search_tool.rs
// ============================================================================
// Module: Search Tool Tests
// Description: End-to-end search calls against a recording backend.
// Purpose: Prove the validation gate, normalization, and envelope contract.
// Dependencies: query-guard-core, query-guard-tools
// ============================================================================
//! ## Overview
//! Drives [`SearchTool`] through typed and JSON entry points.

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

mod common;

use std::collections::BTreeSet;

use common::CapturingAuditSink;
use common::MockSearchBackend;
use common::findings;
use query_guard_config::QueryGuardConfig;
use query_guard_core::ContractViolation;
use query_guard_core::NO_ITEMS_FOUND;
use query_guard_core::SortDirection;
use query_guard_tools::SearchRequest;
use query_guard_tools::SearchTool;
use query_guard_tools::Severity;
use query_guard_tools::ToolError;
use query_guard_tools::ToolOutcome;
use serde_json::json;

fn tool(backend: MockSearchBackend) -> SearchTool<MockSearchBackend> {
    SearchTool::new(backend)
}

// ============================================================================
// SECTION: Validation Gate
// ============================================================================

#[test]
fn invalid_filter_and_sort_are_both_reported_without_backend_call() {
    let audit = CapturingAuditSink::shared();
    let tool = tool(MockSearchBackend::returning(findings(3), Some(3))).with_audit(audit.clone());
    let request = SearchRequest {
        quick_filter: Some("INVALID_FILTER".to_string()),
        sort: Some("bad format!".to_string()),
        ..SearchRequest::default()
    };
    let response = tool.execute("app-1", &request).unwrap();
    assert!(!response.is_success());
    assert_eq!(response.errors().len(), 2);
    assert!(response.errors()[0].contains("INVALID_FILTER"));
    assert!(response.errors()[1].contains("bad format!"));
    assert!(response.items().is_empty());
    assert_eq!(response.total_items(), Some(0));
    assert!(!response.has_more_pages());
    assert!(tool.backend().calls().is_empty());

    let events = audit.events();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].outcome, ToolOutcome::Rejected);
    assert_eq!(events[0].error_count, 2);
}

#[test]
fn every_bad_parameter_is_aggregated() {
    let tool = tool(MockSearchBackend::returning(Vec::new(), None));
    let request = SearchRequest {
        quick_filter: Some("bogus".to_string()),
        severities: Some("HIGH,EXTREME".to_string()),
        statuses: Some("Reported,Lost".to_string()),
        sort: Some("-unknownField".to_string()),
        start_date: Some("2024-02-30".to_string()),
        end_date: Some("tomorrow".to_string()),
        metadata_filters: Some(json!({"branch": null})),
        ..SearchRequest::default()
    };
    let response = tool.execute("app-1", &request).unwrap();
    assert_eq!(response.errors().len(), 7);
    assert!(tool.backend().calls().is_empty());
}

#[test]
fn inverted_date_range_is_rejected() {
    let tool = tool(MockSearchBackend::returning(Vec::new(), None));
    let request = SearchRequest {
        start_date: Some("2024-06-01".to_string()),
        end_date: Some("2024-05-01".to_string()),
        ..SearchRequest::default()
    };
    let response = tool.execute("app-1", &request).unwrap();
    assert_eq!(response.errors().len(), 1);
    assert!(response.errors()[0].contains("startDate"));
    assert!(tool.backend().calls().is_empty());
}

#[test]
fn pagination_warnings_survive_rejection() {
    let tool = tool(MockSearchBackend::returning(Vec::new(), None));
    let request = SearchRequest {
        page: Some(0),
        sort: Some("bad format!".to_string()),
        ..SearchRequest::default()
    };
    let response = tool.execute("app-1", &request).unwrap();
    assert_eq!(response.errors().len(), 1);
    assert!(response.warnings().iter().any(|warning| warning.contains("Invalid page number 0")));
}

// ============================================================================
// SECTION: Normalized Query
// ============================================================================

#[test]
fn valid_request_reaches_backend_normalized() {
    let tool = tool(MockSearchBackend::returning(findings(10), Some(45)));
    let request = SearchRequest {
        quick_filter: Some("active".to_string()),
        keyword: Some("  injection ".to_string()),
        include_archived: Some(true),
        severities: Some("critical,High".to_string()),
        statuses: Some("reported, CONFIRMED".to_string()),
        page: Some(2),
        page_size: Some(10),
        sort: Some("-SEVERITY".to_string()),
        start_date: Some("2024-05-01".to_string()),
        end_date: Some("2024-05-31".to_string()),
        metadata_filters: Some(json!({"branch": ["main", "dev"]})),
    };
    let response = tool.execute(" app-1 ", &request).unwrap();
    assert!(response.is_success());
    assert!(response.has_more_pages());
    assert_eq!(response.items().len(), 10);
    assert!(response.duration_ms().is_some());

    let calls = tool.backend().calls();
    assert_eq!(calls.len(), 1);
    let query = &calls[0];
    assert_eq!(query.scope.as_str(), "app-1");
    assert_eq!(query.offset, 10);
    assert_eq!(query.limit, 10);
    let criteria = &query.criteria;
    assert_eq!(criteria.quick_filter, "ACTIVE");
    assert_eq!(criteria.keyword.as_deref(), Some("injection"));
    assert!(criteria.include_archived);
    assert!(!response.warnings().iter().any(|warning| warning.contains("includeArchived")));
    assert_eq!(criteria.severities, BTreeSet::from([Severity::Critical, Severity::High]));
    assert_eq!(criteria.statuses, vec!["Reported".to_string(), "Confirmed".to_string()]);
    assert_eq!(criteria.sort.field, "severity");
    assert_eq!(criteria.sort.direction, SortDirection::Descending);
    assert!(criteria.start.unwrap() < criteria.end.unwrap());
    assert_eq!(criteria.metadata_filters.len(), 1);
    assert_eq!(criteria.metadata_filters[0].field_name(), "branch");
}

#[test]
fn defaults_apply_with_warnings() {
    let tool = tool(MockSearchBackend::returning(findings(5), None));
    let response = tool.execute("app-1", &SearchRequest::default()).unwrap();
    assert!(response.is_success());
    assert_eq!(response.page(), 1);
    assert_eq!(response.page_size(), 50);
    assert!(!response.has_more_pages());
    assert!(response.warnings().iter().any(|warning| warning.contains("quickFilter")));
    assert!(response.warnings().iter().any(|warning| warning.contains("sort")));
    assert!(
        response
            .warnings()
            .iter()
            .any(|warning| warning.contains("includeArchived") && warning.contains("default false"))
    );

    let criteria = &tool.backend().calls()[0].criteria;
    assert_eq!(criteria.quick_filter, "ALL");
    assert_eq!(criteria.sort.field, "lastSeen");
    assert!(!criteria.include_archived);
    assert!(criteria.severities.is_empty());
    assert!(criteria.statuses.is_empty());
    assert!(criteria.metadata_filters.is_empty());
}

#[test]
fn metadata_filters_accept_string_encoding() {
    let tool = tool(MockSearchBackend::returning(Vec::new(), Some(0)));
    let request = SearchRequest {
        metadata_filters: Some(json!("{\"team\": \"payments\"}")),
        ..SearchRequest::default()
    };
    let response = tool.execute("app-1", &request).unwrap();
    assert!(response.is_success());
    let criteria = &tool.backend().calls()[0].criteria;
    assert_eq!(criteria.metadata_filters[0].values(), ["payments"]);
}

#[test]
fn full_page_without_total_sets_heuristic_flag() {
    let tool = tool(MockSearchBackend::returning(findings(50), None));
    let request = SearchRequest {
        page_size: Some(50),
        ..SearchRequest::default()
    };
    let response = tool.execute("app-1", &request).unwrap();
    assert!(response.has_more_pages());
    assert_eq!(response.total_items(), None);
}

#[test]
fn empty_first_page_is_success() {
    let tool = tool(MockSearchBackend::returning(Vec::new(), None));
    let response = tool.execute("app-1", &SearchRequest::default()).unwrap();
    assert!(response.is_success());
    assert!(response.warnings().iter().any(|warning| warning == NO_ITEMS_FOUND));
}

#[test]
fn configured_limits_govern_pagination() {
    let config =
        QueryGuardConfig::from_toml_str("[pagination]\ndefault_page_size = 5\nmax_page_size = 20\n").unwrap();
    let tool = tool(MockSearchBackend::returning(Vec::new(), None)).with_config(&config);
    let defaulted = tool.execute("app-1", &SearchRequest::default()).unwrap();
    assert_eq!(defaulted.page_size(), 5);
    let request = SearchRequest {
        page_size: Some(90),
        ..SearchRequest::default()
    };
    let clamped = tool.execute("app-1", &request).unwrap();
    assert_eq!(clamped.page_size(), 20);
    assert_eq!(tool.backend().calls()[1].limit, 20);
}

// ============================================================================
// SECTION: Tool Errors
// ============================================================================

#[test]
fn blank_scope_is_contract_violation() {
    let audit = CapturingAuditSink::shared();
    let tool = tool(MockSearchBackend::returning(Vec::new(), None)).with_audit(audit.clone());
    let err = tool.execute("   ", &SearchRequest::default()).unwrap_err();
    assert!(matches!(err, ToolError::Contract(ContractViolation::BlankIdentifier(ref name)) if name == "scope"));
    assert!(tool.backend().calls().is_empty());
    assert_eq!(audit.events()[0].outcome, ToolOutcome::ContractViolation);
    assert_eq!(audit.events()[0].scope, None);
}

#[test]
fn backend_failure_propagates() {
    let audit = CapturingAuditSink::shared();
    let tool = tool(MockSearchBackend::failing()).with_audit(audit.clone());
    let err = tool.execute("app-1", &SearchRequest::default()).unwrap_err();
    assert!(matches!(err, ToolError::Backend(_)));
    assert_eq!(tool.backend().calls().len(), 1);
    assert_eq!(audit.events()[0].outcome, ToolOutcome::BackendFailure);
}

// ============================================================================
// SECTION: JSON Entry Point
// ============================================================================

#[test]
fn handle_returns_camel_case_envelope() {
    let tool = tool(MockSearchBackend::returning(findings(2), Some(2)));
    let value = tool.handle("app-1", json!({"pageSize": 2, "statuses": "fixed"})).unwrap();
    assert_eq!(value["items"][0]["findingId"], "F-0");
    assert_eq!(value["pageSize"], 2);
    assert_eq!(value["totalItems"], 2);
    assert_eq!(value["hasMorePages"], false);
    assert_eq!(value["errors"], json!([]));
    assert!(value["durationMs"].is_u64());
}

#[test]
fn handle_rejects_unknown_and_mistyped_fields() {
    let audit = CapturingAuditSink::shared();
    let tool = tool(MockSearchBackend::returning(Vec::new(), None)).with_audit(audit.clone());
    let unknown = tool.handle("app-1", json!({"pagesize": 10})).unwrap_err();
    assert!(matches!(unknown, ToolError::InvalidParams(_)));
    let mistyped = tool.handle("app-1", json!({"page": "two"})).unwrap_err();
    assert!(matches!(mistyped, ToolError::InvalidParams(_)));
    assert!(tool.backend().calls().is_empty());
    let events = audit.events();
    assert_eq!(events.len(), 2);
    assert!(events.iter().all(|event| event.outcome == ToolOutcome::InvalidParams));
    assert_eq!(events[0].scope.as_deref(), Some("app-1"));
}

#[test]
fn handle_reports_validation_errors_in_envelope() {
    let tool = tool(MockSearchBackend::returning(Vec::new(), None));
    let value = tool.handle("app-1", json!({"quickFilter": "INVALID_FILTER", "sort": "bad format!"})).unwrap();
    assert_eq!(value["errors"].as_array().map(Vec::len), Some(2));
    assert_eq!(value["items"], json!([]));
    assert_eq!(value["totalItems"], 0);
}
