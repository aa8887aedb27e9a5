// crates/query-guard-tools/tests/common/mod.rs
// ============================================================================
// Module: Common Test Fixtures
// Description: Mock backends and a capturing audit sink for tool tests.
// Purpose: Observe backend calls and audit events deterministically.
// Dependencies: query-guard-core, query-guard-tools
// ============================================================================

//! ## Overview
//! Backends record every query they receive so tests can prove the
//! validation gate kept invalid requests away from them.

#![allow(dead_code, reason = "Shared test helpers may be unused in some cases.")]
#![allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::unwrap_in_result,
    reason = "Test fixtures favor direct unwraps for setup clarity."
)]

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;
use std::sync::Arc;
use std::sync::Mutex;

use query_guard_core::FetchedPage;
use query_guard_tools::AuditSink;
use query_guard_tools::BackendError;
use query_guard_tools::LookupBackend;
use query_guard_tools::ScopeId;
use query_guard_tools::SearchBackend;
use query_guard_tools::SearchQuery;
use query_guard_tools::ToolAuditEvent;
use serde::Serialize;

// ============================================================================
// SECTION: Items
// ============================================================================

/// Finding returned by the mock backends.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Finding {
    /// Finding identifier.
    pub finding_id: String,
    /// Finding title.
    pub title: String,
}

/// Builds `count` findings with sequential identifiers.
pub fn findings(count: usize) -> Vec<Finding> {
    (0 .. count)
        .map(|index| Finding {
            finding_id: format!("F-{index}"),
            title: format!("Finding {index}"),
        })
        .collect()
}

// ============================================================================
// SECTION: Search Backend
// ============================================================================

/// Search backend returning a canned page and recording queries.
pub struct MockSearchBackend {
    /// Page returned on every call.
    page: FetchedPage<Finding>,
    /// Whether calls fail.
    fail: bool,
    /// Queries received.
    calls: Mutex<Vec<SearchQuery>>,
}

impl MockSearchBackend {
    /// Backend returning `items` with an optional total.
    pub fn returning(items: Vec<Finding>, total_items: Option<u64>) -> Self {
        Self {
            page: FetchedPage::new(items, total_items),
            fail: false,
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Backend whose calls always fail.
    pub fn failing() -> Self {
        Self {
            page: FetchedPage::new(Vec::new(), None),
            fail: true,
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Returns the queries received so far.
    pub fn calls(&self) -> Vec<SearchQuery> {
        self.calls.lock().unwrap().clone()
    }
}

impl SearchBackend for MockSearchBackend {
    type Item = Finding;

    fn search(&self, query: &SearchQuery) -> Result<FetchedPage<Finding>, BackendError> {
        self.calls.lock().unwrap().push(query.clone());
        if self.fail {
            return Err(BackendError::new("store unavailable"));
        }
        Ok(self.page.clone())
    }
}

// ============================================================================
// SECTION: Lookup Backend
// ============================================================================

/// Lookup backend over an in-memory map keyed by (scope, id).
pub struct MockLookupBackend {
    /// Stored findings.
    records: BTreeMap<(String, String), Finding>,
    /// Lookups received as (scope, id).
    calls: Mutex<Vec<(String, String)>>,
}

impl MockLookupBackend {
    /// Backend holding `findings` under `scope`.
    pub fn with_findings(scope: &str, findings: Vec<Finding>) -> Self {
        let records = findings
            .into_iter()
            .map(|finding| ((scope.to_string(), finding.finding_id.clone()), finding))
            .collect();
        Self {
            records,
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Returns the number of lookups received.
    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

impl LookupBackend for MockLookupBackend {
    type Item = Finding;

    fn lookup(&self, scope: &ScopeId, id: &str) -> Result<Option<Finding>, BackendError> {
        self.calls.lock().unwrap().push((scope.to_string(), id.to_string()));
        Ok(self.records.get(&(scope.to_string(), id.to_string())).cloned())
    }
}

// ============================================================================
// SECTION: Audit
// ============================================================================

/// Audit sink that keeps every event in memory.
#[derive(Default)]
pub struct CapturingAuditSink {
    /// Recorded events.
    events: Mutex<Vec<ToolAuditEvent>>,
}

impl CapturingAuditSink {
    /// Creates a shared sink.
    pub fn shared() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Returns the recorded events.
    pub fn events(&self) -> Vec<ToolAuditEvent> {
        self.events.lock().unwrap().clone()
    }
}

impl AuditSink for CapturingAuditSink {
    fn record(&self, event: &ToolAuditEvent) {
        self.events.lock().unwrap().push(event.clone());
    }
}
