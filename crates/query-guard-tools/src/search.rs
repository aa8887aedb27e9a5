// crates/query-guard-tools/src/search.rs
// ============================================================================
// Module: Search Tool
// Description: Paginated finding search over a pluggable backend.
// Purpose: Normalize every search parameter before the backend sees it.
// Dependencies: query-guard-core, query-guard-config, serde, serde_json, time
// ============================================================================

//! ## Overview
//! [`SearchTool`] is the end-to-end path for a search-style call: contract
//! check on the scope, pagination normalization, per-parameter specs on one
//! [`ValidationContext`], the validity gate, the backend fetch, and envelope
//! assembly. All parameter problems are aggregated; none short-circuits.
//!
//! ## Invariants
//! - The backend is never called when the context holds an error.
//! - Backend failures are returned as [`ToolError::Backend`] without retry.
//! - Exactly one audit event is recorded per call.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeSet;
use std::sync::Arc;
use std::time::Instant;

use query_guard_config::QueryGuardConfig;
use query_guard_core::FetchedPage;
use query_guard_core::MetadataFilterLimits;
use query_guard_core::NamedConstant;
use query_guard_core::PaginatedResponse;
use query_guard_core::PaginationLimits;
use query_guard_core::PaginationParams;
use query_guard_core::SortDirection;
use query_guard_core::SortOrder;
use query_guard_core::UnresolvedMetadataFilter;
use query_guard_core::ValidationContext;
use query_guard_core::ValidationMessages;
use serde::Deserialize;
use serde::Serialize;
use serde_json::Value;
use time::OffsetDateTime;

use crate::audit::AuditSink;
use crate::audit::NoopAuditSink;
use crate::audit::ToolAuditEvent;
use crate::audit::ToolAuditEventParams;
use crate::audit::ToolOutcome;
use crate::codec::decode;
use crate::codec::elapsed_ms;
use crate::codec::encode;
use crate::error::BackendError;
use crate::error::ToolError;
use crate::scope::ScopeId;

// ============================================================================
// SECTION: Vocabulary
// ============================================================================

/// Tool name used in audit events.
const TOOL_NAME: &str = "search_findings";

/// Accepted quick filters, matched after uppercasing.
pub const QUICK_FILTERS: &[&str] = &["ALL", "ACTIVE", "NEW", "EFFECTIVE", "CLOSED"];

/// Canonical finding statuses.
pub const STATUSES: &[&str] =
    &["Reported", "Suspicious", "Confirmed", "Remediated", "NotAProblem", "Fixed"];

/// Fields the backend can sort on.
pub const SORT_FIELDS: &[&str] = &["severity", "status", "title", "firstSeen", "lastSeen"];

/// Quick filter applied when none is requested.
const DEFAULT_QUICK_FILTER: &str = "ALL";

/// Sort applied when none is requested.
const DEFAULT_SORT: &str = "-lastSeen";

/// Finding severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Severity {
    /// Exploitable with severe impact.
    Critical,
    /// Exploitable with significant impact.
    High,
    /// Limited impact.
    Medium,
    /// Minor impact.
    Low,
    /// Informational only.
    Note,
}

impl NamedConstant for Severity {
    const ALL: &'static [Self] = &[Self::Critical, Self::High, Self::Medium, Self::Low, Self::Note];

    fn as_str(self) -> &'static str {
        match self {
            Self::Critical => "CRITICAL",
            Self::High => "HIGH",
            Self::Medium => "MEDIUM",
            Self::Low => "LOW",
            Self::Note => "NOTE",
        }
    }
}

// ============================================================================
// SECTION: Request
// ============================================================================

/// Raw search parameters as supplied by the caller.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct SearchRequest {
    /// Preset filter token.
    #[serde(default)]
    pub quick_filter: Option<String>,
    /// Free-text keyword.
    #[serde(default)]
    pub keyword: Option<String>,
    /// Whether archived findings are included.
    #[serde(default)]
    pub include_archived: Option<bool>,
    /// Comma-separated severities.
    #[serde(default)]
    pub severities: Option<String>,
    /// Comma-separated statuses.
    #[serde(default)]
    pub statuses: Option<String>,
    /// One-based page number.
    #[serde(default)]
    pub page: Option<i64>,
    /// Items per page.
    #[serde(default)]
    pub page_size: Option<i64>,
    /// Sort token (`field` or `-field`).
    #[serde(default)]
    pub sort: Option<String>,
    /// Inclusive lower date bound.
    #[serde(default)]
    pub start_date: Option<String>,
    /// Inclusive upper date bound.
    #[serde(default)]
    pub end_date: Option<String>,
    /// Metadata filters as a JSON object or its string encoding.
    #[serde(default)]
    pub metadata_filters: Option<Value>,
}

// ============================================================================
// SECTION: Normalized Query
// ============================================================================

/// Normalized search criteria handed to the backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchCriteria {
    /// Canonical quick filter.
    pub quick_filter: String,
    /// Trimmed keyword, when supplied.
    pub keyword: Option<String>,
    /// Whether archived findings are included.
    pub include_archived: bool,
    /// Severities to match; empty means any.
    pub severities: BTreeSet<Severity>,
    /// Canonical statuses to match; empty means any.
    pub statuses: Vec<String>,
    /// Sort order.
    pub sort: SortOrder,
    /// Inclusive lower bound (start of day).
    pub start: Option<OffsetDateTime>,
    /// Inclusive upper bound (end of day).
    pub end: Option<OffsetDateTime>,
    /// Metadata filters still awaiting field resolution.
    pub metadata_filters: Vec<UnresolvedMetadataFilter>,
}

/// Backend query: criteria plus the page window.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery {
    /// Scope being searched.
    pub scope: ScopeId,
    /// Normalized criteria.
    pub criteria: SearchCriteria,
    /// Items to skip.
    pub offset: u64,
    /// Items to fetch.
    pub limit: u64,
}

/// Data-fetch collaborator for [`SearchTool`].
pub trait SearchBackend {
    /// Item type returned to callers.
    type Item;

    /// Fetches one page window.
    ///
    /// # Errors
    ///
    /// Returns [`BackendError`] when the backing store fails.
    fn search(&self, query: &SearchQuery) -> Result<FetchedPage<Self::Item>, BackendError>;
}

// ============================================================================
// SECTION: Tool
// ============================================================================

/// Paginated search tool.
pub struct SearchTool<B> {
    /// Data-fetch collaborator.
    backend: B,
    /// Page size bounds.
    pagination: PaginationLimits,
    /// Metadata filter bounds.
    metadata_limits: MetadataFilterLimits,
    /// Audit destination.
    audit: Arc<dyn AuditSink>,
}

impl<B: SearchBackend> SearchTool<B> {
    /// Creates a tool with default limits and no audit output.
    #[must_use]
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            pagination: PaginationLimits::default(),
            metadata_limits: MetadataFilterLimits::default(),
            audit: Arc::new(NoopAuditSink),
        }
    }

    /// Applies limits from a validated configuration.
    #[must_use]
    pub fn with_config(mut self, config: &QueryGuardConfig) -> Self {
        self.pagination = config.pagination_limits();
        self.metadata_limits = config.metadata_filter_limits();
        self
    }

    /// Routes audit events to `audit`.
    #[must_use]
    pub fn with_audit(mut self, audit: Arc<dyn AuditSink>) -> Self {
        self.audit = audit;
        self
    }

    /// Returns the backend.
    #[must_use]
    pub const fn backend(&self) -> &B {
        &self.backend
    }

    /// Runs a search for `scope`.
    ///
    /// # Errors
    ///
    /// Returns [`ToolError::Contract`] for a blank scope and
    /// [`ToolError::Backend`] when the backend fails. Parameter problems are
    /// reported inside the envelope instead.
    pub fn execute(
        &self,
        scope: &str,
        request: &SearchRequest,
    ) -> Result<PaginatedResponse<B::Item>, ToolError> {
        let started = Instant::now();
        let scope = match ScopeId::parse(scope) {
            Ok(scope) => scope,
            Err(err) => {
                self.record_failure(None, ToolOutcome::ContractViolation, started);
                return Err(err.into());
            }
        };

        let params =
            PaginationParams::with_limits(request.page, request.page_size, &self.pagination);
        let mut ctx = ValidationContext::new();
        let criteria = normalize(&mut ctx, request, self.metadata_limits);
        let ValidationMessages {
            errors,
            warnings,
        } = ctx.into_messages();

        if !errors.is_empty() {
            let response = PaginatedResponse::validation_failure(
                &params,
                errors,
                warnings,
                Some(elapsed_ms(started)),
            );
            self.record_response(&scope, ToolOutcome::Rejected, &response);
            return Ok(response);
        }

        let query = SearchQuery {
            scope,
            criteria,
            offset: params.offset(),
            limit: params.limit(),
        };
        let fetched = match self.backend.search(&query) {
            Ok(fetched) => fetched,
            Err(err) => {
                self.record_failure(Some(&query.scope), ToolOutcome::BackendFailure, started);
                return Err(err.into());
            }
        };
        let response =
            PaginatedResponse::assemble(fetched, &params, warnings, Some(elapsed_ms(started)));
        self.record_response(&query.scope, ToolOutcome::Success, &response);
        Ok(response)
    }

    /// Records an event for a call that produced an envelope.
    fn record_response(
        &self,
        scope: &ScopeId,
        outcome: ToolOutcome,
        response: &PaginatedResponse<B::Item>,
    ) {
        self.audit.record(&ToolAuditEvent::new(ToolAuditEventParams {
            tool: TOOL_NAME,
            scope: Some(scope.to_string()),
            outcome,
            error_count: response.errors().len(),
            warning_count: response.warnings().len(),
            item_count: response.items().len(),
            duration_ms: response.duration_ms().unwrap_or_default(),
        }));
    }

    /// Records an event for a call that ended in a [`ToolError`].
    fn record_failure(&self, scope: Option<&ScopeId>, outcome: ToolOutcome, started: Instant) {
        self.audit.record(&ToolAuditEvent::new(ToolAuditEventParams {
            tool: TOOL_NAME,
            scope: scope.map(ToString::to_string),
            outcome,
            error_count: 0,
            warning_count: 0,
            item_count: 0,
            duration_ms: elapsed_ms(started),
        }));
    }
}

impl<B> SearchTool<B>
where
    B: SearchBackend,
    B::Item: Serialize,
{
    /// Decodes a JSON payload, runs the search, and encodes the envelope.
    ///
    /// # Errors
    ///
    /// Returns [`ToolError::InvalidParams`] when the payload has unknown
    /// fields or wrongly typed values, plus every error of [`Self::execute`].
    pub fn handle(&self, scope: &str, payload: Value) -> Result<Value, ToolError> {
        let started = Instant::now();
        let request: SearchRequest = match decode(payload) {
            Ok(request) => request,
            Err(err) => {
                let scope = ScopeId::parse(scope).ok();
                self.record_failure(scope.as_ref(), ToolOutcome::InvalidParams, started);
                return Err(err);
            }
        };
        let response = self.execute(scope, &request)?;
        encode(&response)
    }
}

// ============================================================================
// SECTION: Normalization
// ============================================================================

/// Resolves every search parameter onto `ctx`.
///
/// Fields that failed to resolve fall back to neutral values; callers must
/// consult the context before using the result.
fn normalize(
    ctx: &mut ValidationContext,
    request: &SearchRequest,
    metadata_limits: MetadataFilterLimits,
) -> SearchCriteria {
    let quick_filter = ctx
        .string_param(request.quick_filter.as_deref(), "quickFilter")
        .default_to(DEFAULT_QUICK_FILTER, "broadest view")
        .uppercase()
        .allowed_values(QUICK_FILTERS)
        .resolve()
        .unwrap_or_else(|| DEFAULT_QUICK_FILTER.to_string());
    let keyword = ctx.string_param(request.keyword.as_deref(), "keyword").resolve();
    let include_archived = ctx
        .bool_param(request.include_archived, "includeArchived")
        .default_to(false, "archived findings excluded")
        .resolve()
        .unwrap_or(false);
    let severities =
        ctx.enum_set_param::<Severity>(request.severities.as_deref(), "severities").resolve();
    let statuses = ctx
        .string_list_param(request.statuses.as_deref(), "statuses")
        .allowed_values(STATUSES)
        .resolve();
    let sort = ctx
        .sort_param(request.sort.as_deref(), "sort")
        .default_to(DEFAULT_SORT, "most recently seen first")
        .allowed_fields(SORT_FIELDS)
        .resolve()
        .unwrap_or_else(fallback_sort);
    let start = ctx.date_param(request.start_date.as_deref(), "startDate").resolve();
    let end = ctx.date_param(request.end_date.as_deref(), "endDate").end_of_day().resolve();
    ctx.check_date_range(start, end, "startDate", "endDate");

    let metadata_text = request.metadata_filters.as_ref().and_then(metadata_payload);
    let metadata_filters = ctx
        .metadata_filter_param(metadata_text.as_deref(), "metadataFilters")
        .limits(metadata_limits)
        .resolve();

    SearchCriteria {
        quick_filter,
        keyword,
        include_archived,
        severities: severities.unwrap_or_default(),
        statuses: statuses.unwrap_or_default(),
        sort,
        start,
        end,
        metadata_filters: metadata_filters.unwrap_or_default(),
    }
}

/// Returns the metadata filter payload as JSON text; `null` counts as absent.
fn metadata_payload(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(text) => Some(text.clone()),
        other => Some(other.to_string()),
    }
}

/// Sort order used when the sort parameter failed to resolve.
fn fallback_sort() -> SortOrder {
    SortOrder {
        field: "lastSeen".to_string(),
        direction: SortDirection::Descending,
    }
}
