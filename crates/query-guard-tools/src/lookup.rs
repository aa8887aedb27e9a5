// crates/query-guard-tools/src/lookup.rs
// ============================================================================
// Module: Lookup Tool
// Description: Single-item lookup by identifier over a pluggable backend.
// Purpose: Return one record in the same errors/warnings envelope contract.
// Dependencies: query-guard-core, serde, serde_json
// ============================================================================

//! ## Overview
//! [`LookupTool`] fetches one record. A blank scope or identifier is a
//! contract violation returned as `Err`; a record that does not exist is a
//! failure envelope naming the identifier so the caller can correct it.

use std::sync::Arc;
use std::time::Instant;

use query_guard_core::ItemResponse;
use query_guard_core::require_identifier;
use serde::Deserialize;
use serde::Serialize;
use serde_json::Value;

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

/// Tool name used in audit events.
const TOOL_NAME: &str = "get_finding";

/// Raw lookup parameters.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct LookupRequest {
    /// Record identifier.
    #[serde(default)]
    pub id: Option<String>,
}

/// Data-fetch collaborator for [`LookupTool`].
pub trait LookupBackend {
    /// Item type returned to callers.
    type Item;

    /// Fetches the record with `id`, or `None` when it does not exist.
    ///
    /// # Errors
    ///
    /// Returns [`BackendError`] when the backing store fails.
    fn lookup(&self, scope: &ScopeId, id: &str) -> Result<Option<Self::Item>, BackendError>;
}

/// Single-item lookup tool.
pub struct LookupTool<B> {
    /// Data-fetch collaborator.
    backend: B,
    /// Audit destination.
    audit: Arc<dyn AuditSink>,
}

impl<B: LookupBackend> LookupTool<B> {
    /// Creates a tool with no audit output.
    #[must_use]
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            audit: Arc::new(NoopAuditSink),
        }
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

    /// Looks up `id` within `scope`.
    ///
    /// # Errors
    ///
    /// Returns [`ToolError::Contract`] for a blank scope or identifier and
    /// [`ToolError::Backend`] when the backend fails.
    pub fn execute(&self, scope: &str, id: Option<&str>) -> Result<ItemResponse<B::Item>, ToolError> {
        let started = Instant::now();
        let checked = ScopeId::parse(scope)
            .and_then(|scope| require_identifier("id", id).map(|id| (scope, id)));
        let (scope, id) = match checked {
            Ok(pair) => pair,
            Err(err) => {
                self.record(None, ToolOutcome::ContractViolation, (0, 0, 0), started);
                return Err(err.into());
            }
        };
        let response = match self.backend.lookup(&scope, id) {
            Ok(Some(item)) => ItemResponse::found(item, Vec::new()),
            Ok(None) => ItemResponse::failure(
                vec![format!("No item found with id '{id}' in scope '{scope}'")],
                Vec::new(),
            ),
            Err(err) => {
                self.record(Some(&scope), ToolOutcome::BackendFailure, (0, 0, 0), started);
                return Err(err.into());
            }
        };
        let outcome = if response.is_success() { ToolOutcome::Success } else { ToolOutcome::Rejected };
        let counts = (
            response.errors().len(),
            response.warnings().len(),
            usize::from(response.data().is_some()),
        );
        self.record(Some(&scope), outcome, counts, started);
        Ok(response)
    }

    /// Records one audit event; `counts` is (errors, warnings, items).
    fn record(
        &self,
        scope: Option<&ScopeId>,
        outcome: ToolOutcome,
        counts: (usize, usize, usize),
        started: Instant,
    ) {
        let (error_count, warning_count, item_count) = counts;
        self.audit.record(&ToolAuditEvent::new(ToolAuditEventParams {
            tool: TOOL_NAME,
            scope: scope.map(ToString::to_string),
            outcome,
            error_count,
            warning_count,
            item_count,
            duration_ms: elapsed_ms(started),
        }));
    }
}

impl<B> LookupTool<B>
where
    B: LookupBackend,
    B::Item: Serialize,
{
    /// Decodes a JSON payload, runs the lookup, and encodes the envelope.
    ///
    /// # Errors
    ///
    /// Returns [`ToolError::InvalidParams`] for undecodable payloads, plus
    /// every error of [`Self::execute`].
    pub fn handle(&self, scope: &str, payload: Value) -> Result<Value, ToolError> {
        let started = Instant::now();
        let request: LookupRequest = match decode(payload) {
            Ok(request) => request,
            Err(err) => {
                let scope = ScopeId::parse(scope).ok();
                self.record(scope.as_ref(), ToolOutcome::InvalidParams, (0, 0, 0), started);
                return Err(err);
            }
        };
        let response = self.execute(scope, request.id.as_deref())?;
        encode(&response)
    }
}
