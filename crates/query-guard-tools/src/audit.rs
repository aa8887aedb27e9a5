// crates/query-guard-tools/src/audit.rs
// ============================================================================
// Module: Tool Audit Logging
// Description: Structured audit events for tool call handling.
// Purpose: Emit redacted JSON-lines records without a logging framework.
// Dependencies: query-guard-config, serde, serde_json
// ============================================================================

//! ## Overview
//! One [`ToolAuditEvent`] is recorded per tool call. Events describe the call
//! (tool, scope, outcome, message counts, duration) and never include raw
//! parameter values. Sinks are chosen from [`AuditConfig`].

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fs::OpenOptions;
use std::io;
use std::io::Write;
use std::path::Path;
use std::sync::Arc;
use std::sync::Mutex;
use std::time::SystemTime;
use std::time::UNIX_EPOCH;

use query_guard_config::AuditConfig;
use query_guard_config::AuditSinkKind;
use serde::Serialize;

// ============================================================================
// SECTION: Types
// ============================================================================

/// Outcome classification for a tool call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ToolOutcome {
    /// Backend called and an envelope returned without errors.
    Success,
    /// Validation gate rejected the request; backend not called.
    Rejected,
    /// Caller contract violated (blank scope or identifier).
    ContractViolation,
    /// Payload could not be decoded.
    InvalidParams,
    /// Backend call failed.
    BackendFailure,
}

/// Tool call audit event payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ToolAuditEvent {
    /// Event identifier.
    pub event: &'static str,
    /// Event timestamp (milliseconds since epoch).
    pub timestamp_ms: u128,
    /// Tool name.
    pub tool: &'static str,
    /// Scope identifier when it passed the contract check.
    pub scope: Option<String>,
    /// Call outcome.
    pub outcome: ToolOutcome,
    /// Number of envelope errors.
    pub error_count: usize,
    /// Number of envelope warnings.
    pub warning_count: usize,
    /// Number of items returned.
    pub item_count: usize,
    /// Wall-clock handling time.
    pub duration_ms: u64,
}

/// Inputs required to construct an audit event.
pub struct ToolAuditEventParams {
    /// Tool name.
    pub tool: &'static str,
    /// Scope identifier when known.
    pub scope: Option<String>,
    /// Call outcome.
    pub outcome: ToolOutcome,
    /// Number of envelope errors.
    pub error_count: usize,
    /// Number of envelope warnings.
    pub warning_count: usize,
    /// Number of items returned.
    pub item_count: usize,
    /// Wall-clock handling time.
    pub duration_ms: u64,
}

impl ToolAuditEvent {
    /// Creates a new audit event with a consistent timestamp.
    #[must_use]
    pub fn new(params: ToolAuditEventParams) -> Self {
        let timestamp_ms =
            SystemTime::now().duration_since(UNIX_EPOCH).unwrap_or_default().as_millis();
        Self {
            event: "tool_call",
            timestamp_ms,
            tool: params.tool,
            scope: params.scope,
            outcome: params.outcome,
            error_count: params.error_count,
            warning_count: params.warning_count,
            item_count: params.item_count,
            duration_ms: params.duration_ms,
        }
    }
}

// ============================================================================
// SECTION: Trait
// ============================================================================

/// Audit sink for tool call events.
pub trait AuditSink: Send + Sync {
    /// Record an audit event.
    fn record(&self, event: &ToolAuditEvent);
}

/// Audit sink that logs JSON lines to stderr.
pub struct StderrAuditSink;

impl AuditSink for StderrAuditSink {
    fn record(&self, event: &ToolAuditEvent) {
        if let Ok(payload) = serde_json::to_string(event) {
            let _ = writeln!(std::io::stderr(), "{payload}");
        }
    }
}

/// Audit sink that logs JSON lines to a file.
pub struct FileAuditSink {
    /// File handle used for append-only logging.
    file: Mutex<std::fs::File>,
}

impl FileAuditSink {
    /// Opens the audit log file in append mode.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be opened.
    pub fn new(path: &Path) -> io::Result<Self> {
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        Ok(Self {
            file: Mutex::new(file),
        })
    }
}

impl AuditSink for FileAuditSink {
    fn record(&self, event: &ToolAuditEvent) {
        if let Ok(payload) = serde_json::to_string(event)
            && let Ok(mut file) = self.file.lock()
        {
            let _ = writeln!(file, "{payload}");
            let _ = file.flush();
        }
    }
}

/// No-op audit sink.
pub struct NoopAuditSink;

impl AuditSink for NoopAuditSink {
    fn record(&self, _event: &ToolAuditEvent) {}
}

// ============================================================================
// SECTION: Construction
// ============================================================================

/// Builds the sink selected by `config`.
///
/// # Errors
///
/// Returns an error when the file sink cannot open its log file.
pub fn audit_sink_from_config(config: &AuditConfig) -> io::Result<Arc<dyn AuditSink>> {
    match (config.sink, config.path.as_deref()) {
        (AuditSinkKind::Stderr, _) => Ok(Arc::new(StderrAuditSink)),
        (AuditSinkKind::None, _) => Ok(Arc::new(NoopAuditSink)),
        (AuditSinkKind::File, Some(path)) => Ok(Arc::new(FileAuditSink::new(Path::new(path.trim()))?)),
        (AuditSinkKind::File, None) => Err(io::Error::new(
            io::ErrorKind::InvalidInput,
            "audit.path is required for the file sink",
        )),
    }
}
