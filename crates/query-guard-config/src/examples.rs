// crates/query-guard-config/src/examples.rs
// ============================================================================
// Module: Config Examples
// Description: Canonical example configuration payload.
// Purpose: Deterministic example for docs and tooling.
// Dependencies: std
// ============================================================================

//! ## Overview
//! Canonical example `query-guard.toml`. Every value shown equals the
//! built-in default except the audit sink, which demonstrates the file form.

/// Returns a canonical example `query-guard.toml` configuration.
#[must_use]
pub fn config_toml_example() -> String {
    String::from(
        r#"[pagination]
default_page_size = 50
max_page_size = 100

[metadata_filters]
max_payload_bytes = 16384
max_fields = 32
max_values_per_field = 100

[audit]
sink = "file"
path = "query-guard-audit.jsonl"
"#,
    )
}
