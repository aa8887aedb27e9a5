// crates/query-guard-tools/src/codec.rs
// ============================================================================
// Module: Tool Payload Codec
// Description: JSON decoding of tool requests and encoding of envelopes.
// Purpose: Map serde failures onto tool errors in one place.
// Dependencies: serde, serde_json
// ============================================================================

//! Serde helpers shared by the tool adapters.

use std::time::Instant;

use serde::Deserialize;
use serde::Serialize;
use serde_json::Value;

use crate::error::ToolError;

/// Decodes a tool payload into a request type.
pub(crate) fn decode<T: for<'de> Deserialize<'de>>(payload: Value) -> Result<T, ToolError> {
    serde_json::from_value(payload).map_err(|err| ToolError::InvalidParams(err.to_string()))
}

/// Encodes a response envelope as JSON.
pub(crate) fn encode<T: Serialize>(response: &T) -> Result<Value, ToolError> {
    serde_json::to_value(response).map_err(|_| ToolError::Serialization)
}

/// Milliseconds elapsed since `started`, saturating.
pub(crate) fn elapsed_ms(started: Instant) -> u64 {
    u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX)
}
