// crates/query-guard-core/src/metadata.rs
// ============================================================================
// Module: Metadata Filters
// Description: JSON metadata-filter parsing into unresolved field filters.
// Purpose: Accept loosely shaped filter objects and report every bad field.
// Dependencies: serde, serde_json, thiserror
// ============================================================================

//! ## Overview
//! A metadata filter payload is a JSON object mapping a field name to a
//! string, a number, or an array of strings/numbers. Each value is classified
//! once into [`FilterValueShape`] and matched exhaustively, so every accepted
//! and rejected shape is visible in one place. Field order from the payload is
//! preserved.
//!
//! Resolving field names to backend identifiers is not done here; the output
//! is a list of [`UnresolvedMetadataFilter`] for an external field catalog.
//!
//! Security posture: payloads are untrusted and bounded by
//! [`MetadataFilterLimits`] before and after decoding.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeSet;

use serde::Serialize;
use serde_json::Number;
use serde_json::Value;
use thiserror::Error;

// ============================================================================
// SECTION: Limits
// ============================================================================

/// Default maximum metadata filter payload size in bytes.
pub const DEFAULT_MAX_PAYLOAD_BYTES: usize = 16 * 1024;
/// Default maximum number of filtered fields.
pub const DEFAULT_MAX_FIELDS: usize = 32;
/// Default maximum number of values per field.
pub const DEFAULT_MAX_VALUES_PER_FIELD: usize = 100;

/// Size bounds applied to metadata filter payloads.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MetadataFilterLimits {
    /// Maximum raw payload size in bytes.
    pub max_payload_bytes: usize,
    /// Maximum number of fields in the object.
    pub max_fields: usize,
    /// Maximum number of values for a single field.
    pub max_values_per_field: usize,
}

impl Default for MetadataFilterLimits {
    fn default() -> Self {
        Self {
            max_payload_bytes: DEFAULT_MAX_PAYLOAD_BYTES,
            max_fields: DEFAULT_MAX_FIELDS,
            max_values_per_field: DEFAULT_MAX_VALUES_PER_FIELD,
        }
    }
}

// ============================================================================
// SECTION: Unresolved Filter
// ============================================================================

/// Construction failures for [`UnresolvedMetadataFilter`].
///
/// These are caller-contract violations, not user input errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MetadataFilterError {
    /// Field name was empty or whitespace.
    #[error("metadata filter field name must not be blank")]
    BlankFieldName,
    /// No values were supplied for the field.
    #[error("metadata filter for field '{0}' must have at least one value")]
    EmptyValues(String),
}

/// A caller-supplied metadata filter before field-name resolution.
///
/// # Invariants
/// - `field_name` is never blank.
/// - `values` is never empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UnresolvedMetadataFilter {
    /// Field name as supplied by the caller (trimmed).
    field_name: String,
    /// Values to match, in payload order.
    values: Vec<String>,
}

impl UnresolvedMetadataFilter {
    /// Creates a filter, enforcing the non-blank / non-empty invariants.
    ///
    /// # Errors
    ///
    /// Returns [`MetadataFilterError`] when the field name is blank or no
    /// values are supplied.
    pub fn new(
        field_name: impl Into<String>,
        values: Vec<String>,
    ) -> Result<Self, MetadataFilterError> {
        let field_name = field_name.into().trim().to_string();
        if field_name.is_empty() {
            return Err(MetadataFilterError::BlankFieldName);
        }
        if values.is_empty() {
            return Err(MetadataFilterError::EmptyValues(field_name));
        }
        Ok(Self {
            field_name,
            values,
        })
    }

    /// Returns the field name.
    #[must_use]
    pub fn field_name(&self) -> &str {
        &self.field_name
    }

    /// Returns the values.
    #[must_use]
    pub fn values(&self) -> &[String] {
        &self.values
    }
}

// ============================================================================
// SECTION: Value Shapes
// ============================================================================

/// Classification of a field value at the decoding boundary.
#[derive(Debug, Clone, Copy)]
enum FilterValueShape<'v> {
    /// Single string.
    Text(&'v str),
    /// Single number.
    Number(&'v Number),
    /// Array of members.
    List(&'v [Value]),
    /// JSON `null`.
    Null,
    /// Boolean or nested object.
    Unsupported(&'static str),
}

impl<'v> From<&'v Value> for FilterValueShape<'v> {
    fn from(value: &'v Value) -> Self {
        match value {
            Value::String(text) => Self::Text(text),
            Value::Number(number) => Self::Number(number),
            Value::Array(items) => Self::List(items),
            Value::Null => Self::Null,
            Value::Bool(_) => Self::Unsupported("boolean"),
            Value::Object(_) => Self::Unsupported("object"),
        }
    }
}

/// Classification of a single array member.
#[derive(Debug, Clone, Copy)]
enum FilterMember<'v> {
    /// String member.
    Text(&'v str),
    /// Numeric member.
    Number(&'v Number),
    /// Any other JSON type.
    Unsupported(&'static str),
}

impl<'v> From<&'v Value> for FilterMember<'v> {
    fn from(value: &'v Value) -> Self {
        match value {
            Value::String(text) => Self::Text(text),
            Value::Number(number) => Self::Number(number),
            Value::Null => Self::Unsupported("null"),
            Value::Bool(_) => Self::Unsupported("boolean"),
            Value::Array(_) => Self::Unsupported("array"),
            Value::Object(_) => Self::Unsupported("object"),
        }
    }
}

// ============================================================================
// SECTION: Parsing
// ============================================================================

/// Parses a metadata filter payload for the parameter `name`.
///
/// # Errors
///
/// Returns every problem found, one message per offending field, or a single
/// message when the payload is not a JSON object or exceeds size limits.
pub fn parse_metadata_filters(
    name: &str,
    payload: &str,
    limits: &MetadataFilterLimits,
) -> Result<Vec<UnresolvedMetadataFilter>, Vec<String>> {
    if payload.len() > limits.max_payload_bytes {
        return Err(vec![format!(
            "{name} payload is {} bytes; maximum is {} bytes",
            payload.len(),
            limits.max_payload_bytes
        )]);
    }
    let Ok(Value::Object(object)) = serde_json::from_str::<Value>(payload) else {
        return Err(vec![format!(
            "Invalid {name} format. Expected a JSON object like {{\"field\":\"value\"}} or \
             {{\"field\":[\"v1\",\"v2\"]}}"
        )]);
    };
    if object.len() > limits.max_fields {
        return Err(vec![format!(
            "{name} has {} fields; maximum is {}",
            object.len(),
            limits.max_fields
        )]);
    }

    let mut filters = Vec::with_capacity(object.len());
    let mut errors = Vec::new();
    let mut seen = BTreeSet::new();
    for (field, value) in &object {
        let field = field.trim();
        if field.is_empty() {
            errors.push(format!("{name} contains a blank field name"));
            continue;
        }
        if !seen.insert(field) {
            errors.push(format!("{name} field '{field}' appears more than once"));
            continue;
        }
        let values = match field_values(name, field, value, limits) {
            Ok(values) => values,
            Err(message) => {
                errors.push(message);
                continue;
            }
        };
        match UnresolvedMetadataFilter::new(field, values) {
            Ok(filter) => filters.push(filter),
            Err(err) => errors.push(format!("{name}: {err}")),
        }
    }
    if errors.is_empty() { Ok(filters) } else { Err(errors) }
}

/// Converts one field value into its string values.
fn field_values(
    name: &str,
    field: &str,
    value: &Value,
    limits: &MetadataFilterLimits,
) -> Result<Vec<String>, String> {
    match FilterValueShape::from(value) {
        FilterValueShape::Text(text) => {
            let text = text.trim();
            if text.is_empty() {
                return Err(format!("{name} field '{field}' has a blank value"));
            }
            Ok(vec![text.to_string()])
        }
        FilterValueShape::Number(number) => Ok(vec![render_number(number)]),
        FilterValueShape::Null => Err(format!(
            "{name} field '{field}' is null. Provide a string, a number, or an array of \
             strings/numbers"
        )),
        FilterValueShape::Unsupported(kind) => Err(format!(
            "{name} field '{field}' has an unsupported {kind} value. Provide a string, a \
             number, or an array of strings/numbers"
        )),
        FilterValueShape::List(items) => {
            if items.is_empty() {
                return Err(format!("{name} field '{field}' has an empty array"));
            }
            if items.len() > limits.max_values_per_field {
                return Err(format!(
                    "{name} field '{field}' has {} values; maximum is {}",
                    items.len(),
                    limits.max_values_per_field
                ));
            }
            let mut values = Vec::with_capacity(items.len());
            for (index, item) in items.iter().enumerate() {
                match FilterMember::from(item) {
                    FilterMember::Text(text) => {
                        let text = text.trim();
                        if text.is_empty() {
                            return Err(format!(
                                "{name} field '{field}' has a blank value at index {index}"
                            ));
                        }
                        values.push(text.to_string());
                    }
                    FilterMember::Number(number) => values.push(render_number(number)),
                    FilterMember::Unsupported(kind) => {
                        return Err(format!(
                            "{name} field '{field}' has an unsupported {kind} at index {index}. \
                             Array values must be strings or numbers"
                        ));
                    }
                }
            }
            Ok(values)
        }
    }
}

/// Renders a number, dropping the fractional part only when it is exactly
/// integral.
fn render_number(number: &Number) -> String {
    if number.is_f64()
        && let Some(float) = number.as_f64()
        && float.is_finite()
        && float.trunc().to_bits() == float.to_bits()
    {
        return format!("{float:.0}");
    }
    number.to_string()
}
