// crates/query-guard-config/src/config.rs
// ============================================================================
// Module: Query Guard Configuration
// Description: Configuration loading and validation for Query Guard tools.
// Purpose: Provide strict, fail-closed config parsing with hard limits.
// Dependencies: query-guard-core, serde, toml
// ============================================================================

//! ## Overview
//! Configuration is loaded from a TOML file with strict size and path limits.
//! Every section is optional; omitted values take the same defaults the core
//! crate applies when no configuration exists. Invalid configuration fails
//! closed rather than being silently corrected.
//!
//! Security posture: config inputs are untrusted.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::env;
use std::fs;
use std::path::Path;
use std::path::PathBuf;

use query_guard_core::DEFAULT_PAGE_SIZE;
use query_guard_core::MAX_PAGE_SIZE;
use query_guard_core::MetadataFilterLimits;
use query_guard_core::PaginationLimits;
use query_guard_core::metadata::DEFAULT_MAX_FIELDS;
use query_guard_core::metadata::DEFAULT_MAX_PAYLOAD_BYTES;
use query_guard_core::metadata::DEFAULT_MAX_VALUES_PER_FIELD;
use serde::Deserialize;
use thiserror::Error;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Default configuration filename when no path is specified.
const DEFAULT_CONFIG_NAME: &str = "query-guard.toml";
/// Environment variable used to override the config path.
pub(crate) const CONFIG_ENV_VAR: &str = "QUERY_GUARD_CONFIG";
/// Maximum configuration file size in bytes.
pub(crate) const MAX_CONFIG_FILE_SIZE: usize = 1024 * 1024;
/// Maximum length of a single path component.
pub(crate) const MAX_PATH_COMPONENT_LENGTH: usize = 255;
/// Maximum total path length.
pub(crate) const MAX_TOTAL_PATH_LENGTH: usize = 4096;
/// Largest page size an operator may configure.
pub(crate) const MAX_CONFIGURABLE_PAGE_SIZE: u64 = 1_000;
/// Largest metadata filter payload an operator may configure.
pub(crate) const MAX_CONFIGURABLE_PAYLOAD_BYTES: usize = 1024 * 1024;
/// Largest metadata field count an operator may configure.
pub(crate) const MAX_CONFIGURABLE_FIELDS: usize = 1_024;
/// Largest per-field value count an operator may configure.
pub(crate) const MAX_CONFIGURABLE_VALUES_PER_FIELD: usize = 10_000;

// ============================================================================
// SECTION: Configuration Types
// ============================================================================

/// Query Guard configuration.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct QueryGuardConfig {
    /// Page size bounds.
    #[serde(default)]
    pub pagination: PaginationConfig,
    /// Metadata filter payload bounds.
    #[serde(default)]
    pub metadata_filters: MetadataFilterConfig,
    /// Audit sink selection.
    #[serde(default)]
    pub audit: AuditConfig,
}

impl QueryGuardConfig {
    /// Loads configuration from disk using the default resolution rules.
    ///
    /// Resolution order: explicit `path`, then `QUERY_GUARD_CONFIG`, then
    /// `query-guard.toml` in the working directory.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when loading or validation fails.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let resolved = resolve_path(path);
        validate_path(&resolved)?;
        let bytes = fs::read(&resolved).map_err(|err| ConfigError::Io(err.to_string()))?;
        if bytes.len() > MAX_CONFIG_FILE_SIZE {
            return Err(ConfigError::Invalid("config file exceeds size limit".to_string()));
        }
        let content = std::str::from_utf8(&bytes)
            .map_err(|_| ConfigError::Invalid("config file must be utf-8".to_string()))?;
        Self::from_toml_str(content)
    }

    /// Parses and validates configuration from TOML text.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when parsing or validation fails.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: Self =
            toml::from_str(content).map_err(|err| ConfigError::Parse(err.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Validates the configuration for internal consistency.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when configuration is invalid.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.pagination.validate()?;
        self.metadata_filters.validate()?;
        self.audit.validate()?;
        Ok(())
    }

    /// Returns the pagination limits consumed by the core crate.
    #[must_use]
    pub const fn pagination_limits(&self) -> PaginationLimits {
        PaginationLimits {
            default_page_size: self.pagination.default_page_size,
            max_page_size: self.pagination.max_page_size,
        }
    }

    /// Returns the metadata filter limits consumed by the core crate.
    #[must_use]
    pub const fn metadata_filter_limits(&self) -> MetadataFilterLimits {
        MetadataFilterLimits {
            max_payload_bytes: self.metadata_filters.max_payload_bytes,
            max_fields: self.metadata_filters.max_fields,
            max_values_per_field: self.metadata_filters.max_values_per_field,
        }
    }
}

// ============================================================================
// SECTION: Pagination Config
// ============================================================================

/// Page size bounds applied to every paginated tool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PaginationConfig {
    /// Page size used when a request omits or mangles it.
    #[serde(default = "default_page_size")]
    pub default_page_size: u64,
    /// Largest page size a request may ask for.
    #[serde(default = "default_max_page_size")]
    pub max_page_size: u64,
}

impl Default for PaginationConfig {
    fn default() -> Self {
        Self {
            default_page_size: default_page_size(),
            max_page_size: default_max_page_size(),
        }
    }
}

impl PaginationConfig {
    /// Validates pagination bounds.
    fn validate(&self) -> Result<(), ConfigError> {
        if self.max_page_size == 0 || self.max_page_size > MAX_CONFIGURABLE_PAGE_SIZE {
            return Err(ConfigError::Invalid("pagination.max_page_size out of range".to_string()));
        }
        if self.default_page_size == 0 || self.default_page_size > self.max_page_size {
            return Err(ConfigError::Invalid(
                "pagination.default_page_size must be between 1 and max_page_size".to_string(),
            ));
        }
        Ok(())
    }
}

// ============================================================================
// SECTION: Metadata Filter Config
// ============================================================================

/// Bounds applied to JSON metadata filter payloads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MetadataFilterConfig {
    /// Maximum raw payload size in bytes.
    #[serde(default = "default_max_payload_bytes")]
    pub max_payload_bytes: usize,
    /// Maximum number of fields in one payload.
    #[serde(default = "default_max_fields")]
    pub max_fields: usize,
    /// Maximum number of values for a single field.
    #[serde(default = "default_max_values_per_field")]
    pub max_values_per_field: usize,
}

impl Default for MetadataFilterConfig {
    fn default() -> Self {
        Self {
            max_payload_bytes: default_max_payload_bytes(),
            max_fields: default_max_fields(),
            max_values_per_field: default_max_values_per_field(),
        }
    }
}

impl MetadataFilterConfig {
    /// Validates metadata filter bounds.
    fn validate(&self) -> Result<(), ConfigError> {
        if self.max_payload_bytes == 0 || self.max_payload_bytes > MAX_CONFIGURABLE_PAYLOAD_BYTES {
            return Err(ConfigError::Invalid(
                "metadata_filters.max_payload_bytes out of range".to_string(),
            ));
        }
        if self.max_fields == 0 || self.max_fields > MAX_CONFIGURABLE_FIELDS {
            return Err(ConfigError::Invalid("metadata_filters.max_fields out of range".to_string()));
        }
        if self.max_values_per_field == 0
            || self.max_values_per_field > MAX_CONFIGURABLE_VALUES_PER_FIELD
        {
            return Err(ConfigError::Invalid(
                "metadata_filters.max_values_per_field out of range".to_string(),
            ));
        }
        Ok(())
    }
}

// ============================================================================
// SECTION: Audit Config
// ============================================================================

/// Destination for tool audit events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuditSinkKind {
    /// JSON lines on stderr.
    #[default]
    Stderr,
    /// JSON lines appended to a file.
    File,
    /// Audit disabled.
    None,
}

/// Audit sink configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AuditConfig {
    /// Selected sink.
    #[serde(default)]
    pub sink: AuditSinkKind,
    /// Log file path, required for the file sink.
    #[serde(default)]
    pub path: Option<String>,
}

impl AuditConfig {
    /// Validates the audit sink selection.
    fn validate(&self) -> Result<(), ConfigError> {
        match (self.sink, self.path.as_deref()) {
            (AuditSinkKind::File, None) => {
                Err(ConfigError::Invalid("audit.path is required for the file sink".to_string()))
            }
            (AuditSinkKind::File, Some(path)) => validate_path_string("audit.path", path),
            (_, Some(_)) => {
                Err(ConfigError::Invalid("audit.path is only valid for the file sink".to_string()))
            }
            (_, None) => Ok(()),
        }
    }
}

// ============================================================================
// SECTION: Defaults
// ============================================================================

/// Default page size.
const fn default_page_size() -> u64 {
    DEFAULT_PAGE_SIZE
}

/// Default maximum page size.
const fn default_max_page_size() -> u64 {
    MAX_PAGE_SIZE
}

/// Default metadata payload size.
const fn default_max_payload_bytes() -> usize {
    DEFAULT_MAX_PAYLOAD_BYTES
}

/// Default metadata field count.
const fn default_max_fields() -> usize {
    DEFAULT_MAX_FIELDS
}

/// Default metadata values per field.
const fn default_max_values_per_field() -> usize {
    DEFAULT_MAX_VALUES_PER_FIELD
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Configuration loading or validation errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// I/O failure while reading configuration.
    #[error("config io error: {0}")]
    Io(String),
    /// TOML parsing error.
    #[error("config parse error: {0}")]
    Parse(String),
    /// Invalid configuration data.
    #[error("invalid config: {0}")]
    Invalid(String),
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Picks the config path: explicit argument, environment override, default.
fn resolve_path(path: Option<&Path>) -> PathBuf {
    path.map(Path::to_path_buf)
        .or_else(|| env::var_os(CONFIG_ENV_VAR).map(PathBuf::from))
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_NAME))
}

/// Rejects the resolved config path when it exceeds length limits.
fn validate_path(path: &Path) -> Result<(), ConfigError> {
    check_path_limits("config path", path)
}

/// Rejects a blank or oversized path supplied inside the config file.
fn validate_path_string(field: &str, value: &str) -> Result<(), ConfigError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ConfigError::Invalid(format!("{field} must be non-empty")));
    }
    check_path_limits(field, Path::new(trimmed))
}

/// Applies the total and per-component length bounds, naming `label` in errors.
fn check_path_limits(label: &str, path: &Path) -> Result<(), ConfigError> {
    if path.as_os_str().len() > MAX_TOTAL_PATH_LENGTH {
        return Err(ConfigError::Invalid(format!("{label} exceeds max length")));
    }
    if path.components().any(|part| part.as_os_str().len() > MAX_PATH_COMPONENT_LENGTH) {
        return Err(ConfigError::Invalid(format!("{label} component too long")));
    }
    Ok(())
}
