// crates/query-guard-config/src/lib.rs
// ============================================================================
// Module: Query Guard Config Library
// Description: Canonical config model, validation, and example payload.
// Purpose: Single source of truth for query-guard.toml semantics.
// Dependencies: query-guard-core, serde, toml
// ============================================================================

//! ## Overview
//! `query-guard-config` defines the configuration model for Query Guard tool
//! adapters: pagination bounds, metadata filter limits, and the audit sink.
//! Loading is strict and fail-closed.
//!
//! Security posture: config inputs are untrusted.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod config;
pub mod examples;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use config::*;
pub use examples::config_toml_example;
