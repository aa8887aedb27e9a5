// crates/query-guard-core/src/response.rs
// ============================================================================
// Module: Response Envelopes
// Description: Paginated and single-item response envelopes plus assembly.
// Purpose: Return items with separate error and warning channels.
// Dependencies: serde, crate::pagination
// ============================================================================

//! ## Overview
//! Every tool call returns exactly one envelope. Errors mean "fix and retry";
//! warnings mean "informational, proceed". Paginated envelopes also carry a
//! `hasMorePages` signal: exact when the backend reports a total, otherwise a
//! heuristic based on whether the page came back full.
//!
//! ## Invariants
//! - `is_success() == errors().is_empty()`.
//! - Failure envelopes have no items, `total_items == Some(0)`, and
//!   `has_more_pages == false`.
//! - Envelopes own their collections and expose them read-only.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Serialize;

use crate::pagination::PaginationParams;

// ============================================================================
// SECTION: Messages
// ============================================================================

/// Warning emitted when the first page is empty.
pub const NO_ITEMS_FOUND: &str = "No items found.";

// ============================================================================
// SECTION: Fetched Page
// ============================================================================

/// Result returned by a data-fetch collaborator for one page window.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchedPage<T> {
    /// Items in the requested window.
    pub items: Vec<T>,
    /// Exact total across all pages, when the backend knows it.
    pub total_items: Option<u64>,
}

impl<T> FetchedPage<T> {
    /// Creates a fetched page.
    #[must_use]
    pub const fn new(items: Vec<T>, total_items: Option<u64>) -> Self {
        Self {
            items,
            total_items,
        }
    }
}

// ============================================================================
// SECTION: Paginated Envelope
// ============================================================================

/// Paginated response envelope.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginatedResponse<T> {
    /// Items on this page.
    items: Vec<T>,
    /// One-based page number.
    page: u64,
    /// Page size used for the fetch.
    page_size: u64,
    /// Exact total when known.
    total_items: Option<u64>,
    /// Whether another page is expected.
    has_more_pages: bool,
    /// Caller-correctable problems.
    errors: Vec<String>,
    /// Defaults, corrections, and heuristic notices.
    warnings: Vec<String>,
    /// Wall-clock time spent handling the call.
    duration_ms: Option<u64>,
}

impl<T> PaginatedResponse<T> {
    /// Assembles a successful envelope from a fetched page.
    ///
    /// Warnings are ordered as pagination corrections, then `upstream`
    /// warnings, then notices derived from the page itself.
    #[must_use]
    pub fn assemble(
        fetched: FetchedPage<T>,
        params: &PaginationParams,
        upstream: Vec<String>,
        duration_ms: Option<u64>,
    ) -> Self {
        let FetchedPage {
            items,
            total_items,
        } = fetched;
        let mut warnings = params.warnings().to_vec();
        warnings.extend(upstream);

        let item_count = u64::try_from(items.len()).unwrap_or(u64::MAX);
        let has_more_pages = match total_items {
            Some(total) => params.page().saturating_mul(params.page_size()) < total,
            None => item_count >= params.page_size(),
        };

        if items.is_empty() {
            if params.page() == 1 {
                warnings.push(NO_ITEMS_FOUND.to_string());
            } else {
                let total = total_items.map_or_else(String::new, |total| format!(" (totalItems: {total})"));
                warnings.push(format!(
                    "Page {} is beyond the available results{total}",
                    params.page()
                ));
            }
        } else if total_items.is_none() && has_more_pages {
            warnings.push(
                "totalItems unavailable; hasMorePages is estimated from a full page and more \
                 results may not exist"
                    .to_string(),
            );
        }

        Self {
            items,
            page: params.page(),
            page_size: params.page_size(),
            total_items,
            has_more_pages,
            errors: Vec::new(),
            warnings,
            duration_ms,
        }
    }

    /// Builds a failure envelope after the validation gate rejected a request.
    #[must_use]
    pub fn validation_failure(
        params: &PaginationParams,
        errors: Vec<String>,
        upstream: Vec<String>,
        duration_ms: Option<u64>,
    ) -> Self {
        let mut warnings = params.warnings().to_vec();
        warnings.extend(upstream);
        Self {
            items: Vec::new(),
            page: params.page(),
            page_size: params.page_size(),
            total_items: Some(0),
            has_more_pages: false,
            errors,
            warnings,
            duration_ms,
        }
    }

    /// Returns true when no errors were reported.
    #[must_use]
    pub const fn is_success(&self) -> bool {
        self.errors.is_empty()
    }

    /// Returns the items on this page.
    #[must_use]
    pub fn items(&self) -> &[T] {
        &self.items
    }

    /// Consumes the envelope and returns its items.
    #[must_use]
    pub fn into_items(self) -> Vec<T> {
        self.items
    }

    /// Returns the one-based page number.
    #[must_use]
    pub const fn page(&self) -> u64 {
        self.page
    }

    /// Returns the page size.
    #[must_use]
    pub const fn page_size(&self) -> u64 {
        self.page_size
    }

    /// Returns the exact total when known.
    #[must_use]
    pub const fn total_items(&self) -> Option<u64> {
        self.total_items
    }

    /// Returns whether another page is expected.
    ///
    /// When [`Self::total_items`] is `None` this is an estimate: a full page
    /// suggests more data, a partial or empty page suggests none.
    #[must_use]
    pub const fn has_more_pages(&self) -> bool {
        self.has_more_pages
    }

    /// Returns the errors.
    #[must_use]
    pub fn errors(&self) -> &[String] {
        &self.errors
    }

    /// Returns the warnings.
    #[must_use]
    pub fn warnings(&self) -> &[String] {
        &self.warnings
    }

    /// Returns the handling duration in milliseconds, when measured.
    #[must_use]
    pub const fn duration_ms(&self) -> Option<u64> {
        self.duration_ms
    }
}

// ============================================================================
// SECTION: Single-Item Envelope
// ============================================================================

/// Single-item response envelope for non-paginated lookups.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemResponse<T> {
    /// The item, when found.
    data: Option<T>,
    /// Caller-correctable problems.
    errors: Vec<String>,
    /// Informational notices.
    warnings: Vec<String>,
}

impl<T> ItemResponse<T> {
    /// Builds a successful envelope.
    #[must_use]
    pub const fn found(data: T, warnings: Vec<String>) -> Self {
        Self {
            data: Some(data),
            errors: Vec::new(),
            warnings,
        }
    }

    /// Builds a failure envelope with no data.
    #[must_use]
    pub const fn failure(errors: Vec<String>, warnings: Vec<String>) -> Self {
        Self {
            data: None,
            errors,
            warnings,
        }
    }

    /// Returns true when no errors were reported.
    #[must_use]
    pub const fn is_success(&self) -> bool {
        self.errors.is_empty()
    }

    /// Returns the item, when present.
    #[must_use]
    pub const fn data(&self) -> Option<&T> {
        self.data.as_ref()
    }

    /// Consumes the envelope and returns the item.
    #[must_use]
    pub fn into_data(self) -> Option<T> {
        self.data
    }

    /// Returns the errors.
    #[must_use]
    pub fn errors(&self) -> &[String] {
        &self.errors
    }

    /// Returns the warnings.
    #[must_use]
    pub fn warnings(&self) -> &[String] {
        &self.warnings
    }
}
