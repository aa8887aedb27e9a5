// crates/query-guard-core/src/pagination.rs
// ============================================================================
// Module: Pagination Params
// Description: Normalization of raw (page, pageSize) pairs.
// Purpose: Always produce a usable page window plus offset/limit.
// Dependencies: none
// ============================================================================

//! ## Overview
//! Pagination never fails. Each input is corrected independently, in order:
//! a non-positive page becomes 1, a non-positive page size becomes the
//! default, and an oversized page size becomes the maximum. Every correction
//! carries a warning; absent inputs take defaults silently.
//!
//! ## Invariants
//! - `page >= 1` and `1 <= page_size <= max_page_size`.
//! - `offset == (page - 1) * page_size` (saturating) and `limit == page_size`.

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Page used when none is requested.
pub const DEFAULT_PAGE: u64 = 1;
/// Page size used when none (or a non-positive one) is requested.
pub const DEFAULT_PAGE_SIZE: u64 = 50;
/// Largest page size a caller may request.
pub const MAX_PAGE_SIZE: u64 = 100;

// ============================================================================
// SECTION: Limits
// ============================================================================

/// Default and maximum page sizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaginationLimits {
    /// Page size applied when the request omits or mangles it.
    pub default_page_size: u64,
    /// Largest accepted page size.
    pub max_page_size: u64,
}

impl Default for PaginationLimits {
    fn default() -> Self {
        Self {
            default_page_size: DEFAULT_PAGE_SIZE,
            max_page_size: MAX_PAGE_SIZE,
        }
    }
}

// ============================================================================
// SECTION: Params
// ============================================================================

/// Normalized pagination window.
///
/// # Invariants
/// - Immutable after construction; see module invariants for bounds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaginationParams {
    /// One-based page number.
    page: u64,
    /// Items per page.
    page_size: u64,
    /// Items to skip.
    offset: u64,
    /// Items to fetch.
    limit: u64,
    /// Corrections applied to the raw input.
    warnings: Vec<String>,
}

impl PaginationParams {
    /// Normalizes raw inputs against the default limits.
    #[must_use]
    pub fn new(page: Option<i64>, page_size: Option<i64>) -> Self {
        Self::with_limits(page, page_size, &PaginationLimits::default())
    }

    /// Normalizes raw inputs against `limits`.
    #[must_use]
    pub fn with_limits(page: Option<i64>, page_size: Option<i64>, limits: &PaginationLimits) -> Self {
        let max_page_size = limits.max_page_size.max(1);
        let default_page_size = limits.default_page_size.clamp(1, max_page_size);
        let mut warnings = Vec::new();

        let page = match page {
            None => DEFAULT_PAGE,
            Some(raw) if raw <= 0 => {
                warnings.push(format!("Invalid page number {raw}, using page {DEFAULT_PAGE}"));
                DEFAULT_PAGE
            }
            Some(raw) => raw.unsigned_abs(),
        };

        let page_size = match page_size {
            None => default_page_size,
            Some(raw) if raw <= 0 => {
                warnings.push(format!("Invalid pageSize {raw}, using default {default_page_size}"));
                default_page_size
            }
            Some(raw) if raw.unsigned_abs() > max_page_size => {
                warnings.push(format!(
                    "Requested pageSize {raw} exceeds maximum {max_page_size}, using \
                     {max_page_size}"
                ));
                max_page_size
            }
            Some(raw) => raw.unsigned_abs(),
        };

        Self {
            page,
            page_size,
            offset: (page - 1).saturating_mul(page_size),
            limit: page_size,
            warnings,
        }
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

    /// Returns the number of items to skip.
    #[must_use]
    pub const fn offset(&self) -> u64 {
        self.offset
    }

    /// Returns the number of items to fetch.
    #[must_use]
    pub const fn limit(&self) -> u64 {
        self.limit
    }

    /// Returns the corrections applied during normalization.
    #[must_use]
    pub fn warnings(&self) -> &[String] {
        &self.warnings
    }
}
