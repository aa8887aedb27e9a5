// crates/query-guard-core/src/spec/date.rs
// ============================================================================
// Module: Date Spec
// Description: Parsing of calendar dates and epoch-millisecond instants.
// Purpose: Normalize start/end date filters into UTC instants.
// Dependencies: crate::context, time
// ============================================================================

//! ## Overview
//! Accepted inputs are `YYYY-MM-DD` (interpreted in UTC) and signed epoch
//! milliseconds. A calendar date resolves to midnight, or to the last
//! millisecond of the day under `DateSpec::end_of_day`, so that an
//! inclusive end date covers the whole day.

use time::Date;
use time::OffsetDateTime;
use time::macros::format_description;

use crate::context::ValidationContext;
use crate::spec::non_blank;

/// Parses `text` as a calendar date or epoch milliseconds.
///
/// Returns `None` when the text matches neither format or is out of range.
#[must_use]
pub fn parse_date_bound(text: &str, end_of_day: bool) -> Option<OffsetDateTime> {
    let text = text.trim();
    let digits = text.strip_prefix('-').unwrap_or(text);
    if !digits.is_empty() && digits.bytes().all(|byte| byte.is_ascii_digit()) {
        let millis: i64 = text.parse().ok()?;
        return OffsetDateTime::from_unix_timestamp_nanos(i128::from(millis) * 1_000_000).ok();
    }
    let date = Date::parse(text, format_description!("[year]-[month]-[day]")).ok()?;
    let moment = if end_of_day { date.with_hms_milli(23, 59, 59, 999).ok()? } else { date.midnight() };
    Some(moment.assume_utc())
}

/// Single-use spec for an optional date parameter.
pub struct DateSpec<'a> {
    /// Context receiving messages.
    ctx: &'a mut ValidationContext,
    /// Display name used in messages.
    name: &'a str,
    /// Raw input value.
    value: Option<&'a str>,
    /// Whether calendar dates resolve to the end of the day.
    end_of_day: bool,
}

impl<'a> DateSpec<'a> {
    /// Creates a spec over `value`; prefer [`ValidationContext::date_param`].
    pub const fn new(ctx: &'a mut ValidationContext, value: Option<&'a str>, name: &'a str) -> Self {
        Self {
            ctx,
            name,
            value,
            end_of_day: false,
        }
    }

    /// Resolves calendar dates to 23:59:59.999 UTC instead of midnight.
    #[must_use]
    pub const fn end_of_day(mut self) -> Self {
        self.end_of_day = true;
        self
    }

    /// Resolves the instant; unparseable input is an error.
    pub fn resolve(self) -> Option<OffsetDateTime> {
        let text = non_blank(self.value)?;
        let parsed = parse_date_bound(text, self.end_of_day);
        if parsed.is_none() {
            self.ctx.error(format!(
                "Invalid {} '{text}'. Expected YYYY-MM-DD or epoch milliseconds",
                self.name
            ));
        }
        parsed
    }
}
