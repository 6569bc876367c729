//! Parsing of the primitive values the front ends hand to the core.
//!
//! Everything arriving from a user is text. These functions turn that text into ids and
//! dates, or fail with [`InventoryError::Validation`], so the repositories only ever see
//! already-typed values.
use crate::error::InventoryError;
use chrono::{NaiveDate, NaiveDateTime};
use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref DATE_EXPR: Regex = Regex::new(r"^\d{4}-\d{2}-\d{2}$").unwrap();
}

/// Parses an entity id such as `42`.
///
/// # Errors
/// Returns [`InventoryError::Validation`] if `s` is not a 64-bit integer.
pub fn parse_id(s: &str) -> Result<i64, InventoryError> {
    s.trim()
        .parse::<i64>()
        .map_err(|e| InventoryError::Validation(format!("'{s}' is not a valid id: {e}")))
}

/// Parses a comma separated list of ids, i.e. `3,17,42`, as posted by the dashboard when
/// several computers are selected for deletion. Blank items are skipped.
///
/// # Errors
/// Fails on the first item which is not an integer. Nothing is returned for the valid items
/// in that case.
pub fn parse_id_list(s: &str) -> Result<Vec<i64>, InventoryError> {
    s.split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(parse_id)
        .collect()
}

/// Parses an ISO-8601 calendar date (`2006-01-10`). Blank input means "no date".
///
/// # Errors
/// Returns [`InventoryError::Validation`] if the input is neither blank nor a valid date.
pub fn parse_date(s: &str) -> Result<Option<NaiveDate>, InventoryError> {
    let s = s.trim();
    if s.is_empty() {
        return Ok(None);
    }
    if !DATE_EXPR.is_match(s) {
        return Err(InventoryError::Validation(format!(
            "'{s}' is not a date, expected YYYY-MM-DD"
        )));
    }
    Ok(Some(NaiveDate::parse_from_str(s, "%Y-%m-%d")?))
}

/// Dates are persisted as timestamps at midnight.
pub(crate) fn date_to_timestamp(date: Option<NaiveDate>) -> Option<NaiveDateTime> {
    date.map(|d| d.and_time(chrono::NaiveTime::MIN))
}

pub(crate) fn timestamp_to_date(ts: Option<NaiveDateTime>) -> Option<NaiveDate> {
    ts.map(|t| t.date())
}
