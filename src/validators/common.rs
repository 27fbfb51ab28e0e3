//! Common validation utilities and helpers.

use chrono::NaiveDate;

use crate::constants::DATE_PARAM_FORMAT;
use crate::errors::ApiError;

/// Parse an optional `YYYY-MM-DD` query parameter.
///
/// An absent or blank value means "no bound". Anything else that is not a
/// calendar date is rejected with a message naming `field`.
///
/// # Example
/// ```ignore
/// let after = parse_date_param("after", query.after.as_deref())?;
/// ```
pub fn parse_date_param(field: &str, value: Option<&str>) -> Result<Option<NaiveDate>, ApiError> {
    match value.map(str::trim) {
        None | Some("") => Ok(None),
        Some(raw) => NaiveDate::parse_from_str(raw, DATE_PARAM_FORMAT)
            .map(Some)
            .map_err(|_| ApiError::invalid_date(field)),
    }
}
