//! Field parsing and validation for NEM12 records
//!
//! Pure predicates and parsers for the field grammars shared across record
//! types: interval dates, header date/times, participant identifiers,
//! interval lengths, and consumption values with their 15.4 format rule.

use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use std::str::FromStr;

use crate::app::models::FailureReason;
use crate::constants::{
    HEADER_DATETIME_FORMAT, INTERVAL_DATE_FORMAT, MAX_FRACTIONAL_DIGITS, MAX_INTEGER_DIGITS,
    MAX_PARTICIPANT_LEN, MINUTES_PER_DAY,
};

/// Parse an interval date in YYYYMMDD form
///
/// The format is strict: exactly 8 digits naming a valid calendar date.
pub fn parse_interval_date(raw: &str) -> Option<NaiveDate> {
    if raw.len() != 8 || !raw.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    NaiveDate::parse_from_str(raw, INTERVAL_DATE_FORMAT).ok()
}

/// Validate a header date/time in YYYYMMDDHHmm form (12 digits, valid
/// calendar date/time at minute resolution)
pub fn is_valid_header_datetime(raw: &str) -> bool {
    raw.len() == 12
        && raw.bytes().all(|b| b.is_ascii_digit())
        && NaiveDateTime::parse_from_str(raw, HEADER_DATETIME_FORMAT).is_ok()
}

/// Validate a from/to participant identifier: 1-10 non-blank characters
pub fn is_valid_participant(raw: &str) -> bool {
    !raw.trim().is_empty() && raw.len() <= MAX_PARTICIPANT_LEN
}

/// Parse an interval length in minutes
///
/// Must be a positive divisor of 1440 (e.g. 5, 15, 30, 60) so that a day
/// splits into a whole number of slots.
pub fn parse_interval_length(raw: &str) -> Option<u32> {
    let minutes = raw.trim().parse::<u32>().ok()?;
    if minutes > 0 && MINUTES_PER_DAY % minutes == 0 {
        Some(minutes)
    } else {
        None
    }
}

/// Validate and parse one consumption value
///
/// Classifies every way a value can be rejected: blank, non-numeric,
/// negative, or violating the 15.4 format rule. Zero is a valid reading.
pub fn parse_consumption(raw: &str) -> Result<Decimal, FailureReason> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(FailureReason::EmptyValue);
    }

    let value = match Decimal::from_str(trimmed) {
        Ok(value) => value,
        // Syntactically numeric strings that overflow Decimal are format
        // violations, not garbage tokens
        Err(_) if is_plain_decimal(trimmed) => {
            return Err(FailureReason::InvalidConsumptionFormat);
        }
        Err(_) => return Err(FailureReason::NonNumericValue),
    };

    if value < Decimal::ZERO {
        return Err(FailureReason::NegativeValue);
    }

    if !is_valid_consumption_format(&value) {
        return Err(FailureReason::InvalidConsumptionFormat);
    }

    Ok(value)
}

/// Validate the NEM12 15.4 consumption format: at most 15 digits before the
/// decimal point and at most 4 after it
///
/// Values exceeding either bound are rejected, never truncated.
pub fn is_valid_consumption_format(value: &Decimal) -> bool {
    if value.scale() > MAX_FRACTIONAL_DIGITS {
        return false;
    }

    integer_digits(value) <= MAX_INTEGER_DIGITS
}

/// Digits before the decimal point of a decimal value
fn integer_digits(value: &Decimal) -> u32 {
    let mantissa = value.mantissa().unsigned_abs();
    let digits = if mantissa == 0 {
        1
    } else {
        mantissa.to_string().len() as u32
    };
    digits.saturating_sub(value.scale())
}

/// Whether a token looks like a plain decimal number: optional sign, digits,
/// at most one decimal point
fn is_plain_decimal(raw: &str) -> bool {
    let digits = raw.strip_prefix(['-', '+']).unwrap_or(raw);
    let mut parts = digits.splitn(2, '.');
    let integer = parts.next().unwrap_or("");
    let fraction = parts.next();

    let integer_ok = integer.bytes().all(|b| b.is_ascii_digit());
    let fraction_ok = fraction.is_none_or(|f| f.bytes().all(|b| b.is_ascii_digit()));
    let has_digits = !integer.is_empty() || fraction.is_some_and(|f| !f.is_empty());

    integer_ok && fraction_ok && has_digits
}
