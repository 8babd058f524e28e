//! Tests for NEM12 field validators and parsers

use crate::app::models::FailureReason;
use crate::app::services::nem12_parser::field_parsers::{
    is_valid_consumption_format, is_valid_header_datetime, is_valid_participant,
    parse_consumption, parse_interval_date, parse_interval_length,
};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use std::str::FromStr;

#[test]
fn test_parse_interval_date_valid() {
    assert_eq!(
        parse_interval_date("20050301"),
        NaiveDate::from_ymd_opt(2005, 3, 1)
    );
}

#[test]
fn test_parse_interval_date_rejects_bad_input() {
    // Wrong length
    assert_eq!(parse_interval_date("2005030"), None);
    assert_eq!(parse_interval_date("200503011"), None);
    // Non-digits
    assert_eq!(parse_interval_date("2005030a"), None);
    assert_eq!(parse_interval_date("03/01/05"), None);
    // Impossible calendar dates
    assert_eq!(parse_interval_date("20050230"), None);
    assert_eq!(parse_interval_date("20051301"), None);
    assert_eq!(parse_interval_date(""), None);
}

#[test]
fn test_parse_interval_date_leap_years() {
    assert!(parse_interval_date("20240229").is_some());
    assert_eq!(parse_interval_date("20230229"), None);
}

#[test]
fn test_header_datetime_validation() {
    assert!(is_valid_header_datetime("200506081149"));
    assert!(is_valid_header_datetime("202401011200"));

    // Wrong length
    assert!(!is_valid_header_datetime("20050608114"));
    assert!(!is_valid_header_datetime("2005060811490"));
    // Non-digits
    assert!(!is_valid_header_datetime("20050608114a"));
    // Invalid minute and month
    assert!(!is_valid_header_datetime("200506081170"));
    assert!(!is_valid_header_datetime("200513081149"));
}

#[test]
fn test_participant_validation() {
    assert!(is_valid_participant("UNITEDDP"));
    assert!(is_valid_participant("A"));
    assert!(is_valid_participant("ABCDEFGHIJ"));

    assert!(!is_valid_participant(""));
    assert!(!is_valid_participant("   "));
    assert!(!is_valid_participant("ABCDEFGHIJK"));
}

#[test]
fn test_parse_interval_length() {
    assert_eq!(parse_interval_length("5"), Some(5));
    assert_eq!(parse_interval_length("15"), Some(15));
    assert_eq!(parse_interval_length("30"), Some(30));
    assert_eq!(parse_interval_length("60"), Some(60));

    // Zero, non-divisors, and garbage
    assert_eq!(parse_interval_length("0"), None);
    assert_eq!(parse_interval_length("7"), None);
    assert_eq!(parse_interval_length("90"), Some(90));
    assert_eq!(parse_interval_length("-30"), None);
    assert_eq!(parse_interval_length("thirty"), None);
    assert_eq!(parse_interval_length(""), None);
}

#[test]
fn test_parse_consumption_accepts_valid_values() {
    assert_eq!(parse_consumption("1.5"), Ok(Decimal::from_str("1.5").unwrap()));
    assert_eq!(
        parse_consumption("20.1234"),
        Ok(Decimal::from_str("20.1234").unwrap())
    );
    // Zero is a valid reading in every spelling
    assert!(parse_consumption("0").is_ok());
    assert!(parse_consumption("0.0").is_ok());
    assert!(parse_consumption("0.00").is_ok());
}

#[test]
fn test_parse_consumption_empty() {
    assert_eq!(parse_consumption(""), Err(FailureReason::EmptyValue));
    assert_eq!(parse_consumption("   "), Err(FailureReason::EmptyValue));
}

#[test]
fn test_parse_consumption_non_numeric() {
    assert_eq!(parse_consumption("A"), Err(FailureReason::NonNumericValue));
    assert_eq!(parse_consumption("N/A"), Err(FailureReason::NonNumericValue));
    assert_eq!(
        parse_consumption("1.5e3"),
        Err(FailureReason::NonNumericValue)
    );
    assert_eq!(
        parse_consumption("1.2.3"),
        Err(FailureReason::NonNumericValue)
    );
}

#[test]
fn test_parse_consumption_negative() {
    assert_eq!(parse_consumption("-1"), Err(FailureReason::NegativeValue));
    assert_eq!(
        parse_consumption("-0.0001"),
        Err(FailureReason::NegativeValue)
    );
}

#[test]
fn test_consumption_fractional_digit_boundary() {
    // Exactly 4 fractional digits is the limit
    assert!(parse_consumption("123.1234").is_ok());
    assert_eq!(
        parse_consumption("123.12345"),
        Err(FailureReason::InvalidConsumptionFormat)
    );
}

#[test]
fn test_consumption_integer_digit_boundary() {
    // Exactly 15 integer digits is the limit
    assert!(parse_consumption("999999999999999").is_ok());
    assert_eq!(
        parse_consumption("9999999999999999"),
        Err(FailureReason::InvalidConsumptionFormat)
    );
    assert!(parse_consumption("999999999999999.9999").is_ok());
}

#[test]
fn test_consumption_overflowing_numeric_token_is_format_violation() {
    // Syntactically numeric but beyond what an exact decimal can hold
    assert_eq!(
        parse_consumption("123.1234567890123456789012345678901"),
        Err(FailureReason::InvalidConsumptionFormat)
    );
}

#[test]
fn test_consumption_format_predicate() {
    assert!(is_valid_consumption_format(
        &Decimal::from_str("0.0001").unwrap()
    ));
    assert!(!is_valid_consumption_format(
        &Decimal::from_str("0.00001").unwrap()
    ));
    // Fractional-only values have zero integer digits
    assert!(is_valid_consumption_format(
        &Decimal::from_str("0.05").unwrap()
    ));
}
