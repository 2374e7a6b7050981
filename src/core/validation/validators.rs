//! Reusable field predicates
//!
//! Rule definitions call these from their check closures. Each returns `true`
//! when the value is acceptable.

use regex::Regex;
use rust_decimal::Decimal;
use std::sync::OnceLock;

/// Largest magnitude a monetary value may reach, exclusive
pub const MAX_MONETARY_MAGNITUDE: i64 = 1_000_000_000;

/// Value is non-empty after trimming
pub fn is_present(value: &str) -> bool {
    !value.trim().is_empty()
}

/// Optional value is set and non-empty after trimming
pub fn is_present_opt(value: Option<&str>) -> bool {
    value.is_some_and(is_present)
}

/// Character count lies within `min..=max`
pub fn has_length_between(value: &str, min: usize, max: usize) -> bool {
    let len = value.chars().count();
    len >= min && len <= max
}

/// No whitespace characters anywhere in the value
pub fn has_no_whitespace(value: &str) -> bool {
    !value.chars().any(char::is_whitespace)
}

/// Inclusive numeric range check
pub fn is_in_range<T: PartialOrd>(value: T, min: T, max: T) -> bool {
    value >= min && value <= max
}

/// Case-insensitive membership in a fixed list
pub fn is_one_of(value: &str, allowed: &[&str]) -> bool {
    let value = value.trim();
    allowed.iter().any(|a| a.eq_ignore_ascii_case(value))
}

/// At most two significant fractional digits
///
/// The value is rendered with its scale preserved (`10.100` stays `10.100`)
/// and matched against: up to two fractional digits, then only zeros. So
/// `10`, `10.1`, `10.10` and `10.100` pass while `10.101` and `10.1001` fail.
pub fn has_at_most_two_decimal_places(value: &Decimal) -> bool {
    static TWO_DP_REGEX: OnceLock<Regex> = OnceLock::new();
    let regex = TWO_DP_REGEX.get_or_init(|| {
        Regex::new(r"^-?\d+(\.\d{0,2}0*)?$").expect("two decimal place pattern is valid")
    });
    regex.is_match(&value.to_string())
}

/// Magnitude strictly below one billion
pub fn is_within_monetary_limit(value: &Decimal) -> bool {
    value.abs() < Decimal::from(MAX_MONETARY_MAGNITUDE)
}
