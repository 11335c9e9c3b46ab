use rust_decimal::{Decimal, RoundingStrategy};

/// Parse a cell as a number.
///
/// Handles formats like:
/// - "5" -> 5.0
/// - " 12.5 " -> 12.5
/// - "1e3" -> 1000.0
/// - "" / "abc" / "1,5" -> None
pub fn parse_number(s: &str) -> Option<f64> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }
    s.parse::<f64>().ok()
}

/// Coerce an optional cell to a number, treating missing or non-numeric
/// content as zero.
pub fn coerce_number(cell: Option<&str>) -> f64 {
    cell.and_then(parse_number)
        .filter(|v| !v.is_nan())
        .unwrap_or(0.0)
}

/// Coerce a Part ID cell to an integer. Unknown part ids become zero and
/// fractional ids are truncated.
pub fn coerce_part_id(cell: Option<&str>) -> i64 {
    match cell.and_then(parse_number) {
        Some(v) if v.is_finite() => v.trunc() as i64,
        _ => 0,
    }
}

/// Round to `dp` decimal places, ties to even, on the exact binary value of
/// the input (so 2.675 rounds to 2.67, as its f64 is slightly below 2.675).
pub fn round_dp(value: f64, dp: u32) -> f64 {
    match round_half_even(value, dp) {
        Some(d) => d.to_string().parse().unwrap_or(value),
        None => value,
    }
}

fn round_half_even(value: f64, dp: u32) -> Option<Decimal> {
    let exact = Decimal::from_f64_retain(value)?;
    Some(exact.round_dp_with_strategy(dp, RoundingStrategy::MidpointNearestEven))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_parse_integer() {
        assert_eq!(parse_number("5"), Some(5.0));
    }

    #[test]
    fn test_parse_whitespace_and_exponent() {
        assert_eq!(parse_number("  12.5 "), Some(12.5));
        assert_eq!(parse_number("1e3"), Some(1000.0));
    }

    #[test]
    fn test_parse_rejects_text() {
        assert_eq!(parse_number(""), None);
        assert_eq!(parse_number("abc"), None);
        assert_eq!(parse_number("1,5"), None);
    }

    #[test]
    fn test_coerce_number_defaults_to_zero() {
        assert_eq!(coerce_number(Some("7")), 7.0);
        assert_eq!(coerce_number(Some("seven")), 0.0);
        assert_eq!(coerce_number(Some("nan")), 0.0);
        assert_eq!(coerce_number(None), 0.0);
    }

    #[test]
    fn test_coerce_part_id() {
        assert_eq!(coerce_part_id(Some("1042")), 1042);
        assert_eq!(coerce_part_id(Some("12.7")), 12);
        assert_eq!(coerce_part_id(Some("A-12")), 0);
        assert_eq!(coerce_part_id(Some("inf")), 0);
        assert_eq!(coerce_part_id(None), 0);
    }

    #[test]
    fn test_round_half_even_uses_binary_value() {
        assert_eq!(round_half_even(65.92, 3), Some(dec!(65.920)));
        assert_eq!(round_half_even(2.675, 2), Some(dec!(2.67)));
        assert_eq!(round_half_even(0.5, 0), Some(dec!(0)));
    }

    #[test]
    fn test_round_dp() {
        assert_eq!(round_dp(32.96 * 2.0 / 1.0, 3), 65.92);
        assert_eq!(round_dp(32.0 * 1.0 / 3.0, 3), 10.667);
        assert_eq!(round_dp(5.0 / 3.0, 3), 1.667);
    }
}
