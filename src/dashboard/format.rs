//! Display formatting for metric values.

use rust_decimal::{Decimal, RoundingStrategy};

/// Whole-unit currency amount with thousands separators: `$65,000`.
/// Halves round to even. Negative amounts render as `$-1,234`.
pub fn format_currency(amount: Decimal, symbol: &str) -> String {
    let rounded = amount.round_dp_with_strategy(0, RoundingStrategy::MidpointNearestEven);
    let digits = rounded.abs().trunc().to_string();
    let sign = if rounded.is_sign_negative() && !rounded.is_zero() {
        "-"
    } else {
        ""
    };

    format!("{}{}{}", symbol, sign, group_thousands(&digits))
}

/// Symbol for the quote currencies the dashboard is expected to show.
pub fn currency_symbol(currency: &str) -> String {
    match currency.to_lowercase().as_str() {
        "usd" => "$".to_string(),
        "eur" => "€".to_string(),
        "gbp" => "£".to_string(),
        "jpy" => "¥".to_string(),
        other => format!("{} ", other.to_uppercase()),
    }
}

fn group_thousands(digits: &str) -> String {
    let len = digits.len();
    let mut grouped = String::with_capacity(len + len / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_thousands_separators() {
        assert_eq!(format_currency(dec!(65000), "$"), "$65,000");
        assert_eq!(format_currency(dec!(3200), "$"), "$3,200");
        assert_eq!(format_currency(dec!(999), "$"), "$999");
        assert_eq!(format_currency(dec!(1234567), "$"), "$1,234,567");
        assert_eq!(format_currency(dec!(0), "$"), "$0");
    }

    #[test]
    fn test_zero_decimals_half_even() {
        assert_eq!(format_currency(dec!(3200.49), "$"), "$3,200");
        assert_eq!(format_currency(dec!(3200.51), "$"), "$3,201");
        assert_eq!(format_currency(dec!(2.5), "$"), "$2");
        assert_eq!(format_currency(dec!(3.5), "$"), "$4");
    }

    #[test]
    fn test_negative_and_tiny() {
        assert_eq!(format_currency(dec!(-1234.4), "$"), "$-1,234");
        assert_eq!(format_currency(dec!(-0.4), "$"), "$0");
        assert_eq!(format_currency(dec!(0.00001234), "$"), "$0");
    }

    #[test]
    fn test_currency_symbol() {
        assert_eq!(currency_symbol("usd"), "$");
        assert_eq!(currency_symbol("EUR"), "€");
        assert_eq!(currency_symbol("chf"), "CHF ");
    }
}
