//! Display formatting and permissive numeric parsing for form fields.
//!
//! Amounts are shown with comma thousands separators and a `원` suffix.
//! Parsing follows the forgiving rules of the calculator forms: commas are
//! ignored, only the leading integer is read, and anything unreadable counts
//! as zero.

use std::sync::OnceLock;

use regex::Regex;
use rust_decimal::Decimal;
use tracing::warn;

/// Formats a number with comma thousands separators.
///
/// The fractional part is truncated; currency is always shown in whole won.
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use labor_core::format::format_currency;
///
/// assert_eq!(format_currency(dec!(1234567)), "1,234,567");
/// assert_eq!(format_currency(dec!(999.99)), "999");
/// assert_eq!(format_currency(dec!(-4500)), "-4,500");
/// ```
pub fn format_currency(value: Decimal) -> String {
    let whole = value.trunc().normalize();
    let negative = whole.is_sign_negative() && !whole.is_zero();
    let digits = whole.abs().to_string();

    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if negative {
        grouped.push('-');
    }
    for (idx, ch) in digits.chars().enumerate() {
        if idx > 0 && (digits.len() - idx) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped
}

/// `1,500,000원`
pub fn format_won(value: Decimal) -> String {
    format!("{}원", format_currency(value))
}

/// Amount in units of ten thousand won, floored: `270246575` → `27024만원`.
pub fn format_man_won(value: Decimal) -> String {
    let man = (value / Decimal::from(10_000)).floor().normalize();
    format!("{}만원", man)
}

/// `12일`
pub fn format_days(days: u32) -> String {
    format!("{days}일")
}

fn leading_integer() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^\s*(-?\d+)").expect("static pattern"))
}

fn leading_number() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^\s*(-?\d+(?:\.\d+)?)").expect("static pattern"))
}

/// Parses a currency field: commas removed, leading integer taken.
///
/// Returns `None` when the field is empty or has no leading digits.
/// `"15,000원"` parses as `15000`.
pub fn parse_amount(s: &str) -> Option<Decimal> {
    let normalized = s.replace(',', "");
    let caps = leading_integer().captures(&normalized)?;
    caps[1].parse().ok()
}

/// Like [`parse_amount`] but also keeps a decimal fraction, for hour fields.
pub fn parse_hours(s: &str) -> Option<Decimal> {
    let normalized = s.replace(',', "");
    let caps = leading_number().captures(&normalized)?;
    caps[1].parse().ok()
}

/// Parses an optional numeric field, treating empty or unreadable input as zero.
///
/// Non-empty input that cannot be read is logged.
pub fn parse_amount_or_zero(s: &str) -> Decimal {
    parse_or_zero(s, parse_amount)
}

/// Hour-field variant of [`parse_amount_or_zero`].
pub fn parse_hours_or_zero(s: &str) -> Decimal {
    parse_or_zero(s, parse_hours)
}

fn parse_or_zero(
    s: &str,
    parse: fn(&str) -> Option<Decimal>,
) -> Decimal {
    if s.trim().is_empty() {
        return Decimal::ZERO;
    }
    parse(s).unwrap_or_else(|| {
        warn!(input = %s, "unreadable numeric input; treating as zero");
        Decimal::ZERO
    })
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    #[test]
    fn format_currency_groups_thousands() {
        assert_eq!(format_currency(dec!(0)), "0");
        assert_eq!(format_currency(dec!(999)), "999");
        assert_eq!(format_currency(dec!(1000)), "1,000");
        assert_eq!(format_currency(dec!(270246575)), "270,246,575");
    }

    #[test]
    fn format_currency_truncates_fraction() {
        assert_eq!(format_currency(dec!(1500.5)), "1,500");
        assert_eq!(format_currency(dec!(-0.4)), "0");
    }

    #[test]
    fn format_won_appends_suffix() {
        assert_eq!(format_won(dec!(310000)), "310,000원");
    }

    #[test]
    fn format_man_won_floors_to_ten_thousands() {
        assert_eq!(format_man_won(dec!(270246575)), "27024만원");
        assert_eq!(format_man_won(dec!(9999)), "0만원");
    }

    #[test]
    fn parse_amount_strips_commas_and_suffix() {
        assert_eq!(parse_amount("15,000원"), Some(dec!(15000)));
        assert_eq!(parse_amount("  3,000,000 "), Some(dec!(3000000)));
    }

    #[test]
    fn parse_amount_takes_leading_integer_only() {
        assert_eq!(parse_amount("12.9"), Some(dec!(12)));
        assert_eq!(parse_amount("7days"), Some(dec!(7)));
    }

    #[test]
    fn parse_amount_rejects_text_without_digits() {
        assert_eq!(parse_amount(""), None);
        assert_eq!(parse_amount("abc"), None);
    }

    #[test]
    fn parse_hours_keeps_fraction() {
        assert_eq!(parse_hours("2.5"), Some(dec!(2.5)));
        assert_eq!(parse_hours("10시간"), Some(dec!(10)));
    }

    #[test]
    fn parse_or_zero_defaults_unreadable_input() {
        assert_eq!(parse_amount_or_zero(""), Decimal::ZERO);
        assert_eq!(parse_amount_or_zero("n/a"), Decimal::ZERO);
        assert_eq!(parse_hours_or_zero("x1"), Decimal::ZERO);
        assert_eq!(parse_hours_or_zero("1.25"), dec!(1.25));
    }
}
