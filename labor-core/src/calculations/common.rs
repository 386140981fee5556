//! Common helpers shared by the calculators.

use rust_decimal::Decimal;

use super::CalculationError;

/// Floors `numerator / denominator` to a whole amount.
///
/// Callers pass exact integer operands so the floor is taken on the true
/// quotient, not on a rounded intermediate.
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use labor_core::calculations::common::floor_div;
///
/// assert_eq!(floor_div(dec!(98640000000), dec!(365)), Some(dec!(270246575)));
/// assert_eq!(floor_div(dec!(10), dec!(0)), None);
/// ```
pub fn floor_div(
    numerator: Decimal,
    denominator: Decimal,
) -> Option<Decimal> {
    numerator
        .checked_div(denominator)
        .map(|q| q.floor().normalize())
}

/// Rejects negative money or hour inputs.
pub fn ensure_non_negative(
    field: &'static str,
    value: Decimal,
) -> Result<Decimal, CalculationError> {
    if value.is_sign_negative() && !value.is_zero() {
        return Err(CalculationError::NegativeInput { field, value });
    }
    Ok(value)
}

/// Multiplies a chain of factors, reporting overflow against `what`.
pub fn checked_product(
    what: &'static str,
    factors: &[Decimal],
) -> Result<Decimal, CalculationError> {
    factors
        .iter()
        .try_fold(Decimal::ONE, |acc, f| acc.checked_mul(*f))
        .ok_or(CalculationError::Overflow(what))
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    // =========================================================================
    // floor_div tests
    // =========================================================================

    #[test]
    fn floor_div_truncates_toward_negative_infinity() {
        assert_eq!(floor_div(dec!(7), dec!(2)), Some(dec!(3)));
        assert_eq!(floor_div(dec!(-7), dec!(2)), Some(dec!(-4)));
    }

    #[test]
    fn floor_div_keeps_exact_quotients() {
        assert_eq!(floor_div(dec!(730), dec!(365)), Some(dec!(2)));
    }

    #[test]
    fn floor_div_returns_none_for_zero_denominator() {
        assert_eq!(floor_div(dec!(1), Decimal::ZERO), None);
    }

    // =========================================================================
    // ensure_non_negative / checked_product tests
    // =========================================================================

    #[test]
    fn ensure_non_negative_accepts_zero_and_positive() {
        assert_eq!(ensure_non_negative("rate", dec!(0)), Ok(dec!(0)));
        assert_eq!(ensure_non_negative("rate", dec!(12.5)), Ok(dec!(12.5)));
    }

    #[test]
    fn ensure_non_negative_rejects_negative() {
        assert_eq!(
            ensure_non_negative("rate", dec!(-1)),
            Err(CalculationError::NegativeInput {
                field: "rate",
                value: dec!(-1),
            })
        );
    }

    #[test]
    fn checked_product_multiplies_all_factors() {
        assert_eq!(
            checked_product("pay", &[dec!(10), dec!(10000), dec!(1.5)]),
            Ok(dec!(150000.0))
        );
    }

    #[test]
    fn checked_product_reports_overflow() {
        assert_eq!(
            checked_product("pay", &[Decimal::MAX, dec!(2)]),
            Err(CalculationError::Overflow("pay"))
        );
    }
}
