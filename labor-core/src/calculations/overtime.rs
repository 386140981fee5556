//! Overtime, night and holiday work allowances.
//!
//! | Category | Premium |
//! |----------|---------|
//! | Extended (overtime) hours | 1.5 × hourly rate |
//! | Night hours (22:00 to 06:00) | 1.5 × hourly rate |
//! | Holiday hours, first 8 | 1.5 × hourly rate |
//! | Holiday hours beyond 8 | 2.0 × hourly rate |
//!
//! Amounts are exact decimals; nothing is rounded.
//!
//! # Example
//!
//! ```
//! use rust_decimal_macros::dec;
//! use labor_core::calculations::compute_overtime_pay;
//!
//! let result = compute_overtime_pay(dec!(10000), dec!(10), dec!(0), dec!(10)).unwrap();
//!
//! assert_eq!(result.breakdown.overtime, dec!(150000));
//! assert_eq!(result.breakdown.holiday, dec!(160000));
//! assert_eq!(result.total_allowance, dec!(310000));
//! ```

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::CalculationError;
use super::common::{checked_product, ensure_non_negative};
use crate::models::{OvertimeBreakdown, OvertimeHours, OvertimePayInput, OvertimePayResult};

/// Premium multipliers and the holiday tier boundary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OvertimeRates {
    pub overtime_multiplier: Decimal,
    pub night_multiplier: Decimal,
    /// Applied to holiday hours up to `holiday_threshold_hours`.
    pub holiday_multiplier: Decimal,
    /// Applied to holiday hours beyond `holiday_threshold_hours`.
    pub holiday_extended_multiplier: Decimal,
    pub holiday_threshold_hours: Decimal,
}

impl Default for OvertimeRates {
    fn default() -> Self {
        Self {
            overtime_multiplier: Decimal::new(15, 1),
            night_multiplier: Decimal::new(15, 1),
            holiday_multiplier: Decimal::new(15, 1),
            holiday_extended_multiplier: Decimal::TWO,
            holiday_threshold_hours: Decimal::from(8),
        }
    }
}

impl OvertimeRates {
    /// # Errors
    ///
    /// Returns [`CalculationError`] if a multiplier is outside `[1, 10]` or
    /// the holiday threshold is negative.
    pub fn validate(&self) -> Result<(), CalculationError> {
        let upper = Decimal::TEN;
        let multipliers = [
            ("overtime", self.overtime_multiplier),
            ("night", self.night_multiplier),
            ("holiday", self.holiday_multiplier),
            ("extended holiday", self.holiday_extended_multiplier),
        ];
        for (name, value) in multipliers {
            if value < Decimal::ONE || value > upper {
                return Err(CalculationError::InvalidMultiplier { name, value });
            }
        }
        if self.holiday_threshold_hours < Decimal::ZERO {
            return Err(CalculationError::InvalidHolidayThreshold(
                self.holiday_threshold_hours,
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Default)]
pub struct OvertimeCalculator {
    rates: OvertimeRates,
}

impl OvertimeCalculator {
    pub fn new(rates: OvertimeRates) -> Self {
        Self { rates }
    }

    pub fn rates(&self) -> &OvertimeRates {
        &self.rates
    }

    /// Calculates the allowance for each category and their total.
    ///
    /// # Errors
    ///
    /// Returns [`CalculationError`] if the rates are invalid, any input is
    /// negative, or a product overflows.
    pub fn calculate(
        &self,
        hourly_rate: Decimal,
        overtime_hours: Decimal,
        night_hours: Decimal,
        holiday_hours: Decimal,
    ) -> Result<OvertimePayResult, CalculationError> {
        self.rates.validate()?;
        let rate = ensure_non_negative("hourly rate", hourly_rate)?;
        let overtime_h = ensure_non_negative("overtime hours", overtime_hours)?;
        let night_h = ensure_non_negative("night hours", night_hours)?;
        let holiday_h = ensure_non_negative("holiday hours", holiday_hours)?;

        let overtime = checked_product(
            "overtime pay",
            &[overtime_h, rate, self.rates.overtime_multiplier],
        )?;
        let night = checked_product("night pay", &[night_h, rate, self.rates.night_multiplier])?;
        let holiday = self.holiday_pay(rate, holiday_h)?;

        let total_allowance = overtime
            .checked_add(night)
            .and_then(|sum| sum.checked_add(holiday))
            .ok_or(CalculationError::Overflow("total allowance"))?;

        debug!(
            total_allowance = %total_allowance,
            overtime = %overtime,
            night = %night,
            holiday = %holiday,
            "overtime allowance computed"
        );

        Ok(OvertimePayResult {
            input: OvertimePayInput {
                hourly_rate,
                overtime_hours,
                night_hours,
                holiday_hours,
            },
            total_allowance,
            breakdown: OvertimeBreakdown {
                overtime,
                night,
                holiday,
            },
            hours: OvertimeHours {
                overtime: overtime_h,
                night: night_h,
                holiday: holiday_h,
            },
            hourly_rate: rate,
        })
    }

    /// Tiered holiday pay: the base premium up to the threshold, the extended
    /// premium for every hour past it.
    fn holiday_pay(
        &self,
        rate: Decimal,
        hours: Decimal,
    ) -> Result<Decimal, CalculationError> {
        let threshold = self.rates.holiday_threshold_hours;
        if hours <= threshold {
            return checked_product("holiday pay", &[hours, rate, self.rates.holiday_multiplier]);
        }
        let within = checked_product(
            "holiday pay",
            &[threshold, rate, self.rates.holiday_multiplier],
        )?;
        let beyond = checked_product(
            "holiday pay",
            &[
                hours - threshold,
                rate,
                self.rates.holiday_extended_multiplier,
            ],
        )?;
        within
            .checked_add(beyond)
            .ok_or(CalculationError::Overflow("holiday pay"))
    }
}

/// Overtime allowance with the statutory default premiums.
///
/// # Errors
///
/// See [`OvertimeCalculator::calculate`].
pub fn compute_overtime_pay(
    hourly_rate: Decimal,
    overtime_hours: Decimal,
    night_hours: Decimal,
    holiday_hours: Decimal,
) -> Result<OvertimePayResult, CalculationError> {
    OvertimeCalculator::default().calculate(hourly_rate, overtime_hours, night_hours, holiday_hours)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    #[test]
    fn worked_example_totals_three_hundred_ten_thousand() {
        let result = compute_overtime_pay(dec!(10000), dec!(10), dec!(0), dec!(10)).unwrap();

        assert_eq!(result.breakdown.overtime, dec!(150000));
        assert_eq!(result.breakdown.night, dec!(0));
        // 8 * 10,000 * 1.5 + 2 * 10,000 * 2
        assert_eq!(result.breakdown.holiday, dec!(160000));
        assert_eq!(result.total_allowance, dec!(310000));
    }

    #[test]
    fn holiday_hours_at_threshold_use_base_premium() {
        let result = compute_overtime_pay(dec!(10000), dec!(0), dec!(0), dec!(8)).unwrap();

        assert_eq!(result.breakdown.holiday, dec!(120000));
    }

    #[test]
    fn night_hours_use_night_premium() {
        let result = compute_overtime_pay(dec!(9860), dec!(0), dec!(4), dec!(0)).unwrap();

        assert_eq!(result.breakdown.night, dec!(59160));
        assert_eq!(result.total_allowance, dec!(59160));
    }

    #[test]
    fn fractional_hours_are_kept_exact() {
        let result = compute_overtime_pay(dec!(10001), dec!(0.5), dec!(0), dec!(0)).unwrap();

        assert_eq!(result.breakdown.overtime, dec!(7500.75));
    }

    #[test]
    fn total_equals_sum_of_breakdown() {
        let result = compute_overtime_pay(dec!(12345), dec!(7), dec!(3), dec!(11)).unwrap();
        let b = &result.breakdown;

        assert_eq!(result.total_allowance, b.overtime + b.night + b.holiday);
    }

    #[test]
    fn zero_hours_yield_zero_allowance() {
        let result = compute_overtime_pay(dec!(10000), dec!(0), dec!(0), dec!(0)).unwrap();

        assert_eq!(result.total_allowance, dec!(0));
        assert_eq!(result.hourly_rate, dec!(10000));
    }

    #[test]
    fn negative_hours_are_rejected() {
        let result = compute_overtime_pay(dec!(10000), dec!(-2), dec!(0), dec!(0));

        assert_eq!(
            result,
            Err(CalculationError::NegativeInput {
                field: "overtime hours",
                value: dec!(-2),
            })
        );
    }

    #[test]
    fn rates_reject_multiplier_below_one() {
        let rates = OvertimeRates {
            night_multiplier: dec!(0.5),
            ..OvertimeRates::default()
        };

        assert_eq!(
            rates.validate(),
            Err(CalculationError::InvalidMultiplier {
                name: "night",
                value: dec!(0.5),
            })
        );
    }

    #[test]
    fn custom_threshold_moves_tier_boundary() {
        let calc = OvertimeCalculator::new(OvertimeRates {
            holiday_threshold_hours: dec!(4),
            ..OvertimeRates::default()
        });

        let result = calc.calculate(dec!(10000), dec!(0), dec!(0), dec!(6)).unwrap();

        // 4 * 15,000 + 2 * 20,000
        assert_eq!(result.breakdown.holiday, dec!(100000));
    }
}
