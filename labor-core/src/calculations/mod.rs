//! Labor-law calculators.
//!
//! Each calculator pairs a validated policy (the statutory constants) with a
//! pure `calculate` method. [`LaborCalculator`] bundles the three policies and
//! dispatches on [`CalculationInput`].

pub mod annual_leave;
pub mod common;
pub mod overtime;
pub mod severance;

use rust_decimal::Decimal;
use thiserror::Error;

pub use annual_leave::{AnnualLeaveCalculator, AnnualLeavePolicy, compute_annual_leave};
pub use overtime::{OvertimeCalculator, OvertimeRates, compute_overtime_pay};
pub use severance::{SeveranceCalculator, SeverancePolicy, compute_severance_pay};

use crate::models::{CalculationInput, CalculationResult};

/// Errors raised by the calculators and their policies.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CalculationError {
    /// The leave cap must not be lower than the one-year base entitlement.
    #[error("annual leave cap {max_days} is below the base entitlement {base_days}")]
    InvalidLeaveCap { base_days: u32, max_days: u32 },

    /// The one-year base entitlement must be positive.
    #[error("annual leave base entitlement must be positive")]
    InvalidLeaveBase,

    /// Days per service year must be positive.
    #[error("days per service year must be positive, got {0}")]
    InvalidDaysPerYear(u32),

    /// Wage days per service year must be positive.
    #[error("wage days per service year must be positive, got {0}")]
    InvalidWageDays(u32),

    /// A premium multiplier was outside `[1, 10]`.
    #[error("{name} multiplier must be between 1 and 10, got {value}")]
    InvalidMultiplier { name: &'static str, value: Decimal },

    /// The holiday tier threshold must be non-negative.
    #[error("holiday threshold must be non-negative, got {0}")]
    InvalidHolidayThreshold(Decimal),

    /// A money or hour input was negative.
    #[error("{field} must be non-negative, got {value}")]
    NegativeInput { field: &'static str, value: Decimal },

    /// Intermediate arithmetic exceeded the decimal range.
    #[error("arithmetic overflow while computing {0}")]
    Overflow(&'static str),
}

/// All three calculators with their policies.
///
/// `LaborCalculator::default()` uses the statutory defaults.
#[derive(Debug, Clone, Default)]
pub struct LaborCalculator {
    pub annual_leave: AnnualLeaveCalculator,
    pub severance: SeveranceCalculator,
    pub overtime: OvertimeCalculator,
}

impl LaborCalculator {
    /// Runs the calculator matching the input variant.
    pub fn calculate(
        &self,
        input: &CalculationInput,
    ) -> Result<CalculationResult, CalculationError> {
        match input {
            CalculationInput::AnnualLeave(i) => self
                .annual_leave
                .calculate(i.join_date, i.base_date, i.used_leave_days)
                .map(CalculationResult::AnnualLeave),
            CalculationInput::SeverancePay(i) => self
                .severance
                .calculate(
                    i.join_date,
                    i.leave_date,
                    i.monthly_base_salary,
                    i.annual_bonus,
                )
                .map(CalculationResult::SeverancePay),
            CalculationInput::OvertimePay(i) => self
                .overtime
                .calculate(
                    i.hourly_rate,
                    i.overtime_hours,
                    i.night_hours,
                    i.holiday_hours,
                )
                .map(CalculationResult::OvertimePay),
        }
    }
}
