//! Statutory severance pay.
//!
//! Severance is 30 days of average wage per year of service, pro-rated by
//! calendar days:
//!
//! ```text
//! average_monthly_wage = monthly_base_salary + annual_bonus / 12
//! amount               = floor(average_monthly_wage * 30 * work_days / 365)
//! ```
//!
//! All floors are taken on the exact quotient. The numerator is built from
//! integer-valued decimals and divided once, so a result such as
//! `floor(3,000,000 * 30 * 1096 / 365)` is never off by one because of an
//! inexact `work_days / 365` intermediate.
//!
//! # Example
//!
//! ```
//! use chrono::NaiveDate;
//! use rust_decimal_macros::dec;
//! use labor_core::calculations::compute_severance_pay;
//!
//! let result = compute_severance_pay(
//!     NaiveDate::from_ymd_opt(2020, 1, 1).unwrap(),
//!     NaiveDate::from_ymd_opt(2023, 1, 1).unwrap(),
//!     dec!(3000000),
//!     dec!(0),
//! )
//! .unwrap();
//!
//! assert_eq!(result.work_period.days, 1096);
//! assert_eq!(result.amount, dec!(270246575));
//! ```

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::CalculationError;
use super::common::{checked_product, ensure_non_negative, floor_div};
use crate::models::{SeveranceBreakdown, SeverancePayInput, SeverancePayResult, ServicePeriod};

const MONTHS_PER_YEAR: u32 = 12;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeverancePolicy {
    /// Calendar days that make up one year of service.
    pub days_per_year: u32,

    /// Days of average wage paid per year of service.
    pub wage_days_per_year: u32,
}

impl Default for SeverancePolicy {
    fn default() -> Self {
        Self {
            days_per_year: 365,
            wage_days_per_year: 30,
        }
    }
}

impl SeverancePolicy {
    /// # Errors
    ///
    /// Returns [`CalculationError`] if either constant is zero.
    pub fn validate(&self) -> Result<(), CalculationError> {
        if self.days_per_year == 0 {
            return Err(CalculationError::InvalidDaysPerYear(self.days_per_year));
        }
        if self.wage_days_per_year == 0 {
            return Err(CalculationError::InvalidWageDays(self.wage_days_per_year));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Default)]
pub struct SeveranceCalculator {
    policy: SeverancePolicy,
}

impl SeveranceCalculator {
    pub fn new(policy: SeverancePolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> &SeverancePolicy {
        &self.policy
    }

    /// Calculates severance for the period `[join_date, leave_date)`.
    ///
    /// A leave date before the join date is clamped to zero service days, so
    /// the amount is zero rather than negative.
    ///
    /// # Errors
    ///
    /// Returns [`CalculationError`] if the policy is invalid, if salary or
    /// bonus is negative, or if the amount overflows.
    pub fn calculate(
        &self,
        join_date: NaiveDate,
        leave_date: NaiveDate,
        monthly_base_salary: Decimal,
        annual_bonus: Decimal,
    ) -> Result<SeverancePayResult, CalculationError> {
        self.policy.validate()?;
        let salary = ensure_non_negative("monthly base salary", monthly_base_salary)?;
        let bonus = ensure_non_negative("annual bonus", annual_bonus)?;

        let work_days = self.work_days(join_date, leave_date);
        let days = Decimal::from(work_days);
        let wage_days = Decimal::from(self.policy.wage_days_per_year);
        let days_per_year = Decimal::from(self.policy.days_per_year);
        let months = Decimal::from(MONTHS_PER_YEAR);

        // (salary * 12 + bonus) / 12 is the average monthly wage.
        let yearly_wage = salary
            .checked_mul(months)
            .and_then(|s| s.checked_add(bonus))
            .ok_or(CalculationError::Overflow("yearly wage"))?;

        let amount_numerator = checked_product("severance amount", &[yearly_wage, wage_days, days])?;
        let amount = floor_div(amount_numerator, months * days_per_year)
            .ok_or(CalculationError::Overflow("severance amount"))?;

        let base_numerator = checked_product("base salary component", &[salary, wage_days, days])?;
        let base_salary_component = floor_div(base_numerator, days_per_year)
            .ok_or(CalculationError::Overflow("base salary component"))?;

        let bonus_numerator = checked_product("bonus component", &[bonus, wage_days, days])?;
        let bonus_component = floor_div(bonus_numerator, months * days_per_year)
            .ok_or(CalculationError::Overflow("bonus component"))?;

        let average_monthly_wage = salary
            .checked_add(bonus / months)
            .ok_or(CalculationError::Overflow("average monthly wage"))?;
        let work_period = self.service_period(work_days);

        debug!(
            work_days,
            amount = %amount,
            average_monthly_wage = %average_monthly_wage,
            "severance computed"
        );

        Ok(SeverancePayResult {
            input: SeverancePayInput {
                join_date,
                leave_date,
                monthly_base_salary,
                annual_bonus,
            },
            amount,
            work_period,
            average_monthly_wage,
            breakdown: SeveranceBreakdown {
                base_salary_component,
                bonus_component,
            },
        })
    }

    /// Whole days from join to leave, clamped at zero.
    fn work_days(
        &self,
        join_date: NaiveDate,
        leave_date: NaiveDate,
    ) -> u32 {
        let days = (leave_date - join_date).num_days();
        if days < 0 {
            warn!(
                join_date = %join_date,
                leave_date = %leave_date,
                days,
                "leave date precedes join date; severance clamped to zero"
            );
            return 0;
        }
        u32::try_from(days).unwrap_or(u32::MAX)
    }

    /// Splits service days into whole years and the whole months of the
    /// remaining fraction of a year.
    fn service_period(
        &self,
        work_days: u32,
    ) -> ServicePeriod {
        let per_year = self.policy.days_per_year;
        let remainder = work_days % per_year;
        ServicePeriod {
            days: work_days,
            years: work_days / per_year,
            months: ((u64::from(remainder) * u64::from(MONTHS_PER_YEAR)) / u64::from(per_year))
                as u32,
        }
    }
}

/// Severance with the statutory default policy.
///
/// # Errors
///
/// See [`SeveranceCalculator::calculate`].
pub fn compute_severance_pay(
    join_date: NaiveDate,
    leave_date: NaiveDate,
    monthly_base_salary: Decimal,
    annual_bonus: Decimal,
) -> Result<SeverancePayResult, CalculationError> {
    SeveranceCalculator::default().calculate(join_date, leave_date, monthly_base_salary, annual_bonus)
}
