//! Annual leave entitlement under the Labor Standards Act.
//!
//! # Accrual rules
//!
//! | Completed months | Entitlement |
//! |------------------|-------------|
//! | 0                | 0 days |
//! | 1 to 11          | 1 day per completed month |
//! | 12 or more       | 15 days, +1 per additional full year, capped at 25 |
//!
//! Completed months are counted from the calendar year and month of the two
//! dates only. The day of month is ignored, so a join date of the 31st and a
//! base date of the 1st of the next month already count as one month.
//!
//! # Example
//!
//! ```
//! use chrono::NaiveDate;
//! use labor_core::calculations::compute_annual_leave;
//!
//! let join = NaiveDate::from_ymd_opt(2021, 3, 2).unwrap();
//! let base = NaiveDate::from_ymd_opt(2024, 3, 2).unwrap();
//!
//! let result = compute_annual_leave(join, base, 5);
//!
//! assert_eq!(result.total_entitled_days, 17);
//! assert_eq!(result.available_days, 12);
//! assert_eq!(result.work_period.years, 3);
//! ```

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::CalculationError;
use crate::models::{AnnualLeaveInput, AnnualLeaveResult, LeaveWorkPeriod};

/// Statutory constants for leave accrual after the first year.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnnualLeavePolicy {
    /// Days granted once a full year of service is reached.
    pub base_days: u32,

    /// Extra days per additional full year of service.
    pub additional_days_per_year: u32,

    /// Upper bound on the yearly entitlement.
    pub max_days: u32,
}

impl Default for AnnualLeavePolicy {
    fn default() -> Self {
        Self {
            base_days: 15,
            additional_days_per_year: 1,
            max_days: 25,
        }
    }
}

impl AnnualLeavePolicy {
    /// # Errors
    ///
    /// Returns [`CalculationError`] if `base_days` is zero or `max_days` is
    /// below `base_days`.
    pub fn validate(&self) -> Result<(), CalculationError> {
        if self.base_days == 0 {
            return Err(CalculationError::InvalidLeaveBase);
        }
        if self.max_days < self.base_days {
            return Err(CalculationError::InvalidLeaveCap {
                base_days: self.base_days,
                max_days: self.max_days,
            });
        }
        Ok(())
    }

    /// Entitlement for a given number of completed months.
    pub fn entitlement(
        &self,
        months_elapsed: i64,
    ) -> u32 {
        if months_elapsed < 1 {
            return 0;
        }
        if months_elapsed < 12 {
            return months_elapsed as u32;
        }
        let extra_years = (months_elapsed - 12) / 12;
        let extra_days = extra_years.saturating_mul(i64::from(self.additional_days_per_year));
        let total = i64::from(self.base_days).saturating_add(extra_days);
        total.min(i64::from(self.max_days)) as u32
    }
}

/// Calendar months between two dates, ignoring the day of month.
///
/// Negative when `base` falls in an earlier month than `join`.
pub fn months_elapsed(
    join: NaiveDate,
    base: NaiveDate,
) -> i64 {
    let years = i64::from(base.year()) - i64::from(join.year());
    let months = i64::from(base.month()) - i64::from(join.month());
    years * 12 + months
}

#[derive(Debug, Clone, Default)]
pub struct AnnualLeaveCalculator {
    policy: AnnualLeavePolicy,
}

impl AnnualLeaveCalculator {
    pub fn new(policy: AnnualLeavePolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> &AnnualLeavePolicy {
        &self.policy
    }

    /// Calculates entitlement and remaining days as of `base_date`.
    ///
    /// A base date before the join date yields zero entitlement and a zero
    /// work period.
    ///
    /// # Errors
    ///
    /// Returns [`CalculationError`] if the policy is invalid.
    pub fn calculate(
        &self,
        join_date: NaiveDate,
        base_date: NaiveDate,
        used_leave_days: u32,
    ) -> Result<AnnualLeaveResult, CalculationError> {
        self.policy.validate()?;
        Ok(self.calculate_unchecked(join_date, base_date, used_leave_days))
    }

    fn calculate_unchecked(
        &self,
        join_date: NaiveDate,
        base_date: NaiveDate,
        used_leave_days: u32,
    ) -> AnnualLeaveResult {
        let mut months = months_elapsed(join_date, base_date);
        if months < 0 {
            warn!(
                join_date = %join_date,
                base_date = %base_date,
                "base date precedes join date; entitlement clamped to zero"
            );
            months = 0;
        }

        let total_entitled_days = self.policy.entitlement(months);
        let available_days = total_entitled_days.saturating_sub(used_leave_days);
        let work_period = LeaveWorkPeriod {
            years: (months / 12) as u32,
            months: (months % 12) as u32,
        };

        debug!(
            months,
            total_entitled_days, used_leave_days, available_days, "annual leave computed"
        );

        AnnualLeaveResult {
            input: AnnualLeaveInput {
                join_date,
                base_date,
                used_leave_days,
            },
            total_entitled_days,
            used_days: used_leave_days,
            available_days,
            work_period,
        }
    }
}

/// Annual leave with the statutory default policy.
pub fn compute_annual_leave(
    join_date: NaiveDate,
    base_date: NaiveDate,
    used_leave_days: u32,
) -> AnnualLeaveResult {
    AnnualLeaveCalculator::default().calculate_unchecked(join_date, base_date, used_leave_days)
}
