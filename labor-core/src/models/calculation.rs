use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::CalculatorKind;
use crate::format::{format_days, format_won};

// ---------------------------------------------------------------------------
// Inputs
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnnualLeaveInput {
    pub join_date: NaiveDate,
    pub base_date: NaiveDate,
    pub used_leave_days: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeverancePayInput {
    pub join_date: NaiveDate,
    pub leave_date: NaiveDate,
    /// Monthly base salary in won, before tax.
    pub monthly_base_salary: Decimal,
    /// Total bonuses paid over the last year, in won.
    pub annual_bonus: Decimal,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OvertimePayInput {
    pub hourly_rate: Decimal,
    pub overtime_hours: Decimal,
    pub night_hours: Decimal,
    pub holiday_hours: Decimal,
}

impl OvertimePayInput {
    /// Sum of all extra hours, as entered.
    pub fn total_hours(&self) -> Decimal {
        self.overtime_hours + self.night_hours + self.holiday_hours
    }
}

/// Validated input for one of the calculators.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "calculator", rename_all = "kebab-case")]
pub enum CalculationInput {
    AnnualLeave(AnnualLeaveInput),
    SeverancePay(SeverancePayInput),
    OvertimePay(OvertimePayInput),
}

impl CalculationInput {
    pub fn kind(&self) -> CalculatorKind {
        match self {
            Self::AnnualLeave(_) => CalculatorKind::AnnualLeave,
            Self::SeverancePay(_) => CalculatorKind::SeverancePay,
            Self::OvertimePay(_) => CalculatorKind::OvertimePay,
        }
    }
}

// ---------------------------------------------------------------------------
// Results
// ---------------------------------------------------------------------------

/// Tenure as whole years plus remaining months.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaveWorkPeriod {
    pub years: u32,
    pub months: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnnualLeaveResult {
    pub input: AnnualLeaveInput,
    pub total_entitled_days: u32,
    pub used_days: u32,
    /// Never negative: `max(0, total_entitled_days - used_days)`.
    pub available_days: u32,
    pub work_period: LeaveWorkPeriod,
}

/// Length of service for severance purposes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServicePeriod {
    pub days: u32,
    pub years: u32,
    pub months: u32,
}

/// Per-source split of the severance amount.
///
/// Each component is floored on its own, so the two may not add up to
/// [`SeverancePayResult::amount`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeveranceBreakdown {
    pub base_salary_component: Decimal,
    pub bonus_component: Decimal,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeverancePayResult {
    pub input: SeverancePayInput,
    pub amount: Decimal,
    pub work_period: ServicePeriod,
    pub average_monthly_wage: Decimal,
    pub breakdown: SeveranceBreakdown,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OvertimeBreakdown {
    pub overtime: Decimal,
    pub night: Decimal,
    pub holiday: Decimal,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OvertimeHours {
    pub overtime: Decimal,
    pub night: Decimal,
    pub holiday: Decimal,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OvertimePayResult {
    pub input: OvertimePayInput,
    /// Always `breakdown.overtime + breakdown.night + breakdown.holiday`.
    pub total_allowance: Decimal,
    pub breakdown: OvertimeBreakdown,
    pub hours: OvertimeHours,
    pub hourly_rate: Decimal,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "calculator", rename_all = "kebab-case")]
pub enum CalculationResult {
    AnnualLeave(AnnualLeaveResult),
    SeverancePay(SeverancePayResult),
    OvertimePay(OvertimePayResult),
}

impl CalculationResult {
    pub fn kind(&self) -> CalculatorKind {
        match self {
            Self::AnnualLeave(_) => CalculatorKind::AnnualLeave,
            Self::SeverancePay(_) => CalculatorKind::SeverancePay,
            Self::OvertimePay(_) => CalculatorKind::OvertimePay,
        }
    }

    /// The input that produced this result.
    pub fn input(&self) -> CalculationInput {
        match self {
            Self::AnnualLeave(r) => CalculationInput::AnnualLeave(r.input.clone()),
            Self::SeverancePay(r) => CalculationInput::SeverancePay(r.input.clone()),
            Self::OvertimePay(r) => CalculationInput::OvertimePay(r.input.clone()),
        }
    }

    /// Headline figure used in the history list, e.g. `12일` or `1,500,000원`.
    pub fn summary(&self) -> String {
        match self {
            Self::AnnualLeave(r) => format_days(r.available_days),
            Self::SeverancePay(r) => format_won(r.amount),
            Self::OvertimePay(r) => format_won(r.total_allowance),
        }
    }
}
