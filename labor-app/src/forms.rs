//! Calculator input forms.
//!
//! Forms keep exactly what the user typed. They double as the persisted input
//! snapshot (field names match the stored JSON) and turn into a typed
//! [`CalculationInput`] through `validate`.

use chrono::NaiveDate;
use labor_core::format::{parse_amount, parse_amount_or_zero, parse_hours_or_zero};
use labor_core::{
    AnnualLeaveInput, CalculationInput, CalculatorKind, OvertimePayInput, SeverancePayInput,
};
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::warn;

const DATE_FORMAT: &str = "%Y-%m-%d";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum FormError {
    #[error("required input missing: {}", .0.join(", "))]
    MissingRequiredInput(Vec<&'static str>),

    #[error("{field} is not a date (expected YYYY-MM-DD): {value:?}")]
    InvalidDate { field: &'static str, value: String },
}

impl FormError {
    /// Message shown to the user, per calculator.
    pub fn user_message(
        &self,
        kind: CalculatorKind,
    ) -> String {
        match (self, kind) {
            (Self::MissingRequiredInput(_), CalculatorKind::AnnualLeave) => {
                "입사일과 기준일을 모두 입력해주세요.".to_string()
            }
            (Self::MissingRequiredInput(_), CalculatorKind::SeverancePay) => {
                "필수 정보를 모두 입력해주세요.".to_string()
            }
            (Self::MissingRequiredInput(_), CalculatorKind::OvertimePay) => {
                "시급을 입력해주세요.".to_string()
            }
            (Self::InvalidDate { .. }, _) => self.to_string(),
        }
    }
}

// ---------------------------------------------------------------------------
// Forms
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AnnualLeaveForm {
    pub join_date: String,
    /// Empty means today.
    pub base_date: String,
    pub used_leave: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SeveranceForm {
    pub join_date: String,
    /// Empty means today.
    pub leave_date: String,
    pub monthly_salary: String,
    pub bonus: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct OvertimeForm {
    #[serde(rename = "hourlySalary")]
    pub hourly_rate: String,
    pub overtime_hours: String,
    pub night_hours: String,
    pub holiday_hours: String,
}

/// Collects missing-field names while a form is read.
#[derive(Default)]
struct Checker {
    missing: Vec<&'static str>,
}

impl Checker {
    fn required<'a>(
        &mut self,
        field: &'static str,
        value: &'a str,
    ) -> Option<&'a str> {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            self.missing.push(field);
            return None;
        }
        Some(trimmed)
    }

    /// A required amount that must read as a non-zero number.
    fn required_amount(
        &mut self,
        field: &'static str,
        value: &str,
    ) -> Option<Decimal> {
        let raw = self.required(field, value)?;
        match parse_amount(raw) {
            Some(amount) if !amount.is_zero() => Some(amount),
            _ => {
                warn!(field, input = %raw, "amount must be a non-zero number");
                self.missing.push(field);
                None
            }
        }
    }

    fn finish(self) -> Result<(), FormError> {
        if self.missing.is_empty() {
            Ok(())
        } else {
            Err(FormError::MissingRequiredInput(self.missing))
        }
    }
}

fn parse_date(
    field: &'static str,
    value: &str,
) -> Result<NaiveDate, FormError> {
    NaiveDate::parse_from_str(value.trim(), DATE_FORMAT).map_err(|_| FormError::InvalidDate {
        field,
        value: value.to_string(),
    })
}

fn date_or_today(
    field: &'static str,
    value: &str,
    today: NaiveDate,
) -> Result<NaiveDate, FormError> {
    if value.trim().is_empty() {
        Ok(today)
    } else {
        parse_date(field, value)
    }
}

/// Leave days are whole and non-negative. Negative or unreadable input counts
/// as zero; counts beyond `u32` saturate so nothing becomes available.
fn parse_days(value: &str) -> u32 {
    let days = parse_amount_or_zero(value);
    if days.is_sign_negative() {
        warn!(input = %value, "used leave must not be negative; treating as zero");
        return 0;
    }
    days.to_u32().unwrap_or_else(|| {
        warn!(input = %value, "used leave out of range; saturating");
        u32::MAX
    })
}

impl AnnualLeaveForm {
    /// Form as first shown: base date set to `today`.
    pub fn new(today: NaiveDate) -> Self {
        Self {
            base_date: today.format(DATE_FORMAT).to_string(),
            ..Self::default()
        }
    }

    /// # Errors
    ///
    /// [`FormError::MissingRequiredInput`] without a join date,
    /// [`FormError::InvalidDate`] if a date does not parse.
    pub fn validate(
        &self,
        today: NaiveDate,
    ) -> Result<CalculationInput, FormError> {
        let mut check = Checker::default();
        let join = check.required("joinDate", &self.join_date);
        check.finish()?;

        let join_date = parse_date("joinDate", join.unwrap_or_default())?;
        let base_date = date_or_today("baseDate", &self.base_date, today)?;

        Ok(CalculationInput::AnnualLeave(AnnualLeaveInput {
            join_date,
            base_date,
            used_leave_days: parse_days(&self.used_leave),
        }))
    }
}

impl SeveranceForm {
    /// Form as first shown: leave date set to `today`.
    pub fn new(today: NaiveDate) -> Self {
        Self {
            leave_date: today.format(DATE_FORMAT).to_string(),
            ..Self::default()
        }
    }

    /// # Errors
    ///
    /// [`FormError::MissingRequiredInput`] without a join date or with a
    /// missing or zero monthly salary; [`FormError::InvalidDate`] if a date
    /// does not parse.
    pub fn validate(
        &self,
        today: NaiveDate,
    ) -> Result<CalculationInput, FormError> {
        let mut check = Checker::default();
        let join = check.required("joinDate", &self.join_date);
        let salary = check.required_amount("monthlySalary", &self.monthly_salary);
        check.finish()?;

        let join_date = parse_date("joinDate", join.unwrap_or_default())?;
        let leave_date = date_or_today("leaveDate", &self.leave_date, today)?;

        Ok(CalculationInput::SeverancePay(SeverancePayInput {
            join_date,
            leave_date,
            monthly_base_salary: salary.unwrap_or_default(),
            annual_bonus: parse_amount_or_zero(&self.bonus),
        }))
    }
}

impl OvertimeForm {
    pub fn new() -> Self {
        Self::default()
    }

    /// # Errors
    ///
    /// [`FormError::MissingRequiredInput`] with a missing or zero hourly rate.
    pub fn validate(&self) -> Result<CalculationInput, FormError> {
        let mut check = Checker::default();
        let rate = check.required_amount("hourlySalary", &self.hourly_rate);
        check.finish()?;

        Ok(CalculationInput::OvertimePay(OvertimePayInput {
            hourly_rate: rate.unwrap_or_default(),
            overtime_hours: parse_hours_or_zero(&self.overtime_hours),
            night_hours: parse_hours_or_zero(&self.night_hours),
            holiday_hours: parse_hours_or_zero(&self.holiday_hours),
        }))
    }
}
