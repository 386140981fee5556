//! Chart datasets derived from calculation results.
//!
//! Each result view shows a composition pie and a trend line. The datasets
//! here are what those two charts are fed with.

use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::{Deserialize, Serialize};

use crate::format::format_man_won;
use crate::models::{
    AnnualLeaveResult, CalculationResult, ChartPoint, ChartSeries, OvertimePayResult,
    SeverancePayResult,
};

/// Entitlement ceiling shown as the last point of the leave trend.
const LEAVE_CHART_CEILING: u32 = 25;

/// Pie and line datasets plus titles for one result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartSet {
    pub pie_title: String,
    pub pie: ChartSeries,
    /// Text drawn in the middle of the pie.
    pub center_text: String,
    pub line_title: String,
    pub line: ChartSeries,
}

pub fn chart_set(result: &CalculationResult) -> ChartSet {
    match result {
        CalculationResult::AnnualLeave(r) => annual_leave_charts(r),
        CalculationResult::SeverancePay(r) => severance_charts(r),
        CalculationResult::OvertimePay(r) => overtime_charts(r),
    }
}

fn to_f64(value: Decimal) -> f64 {
    value.to_f64().unwrap_or(0.0)
}

fn annual_leave_charts(r: &AnnualLeaveResult) -> ChartSet {
    let not_accrued = LEAVE_CHART_CEILING.saturating_sub(r.total_entitled_days);
    let pie = vec![
        ChartPoint::new("사용 가능", f64::from(r.available_days)),
        ChartPoint::new("사용 완료", f64::from(r.used_days)),
        ChartPoint::new("미발생", f64::from(not_accrued)),
    ];
    let line = vec![
        ChartPoint::new("1년차", 15.0),
        ChartPoint::new("2년차", 16.0),
        ChartPoint::new("3년차", 17.0),
        ChartPoint::new("4년차", 18.0),
        ChartPoint::new("현재", f64::from(r.total_entitled_days)),
        ChartPoint::new("최대", f64::from(LEAVE_CHART_CEILING)),
    ];

    ChartSet {
        pie_title: "연차 현황".to_string(),
        pie,
        center_text: format!("총 {}일", r.total_entitled_days),
        line_title: "연차 발생 추이".to_string(),
        line,
    }
}

fn severance_charts(r: &SeverancePayResult) -> ChartSet {
    let salary = to_f64(r.input.monthly_base_salary);
    let pie = vec![
        ChartPoint::new("기본급 기반", to_f64(r.breakdown.base_salary_component)),
        ChartPoint::new("상여금 기반", to_f64(r.breakdown.bonus_component)),
    ];
    let line = vec![
        ChartPoint::new("1년차", salary * 12.0),
        ChartPoint::new("2년차", salary * 24.0),
        ChartPoint::new("3년차", salary * 36.0),
        ChartPoint::new("현재", to_f64(r.amount)),
    ];

    ChartSet {
        pie_title: "퇴직금 구성".to_string(),
        pie,
        center_text: format!("총 {}", format_man_won(r.amount)),
        line_title: "퇴직금 누적 추이".to_string(),
        line,
    }
}

fn overtime_charts(r: &OvertimePayResult) -> ChartSet {
    let components = [
        ("연장근로", r.breakdown.overtime),
        ("야간근로", r.breakdown.night),
        ("휴일근로", r.breakdown.holiday),
    ];
    let pie = components
        .iter()
        .filter(|(_, amount)| *amount > Decimal::ZERO)
        .map(|(label, amount)| ChartPoint::new(*label, to_f64(*amount)))
        .collect();

    let overtime = to_f64(r.breakdown.overtime);
    let line = vec![
        ChartPoint::new("1주차", overtime * 0.3),
        ChartPoint::new("2주차", overtime * 0.6),
        ChartPoint::new("3주차", overtime * 0.9),
        ChartPoint::new("4주차", overtime),
    ];

    ChartSet {
        pie_title: "수당 구성".to_string(),
        pie,
        center_text: format_man_won(r.total_allowance),
        line_title: "주간 야근 패턴".to_string(),
        line,
    }
}
