mod calculation;
mod calculator_kind;
mod chart_series;
mod history_entry;

pub use calculation::{
    AnnualLeaveInput, AnnualLeaveResult, CalculationInput, CalculationResult, LeaveWorkPeriod,
    OvertimeBreakdown, OvertimeHours, OvertimePayInput, OvertimePayResult, SeveranceBreakdown,
    SeverancePayInput, SeverancePayResult, ServicePeriod,
};
pub use calculator_kind::CalculatorKind;
pub use chart_series::{ChartPoint, ChartSeries};
pub use history_entry::HistoryEntry;
