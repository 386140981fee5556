//! Rule-based advice shown under each result.
//!
//! [`generate_advice`] maps a result to one of a few canned messages by
//! simple thresholds. [`AdviceProvider`] is the seam a different text source
//! plugs into; [`ScriptedAdvisor`] is the built-in one.

use std::time::Duration;

use async_trait::async_trait;
use rust_decimal::Decimal;
use thiserror::Error;
use tracing::debug;

use crate::models::{AnnualLeaveResult, CalculationResult, OvertimePayResult, SeverancePayResult};

/// Remaining leave at or below this is urgent.
const LOW_LEAVE_DAYS: u32 = 2;
/// Remaining leave at or above this is plentiful.
const HIGH_LEAVE_DAYS: u32 = 10;
/// Monthly severance equivalent above this is considered good.
const GOOD_MONTHLY_SEVERANCE: i64 = 3_000_000;
const HEAVY_OVERTIME_HOURS: i64 = 20;
const LIGHT_OVERTIME_HOURS: i64 = 5;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum AdviceError {
    #[error("advice source unavailable: {0}")]
    Unavailable(String),
}

impl AdviceError {
    /// Message shown to the user in place of the advice.
    pub fn user_message(&self) -> &'static str {
        "AI 조언을 가져오는데 실패했습니다. 다시 시도해주세요."
    }
}

/// A source of advice text for a calculation result.
#[async_trait]
pub trait AdviceProvider: Send + Sync {
    async fn advise(
        &self,
        result: &CalculationResult,
    ) -> Result<String, AdviceError>;
}

/// Canned advice from [`generate_advice`], optionally after a delay that
/// imitates a remote call.
#[derive(Debug, Clone, Default)]
pub struct ScriptedAdvisor {
    delay: Duration,
}

impl ScriptedAdvisor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_delay(delay: Duration) -> Self {
        Self { delay }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }
}

#[async_trait]
impl AdviceProvider for ScriptedAdvisor {
    async fn advise(
        &self,
        result: &CalculationResult,
    ) -> Result<String, AdviceError> {
        if !self.delay.is_zero() {
            debug!(delay_ms = self.delay.as_millis() as u64, "waiting before advice");
            tokio::time::sleep(self.delay).await;
        }
        Ok(generate_advice(result))
    }
}

/// Picks the advice message for a result.
///
/// Overtime advice is based on the hours as entered, read from the input the
/// result carries.
pub fn generate_advice(result: &CalculationResult) -> String {
    match result {
        CalculationResult::AnnualLeave(r) => annual_leave_advice(r),
        CalculationResult::SeverancePay(r) => severance_advice(r),
        CalculationResult::OvertimePay(r) => overtime_advice(r),
    }
}

fn annual_leave_advice(r: &AnnualLeaveResult) -> String {
    let available = r.available_days;
    if available <= LOW_LEAVE_DAYS {
        format!(
            "🚨 연차가 {available}일밖에 남지 않았네요! 빠른 시일 내에 사용하시길 권장합니다. \
             연차는 소멸되면 복구가 어려우니, 미리 계획을 세워보세요. \
             연속 휴가보다는 월 1-2일씩 분산해서 사용하는 것도 좋은 방법입니다."
        )
    } else if available >= HIGH_LEAVE_DAYS {
        format!(
            "✨ 연차가 {available}일이나 남았네요! 충분한 여유가 있습니다. \
             장기 휴가 계획을 세우시거나, 정기적인 휴식을 통해 워라밸을 개선해보세요. \
             다만 연말까지 모두 사용해야 하니 계획적으로 사용하시길 추천합니다."
        )
    } else {
        format!(
            "👍 연차 사용이 적절한 수준입니다. 남은 {available}일을 계획적으로 사용해보세요. \
             분기별로 1-2일씩 나누어 사용하면 지속적인 휴식이 가능합니다."
        )
    }
}

/// `floor(amount / years / 12)`, or `None` under one full year of service.
fn monthly_severance_equivalent(r: &SeverancePayResult) -> Option<Decimal> {
    if r.work_period.years == 0 {
        return None;
    }
    let per_year = r.amount.checked_div(Decimal::from(r.work_period.years))?;
    Some((per_year / Decimal::from(12)).floor())
}

fn severance_advice(r: &SeverancePayResult) -> String {
    match monthly_severance_equivalent(r) {
        Some(monthly) if monthly > Decimal::from(GOOD_MONTHLY_SEVERANCE) => {
            let man = (monthly / Decimal::from(10_000)).floor().normalize();
            format!(
                "💰 퇴직금이 월 {man}만원 수준으로 양호합니다! \
                 퇴직소득세 절약을 위해 중간정산보다는 만기정산을 고려해보세요. \
                 또한 퇴직연금 이전 시 세제혜택도 검토해보시길 권장합니다."
            )
        }
        _ => "📋 현재 퇴직금 수준을 확인했습니다. \
              퇴직금 외에 실업급여, 건강보험 임의계속가입 등 추가 혜택도 챙기세요. \
              퇴직 시기와 방법에 따라 세금 부담이 달라질 수 있으니 전문가 상담을 받아보시는 것도 좋겠습니다."
            .to_string(),
    }
}

fn overtime_advice(r: &OvertimePayResult) -> String {
    let total = r.input.total_hours();
    let shown = total.normalize();
    if total > Decimal::from(HEAVY_OVERTIME_HOURS) {
        format!(
            "⚠️ 총 {shown}시간의 추가근무는 과로 위험이 있습니다. 주 52시간 근로시간 상한을 확인해주세요. \
             건강을 위해 업무 효율성 개선이나 휴식 시간 확보를 권장합니다. \
             지속적인 야근은 번아웃으로 이어질 수 있어요."
        )
    } else if total < Decimal::from(LIGHT_OVERTIME_HOURS) {
        "👍 적정 수준의 추가근무네요. 현재 패턴을 유지하시면서, 추가 수당을 효율적으로 활용해보세요. \
         야근수당은 비과세 항목이 아니니 연말정산 시 고려하시기 바랍니다."
            .to_string()
    } else {
        format!(
            "📊 일주일 {shown}시간의 추가근무는 관리 가능한 수준입니다. \
             다만 지속적인 패턴 모니터링을 통해 건강한 근무환경을 유지하세요. \
             야간근무가 많다면 충분한 수면과 영양 관리가 중요합니다."
        )
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;

    use super::*;
    use crate::calculations::{compute_annual_leave, compute_overtime_pay, compute_severance_pay};

    fn date(
        y: i32,
        m: u32,
        d: u32,
    ) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn leave(used: u32) -> CalculationResult {
        // 48 months: 18 days entitled.
        CalculationResult::AnnualLeave(compute_annual_leave(
            date(2020, 1, 1),
            date(2024, 1, 1),
            used,
        ))
    }

    fn overtime(
        overtime_h: Decimal,
        night_h: Decimal,
        holiday_h: Decimal,
    ) -> CalculationResult {
        CalculationResult::OvertimePay(
            compute_overtime_pay(dec!(10000), overtime_h, night_h, holiday_h).unwrap(),
        )
    }

    // =========================================================================
    // annual leave
    // =========================================================================

    #[test]
    fn little_leave_left_is_urgent() {
        let advice = generate_advice(&leave(16));

        assert!(advice.starts_with("🚨 연차가 2일밖에"));
    }

    #[test]
    fn plenty_of_leave_is_encouraging() {
        let advice = generate_advice(&leave(8));

        assert!(advice.starts_with("✨ 연차가 10일이나"));
    }

    #[test]
    fn moderate_leave_is_neutral() {
        let advice = generate_advice(&leave(13));

        assert!(advice.contains("남은 5일을"));
    }

    // =========================================================================
    // severance
    // =========================================================================

    #[test]
    fn high_monthly_equivalent_is_praised() {
        let result = compute_severance_pay(
            date(2020, 1, 1),
            date(2023, 1, 1),
            dec!(5000000),
            dec!(0),
        )
        .unwrap();

        let advice = generate_advice(&CalculationResult::SeverancePay(result));

        // floor(450,410,958 / 3 / 12) = 12,511,415
        assert!(advice.starts_with("💰 퇴직금이 월 1251만원"), "{advice}");
    }

    #[test]
    fn modest_severance_uses_general_advice() {
        let result =
            compute_severance_pay(date(2020, 1, 1), date(2023, 1, 1), dec!(1000000), dec!(0))
                .unwrap();

        let advice = generate_advice(&CalculationResult::SeverancePay(result));

        assert!(advice.starts_with("📋"));
    }

    #[test]
    fn under_one_year_uses_general_advice() {
        let result =
            compute_severance_pay(date(2023, 1, 1), date(2023, 6, 1), dec!(9000000), dec!(0))
                .unwrap();

        let advice = generate_advice(&CalculationResult::SeverancePay(result));

        assert!(advice.starts_with("📋"));
    }

    // =========================================================================
    // overtime
    // =========================================================================

    #[test]
    fn heavy_overtime_warns_about_hours() {
        let advice = generate_advice(&overtime(dec!(12), dec!(6), dec!(4)));

        assert!(advice.starts_with("⚠️ 총 22시간"));
    }

    #[test]
    fn light_overtime_is_fine() {
        let advice = generate_advice(&overtime(dec!(2), dec!(1), dec!(0)));

        assert!(advice.starts_with("👍 적정 수준"));
    }

    #[test]
    fn moderate_overtime_reports_fractional_hours() {
        let advice = generate_advice(&overtime(dec!(7.5), dec!(0), dec!(0)));

        assert!(advice.starts_with("📊 일주일 7.5시간"));
    }

    #[test]
    fn boundaries_are_exclusive_for_overtime() {
        assert!(generate_advice(&overtime(dec!(20), dec!(0), dec!(0))).starts_with("📊"));
        assert!(generate_advice(&overtime(dec!(5), dec!(0), dec!(0))).starts_with("📊"));
    }

    // =========================================================================
    // providers
    // =========================================================================

    #[tokio::test]
    async fn scripted_advisor_returns_generated_text() {
        let advisor = ScriptedAdvisor::new();
        let result = leave(8);

        let advice = advisor.advise(&result).await.unwrap();

        assert_eq!(advice, generate_advice(&result));
    }

    #[tokio::test(start_paused = true)]
    async fn scripted_advisor_waits_for_its_delay() {
        let advisor = ScriptedAdvisor::with_delay(Duration::from_millis(2000));
        let started = tokio::time::Instant::now();

        advisor.advise(&leave(0)).await.unwrap();

        assert!(started.elapsed() >= Duration::from_millis(2000));
    }

    #[test]
    fn error_has_user_facing_message() {
        let err = AdviceError::Unavailable("timeout".into());

        assert_eq!(err.to_string(), "advice source unavailable: timeout");
        assert!(err.user_message().starts_with("AI 조언을"));
    }
}
