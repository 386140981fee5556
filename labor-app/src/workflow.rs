//! One submission of a calculator form, from validation to advice.

use std::sync::Arc;
use std::time::Duration;

use chrono::NaiveDate;
use labor_core::advice::{AdviceError, AdviceProvider};
use labor_core::calculations::{CalculationError, LaborCalculator};
use labor_core::{CalculationResult, CalculatorKind, StoreError};
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::forms::FormError;
use crate::state::AppState;
use crate::svg::ChartView;

#[derive(Debug, Error)]
pub enum SubmitError {
    #[error(transparent)]
    Form(#[from] FormError),

    #[error("calculation failed: {0}")]
    Calculation(#[from] CalculationError),

    #[error("storage failed: {0}")]
    Store(#[from] StoreError),
}

/// Everything produced by a successful submission.
#[derive(Debug)]
pub struct Submission {
    pub result: CalculationResult,
    pub charts: ChartView,
    /// Advice failures do not fail the submission.
    pub advice: Result<String, AdviceError>,
}

impl Submission {
    /// The advice text, or the failure message in its place.
    pub fn advice_text(&self) -> &str {
        match &self.advice {
            Ok(text) => text,
            Err(e) => e.user_message(),
        }
    }
}

pub struct Workflow {
    calculator: LaborCalculator,
    advisor: Arc<dyn AdviceProvider>,
    delay: Duration,
    record_history: bool,
}

impl Workflow {
    pub fn new(advisor: Arc<dyn AdviceProvider>) -> Self {
        Self {
            calculator: LaborCalculator::default(),
            advisor,
            delay: Duration::ZERO,
            record_history: true,
        }
    }

    /// Pause before calculating, imitating a slow backend.
    pub fn with_delay(
        mut self,
        delay: Duration,
    ) -> Self {
        self.delay = delay;
        self
    }

    pub fn with_history(
        mut self,
        record_history: bool,
    ) -> Self {
        self.record_history = record_history;
        self
    }

    /// Persists the form of `kind`, validates it, calculates, records the
    /// result and fetches advice.
    ///
    /// # Errors
    ///
    /// Fails on invalid input, a calculation error or a storage failure.
    /// A rejected form is still saved, but nothing is recorded.
    pub async fn submit(
        &self,
        state: &mut AppState,
        kind: CalculatorKind,
        today: NaiveDate,
    ) -> Result<Submission, SubmitError> {
        state.save_inputs(kind)?;

        let input = match kind {
            CalculatorKind::AnnualLeave => state.annual_leave.validate(today),
            CalculatorKind::SeverancePay => state.severance.validate(today),
            CalculatorKind::OvertimePay => state.overtime.validate(),
        }
        .inspect_err(|e| warn!(%kind, error = %e, "form rejected"))?;

        if !self.delay.is_zero() {
            debug!(delay_ms = self.delay.as_millis() as u64, "simulating calculation");
            tokio::time::sleep(self.delay).await;
        }

        let result = self.calculator.calculate(&input)?;
        info!(%kind, summary = %result.summary(), "calculation complete");

        state.record(result.clone(), self.record_history)?;
        let charts = ChartView::from_result(&result);

        let advice = self.advisor.advise(&result).await;
        if let Err(e) = &advice {
            warn!(%kind, error = %e, "advice unavailable");
        }

        Ok(Submission {
            result,
            charts,
            advice,
        })
    }
}

/// Delay before the built-in advisor answers.
pub const ADVICE_DELAY: Duration = Duration::from_millis(2000);

/// Delay applied before calculating, per calculator.
pub fn default_delay(kind: CalculatorKind) -> Duration {
    match kind {
        CalculatorKind::AnnualLeave | CalculatorKind::SeverancePay => Duration::from_millis(800),
        CalculatorKind::OvertimePay => Duration::from_millis(500),
    }
}
