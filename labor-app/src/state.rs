//! Session state.
//!
//! Holds the forms, the latest result of each calculator, the history and the
//! dark-mode flag. Everything that is persisted is written through
//! [`Preferences`] as soon as it changes.

use std::collections::HashMap;

use chrono::NaiveDate;
use labor_core::store::Preferences;
use labor_core::{CalculationResult, CalculatorKind, HistoryEntry, HistoryStore, StoreError};
use tracing::{debug, info};

use crate::forms::{AnnualLeaveForm, OvertimeForm, SeveranceForm};

pub struct AppState {
    prefs: Preferences,
    history: HistoryStore,
    dark_mode: bool,
    pub annual_leave: AnnualLeaveForm,
    pub severance: SeveranceForm,
    pub overtime: OvertimeForm,
    latest: HashMap<CalculatorKind, CalculationResult>,
}

impl AppState {
    /// Reads everything persisted. Missing or corrupt values start empty;
    /// empty date fields are set to `today`.
    pub fn load(
        prefs: Preferences,
        today: NaiveDate,
    ) -> Self {
        let mut annual_leave: AnnualLeaveForm = prefs.load_inputs(CalculatorKind::AnnualLeave);
        if annual_leave.base_date.trim().is_empty() {
            annual_leave.base_date = AnnualLeaveForm::new(today).base_date;
        }
        let mut severance: SeveranceForm = prefs.load_inputs(CalculatorKind::SeverancePay);
        if severance.leave_date.trim().is_empty() {
            severance.leave_date = SeveranceForm::new(today).leave_date;
        }
        let overtime: OvertimeForm = prefs.load_inputs(CalculatorKind::OvertimePay);

        let history = HistoryStore::from_entries(prefs.load_history());
        let dark_mode = prefs.load_dark_mode();
        debug!(history = history.len(), dark_mode, "session state loaded");

        Self {
            prefs,
            history,
            dark_mode,
            annual_leave,
            severance,
            overtime,
            latest: HashMap::new(),
        }
    }

    pub fn dark_mode(&self) -> bool {
        self.dark_mode
    }

    pub fn set_dark_mode(
        &mut self,
        enabled: bool,
    ) -> Result<(), StoreError> {
        self.prefs.save_dark_mode(enabled)?;
        self.dark_mode = enabled;
        info!(enabled, "dark mode changed");
        Ok(())
    }

    /// Flips dark mode and returns the new value.
    pub fn toggle_dark_mode(&mut self) -> Result<bool, StoreError> {
        let enabled = !self.dark_mode;
        self.set_dark_mode(enabled)?;
        Ok(enabled)
    }

    /// Persists the current form of `kind`.
    pub fn save_inputs(
        &self,
        kind: CalculatorKind,
    ) -> Result<(), StoreError> {
        match kind {
            CalculatorKind::AnnualLeave => self.prefs.save_inputs(kind, &self.annual_leave),
            CalculatorKind::SeverancePay => self.prefs.save_inputs(kind, &self.severance),
            CalculatorKind::OvertimePay => self.prefs.save_inputs(kind, &self.overtime),
        }
    }

    /// Resets the form of `kind` to its initial state, forgets its latest
    /// result and drops the persisted snapshot.
    pub fn clear_inputs(
        &mut self,
        kind: CalculatorKind,
        today: NaiveDate,
    ) -> Result<(), StoreError> {
        match kind {
            CalculatorKind::AnnualLeave => self.annual_leave = AnnualLeaveForm::new(today),
            CalculatorKind::SeverancePay => self.severance = SeveranceForm::new(today),
            CalculatorKind::OvertimePay => self.overtime = OvertimeForm::new(),
        }
        self.prefs.clear_inputs(kind)?;
        self.latest.remove(&kind);
        info!(%kind, "inputs cleared");
        Ok(())
    }

    /// Stores `result` as the latest for its calculator and, when
    /// `record_history` is set, appends it to the history.
    pub fn record(
        &mut self,
        result: CalculationResult,
        record_history: bool,
    ) -> Result<(), StoreError> {
        let kind = result.kind();
        if record_history {
            self.history.append(kind, result.input(), result.clone());
            self.prefs.save_history(self.history.entries())?;
        }
        self.latest.insert(kind, result);
        Ok(())
    }

    pub fn latest(
        &self,
        kind: CalculatorKind,
    ) -> Option<&CalculationResult> {
        self.latest.get(&kind)
    }

    pub fn history(&self) -> &HistoryStore {
        &self.history
    }

    pub fn history_entries(&self) -> &[HistoryEntry] {
        self.history.entries()
    }

    pub fn clear_history(&mut self) -> Result<(), StoreError> {
        self.history.clear();
        self.prefs.save_history(self.history.entries())
    }
}
