use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{CalculationInput, CalculationResult, CalculatorKind};

/// A stored calculation. Never mutated once it is in the history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryEntry {
    /// Creation time in milliseconds, bumped when two entries share a tick.
    pub id: i64,
    pub timestamp: DateTime<Utc>,
    pub calculator: CalculatorKind,
    pub input: CalculationInput,
    pub result: CalculationResult,
}
