use serde::{Deserialize, Serialize};

/// One labeled value fed to a chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartPoint {
    pub label: String,
    pub value: f64,
}

impl ChartPoint {
    pub fn new(
        label: impl Into<String>,
        value: f64,
    ) -> Self {
        Self {
            label: label.into(),
            value,
        }
    }
}

/// Ordered input to both chart builders. Order is preserved end to end.
pub type ChartSeries = Vec<ChartPoint>;
