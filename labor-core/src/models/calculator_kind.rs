use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CalculatorKind {
    AnnualLeave,
    SeverancePay,
    OvertimePay,
}

impl CalculatorKind {
    pub fn all() -> &'static [CalculatorKind] {
        &[
            CalculatorKind::AnnualLeave,
            CalculatorKind::SeverancePay,
            CalculatorKind::OvertimePay,
        ]
    }

    /// Stable identifier used in storage keys and on the command line.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::AnnualLeave => "annual-leave",
            Self::SeverancePay => "severance-pay",
            Self::OvertimePay => "overtime-pay",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "annual-leave" => Some(Self::AnnualLeave),
            "severance-pay" => Some(Self::SeverancePay),
            "overtime-pay" => Some(Self::OvertimePay),
            _ => None,
        }
    }

    /// Short label shown in the history list.
    pub fn label(&self) -> &'static str {
        match self {
            Self::AnnualLeave => "연차계산",
            Self::SeverancePay => "퇴직금계산",
            Self::OvertimePay => "야근수당계산",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Self::AnnualLeave => "연차계산기",
            Self::SeverancePay => "퇴직금계산기",
            Self::OvertimePay => "야근수당계산기",
        }
    }
}

impl fmt::Display for CalculatorKind {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn parse_accepts_every_identifier() {
        for kind in CalculatorKind::all() {
            assert_eq!(CalculatorKind::parse(kind.as_str()), Some(*kind));
        }
    }

    #[test]
    fn parse_rejects_unknown_identifier() {
        assert_eq!(CalculatorKind::parse("payroll"), None);
    }

    #[test]
    fn serde_uses_kebab_case_identifiers() {
        let json = serde_json::to_string(&CalculatorKind::SeverancePay).unwrap();

        assert_eq!(json, "\"severance-pay\"");
    }
}
