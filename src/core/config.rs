use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

/// How line totals are rounded after the line discount is applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Rounding {
    /// Commercial rounding, 0.125 -> 0.13.
    #[default]
    HalfUp,
    /// Banker's rounding, 0.125 -> 0.12.
    HalfEven,
    /// Drop digits beyond the precision.
    Truncate,
}

impl Rounding {
    fn strategy(self) -> RoundingStrategy {
        match self {
            Self::HalfUp => RoundingStrategy::MidpointAwayFromZero,
            Self::HalfEven => RoundingStrategy::MidpointNearestEven,
            Self::Truncate => RoundingStrategy::ToZero,
        }
    }
}

/// Settings for [`InclusiveTaxCalculator`](super::InclusiveTaxCalculator).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CalculatorConfig {
    /// Decimal places kept on `line_total` (default: 2).
    pub line_total_precision: u32,
    pub rounding: Rounding,
}

impl Default for CalculatorConfig {
    fn default() -> Self {
        Self {
            line_total_precision: 2,
            rounding: Rounding::HalfUp,
        }
    }
}

impl CalculatorConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_precision(mut self, dp: u32) -> Self {
        self.line_total_precision = dp;
        self
    }

    pub fn with_rounding(mut self, rounding: Rounding) -> Self {
        self.rounding = rounding;
        self
    }

    /// Round a discounted line total.
    pub fn round_line_total(&self, value: Decimal) -> Decimal {
        value.round_dp_with_strategy(self.line_total_precision, self.rounding.strategy())
    }
}
