//! Position-aware decision rule.

use std::collections::BTreeSet;

use assistant_core::types::{Action, FeatureVector, Sentiment};
use tracing::info;

use crate::config::DecisionConfig;

/// `Some(value)` for finite, strictly positive inputs.
fn positive(value: f64) -> Option<f64> {
    (value.is_finite() && value > 0.0).then_some(value)
}

fn finite_or(value: f64, fallback: f64) -> f64 {
    if value.is_finite() {
        value
    } else {
        fallback
    }
}

/// Feature values after permissive defaults have been applied.
#[derive(Debug, Clone, Copy)]
struct Inputs {
    price: f64,
    volume: f64,
    avg_volume: f64,
    rsi: f64,
    vwap: f64,
    session_low: Option<f64>,
    session_high: Option<f64>,
}

impl Inputs {
    fn from_features(features: &FeatureVector) -> Self {
        let price = positive(features.price)
            .or_else(|| positive(features.vwap))
            .unwrap_or(0.0);
        let vwap = positive(features.vwap).unwrap_or(price);

        Self {
            price,
            volume: finite_or(features.volume, 0.0),
            avg_volume: finite_or(features.avg_volume, 0.0),
            rsi: finite_or(features.rsi, 50.0),
            vwap,
            session_low: positive(features.session_low),
            session_high: positive(features.session_high),
        }
    }
}

/// Exit check for a held symbol.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SellCheck {
    /// Price is within the high buffer of a known session high
    pub near_high: bool,
    /// RSI is at or above the sell threshold
    pub momentum: bool,
}

impl SellCheck {
    pub fn passed(&self) -> bool {
        self.near_high && self.momentum
    }
}

/// Entry gates for a symbol that is not held.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BuyGates {
    /// Price is within the low buffer of a known session low
    pub near_low: bool,
    /// Last volume confirms with a spike over the average
    pub volume: bool,
    /// Price is at or below VWAP
    pub below_vwap: bool,
    /// RSI is at or above the momentum floor
    pub momentum: bool,
}

impl BuyGates {
    pub fn passed(&self) -> bool {
        self.near_low && self.volume && self.below_vwap && self.momentum
    }
}

/// Stateless decision engine.
///
/// Every call is answered from the inputs alone; no state carries over
/// between symbols or scans.
#[derive(Debug, Clone, Default)]
pub struct DecisionEngine {
    config: DecisionConfig,
}

impl DecisionEngine {
    pub fn new(config: DecisionConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &DecisionConfig {
        &self.config
    }

    /// Classify one symbol.
    ///
    /// Held symbols resolve to [`Action::Sell`] or [`Action::Hold`]; all
    /// others to [`Action::Buy`] or [`Action::Ignore`]. Missing or
    /// non-finite features never cause an error.
    pub fn decide(
        &self,
        symbol: &str,
        features: &FeatureVector,
        sentiment: Sentiment,
        open_positions: &BTreeSet<String>,
    ) -> Action {
        let inputs = Inputs::from_features(features);

        if open_positions.contains(symbol) {
            let check = self.sell_check(&inputs);
            let action = if check.passed() {
                Action::Sell
            } else {
                Action::Hold
            };
            info!(
                symbol,
                %action,
                %sentiment,
                price = inputs.price,
                rsi = inputs.rsi,
                near_high = check.near_high,
                momentum = check.momentum,
                "Decision for held symbol"
            );
            action
        } else {
            let gates = self.buy_gates(&inputs);
            let action = if gates.passed() {
                Action::Buy
            } else {
                Action::Ignore
            };
            info!(
                symbol,
                %action,
                %sentiment,
                price = inputs.price,
                rsi = inputs.rsi,
                near_low = gates.near_low,
                volume = gates.volume,
                below_vwap = gates.below_vwap,
                momentum = gates.momentum,
                "Decision for candidate symbol"
            );
            action
        }
    }

    fn sell_check(&self, inputs: &Inputs) -> SellCheck {
        let near_high = inputs
            .session_high
            .is_some_and(|high| inputs.price >= high * (1.0 - self.config.high_buffer));

        SellCheck {
            near_high,
            momentum: inputs.rsi >= self.config.sell_rsi_threshold,
        }
    }

    fn buy_gates(&self, inputs: &Inputs) -> BuyGates {
        let near_low = inputs
            .session_low
            .is_some_and(|low| inputs.price <= low * (1.0 + self.config.low_buffer));

        BuyGates {
            near_low,
            volume: inputs.volume >= inputs.avg_volume * self.config.volume_multiplier,
            below_vwap: inputs.price <= inputs.vwap,
            momentum: inputs.rsi >= self.config.buy_rsi_floor,
        }
    }
}
