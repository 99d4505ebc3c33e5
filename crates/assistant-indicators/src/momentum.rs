//! Momentum indicators.

use assistant_core::traits::Indicator;

/// Relative Strength Index (RSI).
///
/// Measures the speed and magnitude of recent price changes using simple
/// rolling means of gains and losses over the last `period` changes.
#[derive(Debug, Clone)]
pub struct Rsi {
    period: usize,
}

impl Rsi {
    /// Create a new RSI indicator.
    ///
    /// Common period is 14.
    pub fn new(period: usize) -> Self {
        assert!(period > 0, "Period must be greater than 0");
        Self { period }
    }

    /// RSI from average gain and loss.
    ///
    /// With no losses the ratio is unbounded and the index saturates at 100.
    /// A window with neither gains nor losses has no defined RSI (0/0); it
    /// reports 50, the value the decision engine substitutes for an
    /// undefined RSI, so a flat tape decides the same either way.
    fn from_averages(gain: f64, loss: f64) -> f64 {
        if loss == 0.0 {
            if gain > 0.0 {
                100.0
            } else {
                // 0/0
                50.0
            }
        } else {
            100.0 - (100.0 / (1.0 + gain / loss))
        }
    }
}

impl Indicator for Rsi {
    type Output = f64;

    fn calculate(&self, data: &[f64]) -> Vec<f64> {
        if data.len() <= self.period {
            return vec![];
        }

        let changes: Vec<f64> = data.windows(2).map(|w| w[1] - w[0]).collect();
        let period_f64 = self.period as f64;

        changes
            .windows(self.period)
            .map(|window| {
                let gain = window.iter().map(|c| c.max(0.0)).sum::<f64>() / period_f64;
                let loss = window.iter().map(|c| (-c).max(0.0)).sum::<f64>() / period_f64;
                Self::from_averages(gain, loss)
            })
            .collect()
    }

    fn period(&self) -> usize {
        self.period + 1 // Need period+1 data points
    }

    fn name(&self) -> &str {
        "RSI"
    }
}
