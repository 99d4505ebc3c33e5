//! Volatility indicators.

use assistant_core::traits::{BarIndicator, Indicator};
use assistant_core::types::Bar;

use crate::moving_average::Sma;

/// True range of every bar. The first bar has no previous close and
/// contributes its plain high-low range.
pub fn true_ranges(bars: &[Bar]) -> Vec<f64> {
    let mut prev_close = None;
    bars.iter()
        .map(|bar| {
            let tr = bar.true_range(prev_close);
            prev_close = Some(bar.close);
            tr
        })
        .collect()
}

/// Average True Range (ATR).
///
/// Simple rolling mean of the true range over `period` bars.
#[derive(Debug, Clone)]
pub struct Atr {
    period: usize,
}

impl Atr {
    /// Create a new ATR indicator.
    ///
    /// Common period is 14.
    pub fn new(period: usize) -> Self {
        assert!(period > 0, "Period must be greater than 0");
        Self { period }
    }
}

impl BarIndicator for Atr {
    type Output = f64;

    fn calculate(&self, bars: &[Bar]) -> Vec<f64> {
        Sma::new(self.period).calculate(&true_ranges(bars))
    }

    fn period(&self) -> usize {
        self.period
    }

    fn name(&self) -> &str {
        "ATR"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bars(rows: &[(f64, f64, f64)]) -> Vec<Bar> {
        rows.iter()
            .enumerate()
            .map(|(i, &(high, low, close))| Bar::new(i as i64, close, high, low, close, 1000.0))
            .collect()
    }

    #[test]
    fn test_true_ranges() {
        let bars = bars(&[(10.0, 8.0, 9.0), (11.0, 9.5, 10.0), (14.0, 12.0, 13.0)]);
        let tr = true_ranges(&bars);

        assert_eq!(tr.len(), 3);
        assert!((tr[0] - 2.0).abs() < 1e-10); // high - low only
        assert!((tr[1] - 2.0).abs() < 1e-10); // |11 - 9|
        assert!((tr[2] - 4.0).abs() < 1e-10); // |14 - 10|
    }

    #[test]
    fn test_atr_rolling_mean() {
        let atr = Atr::new(2);
        let bars = bars(&[(10.0, 8.0, 9.0), (11.0, 9.5, 10.0), (14.0, 12.0, 13.0)]);
        let result = atr.calculate(&bars);

        assert_eq!(result.len(), 2);
        assert!((result[0] - 2.0).abs() < 1e-10);
        assert!((result[1] - 3.0).abs() < 1e-10);
    }

    #[test]
    fn test_atr_insufficient_bars() {
        let atr = Atr::new(14);
        let bars = bars(&[(10.0, 8.0, 9.0); 5]);

        assert!(atr.latest(&bars).is_none());
    }
}
