//! Indicator trait definitions.

use crate::types::Bar;

/// Trait for technical indicators over a single value series.
///
/// Indicators process price data and produce derived values
/// useful for trading decisions.
pub trait Indicator: Send + Sync {
    /// The output type of the indicator.
    type Output;

    /// Calculate indicator values for the given data.
    ///
    /// # Arguments
    /// * `data` - Input data (typically prices)
    ///
    /// # Returns
    /// A vector of indicator values, oldest first
    fn calculate(&self, data: &[f64]) -> Vec<Self::Output>;

    /// Get the minimum data points required.
    fn period(&self) -> usize;

    /// Get the name of the indicator.
    fn name(&self) -> &str;

    /// The most recent value, if the data covers the period.
    fn latest(&self, data: &[f64]) -> Option<Self::Output> {
        self.calculate(data).pop()
    }
}

/// Indicator that uses whole bars (not just close).
pub trait BarIndicator: Send + Sync {
    /// The output type of the indicator.
    type Output;

    /// Calculate indicator values from OHLCV bars.
    fn calculate(&self, bars: &[Bar]) -> Vec<Self::Output>;

    /// Get the minimum bars required.
    fn period(&self) -> usize;

    /// Get the name of the indicator.
    fn name(&self) -> &str;

    /// The most recent value, if the bars cover the period.
    fn latest(&self, bars: &[Bar]) -> Option<Self::Output> {
        self.calculate(bars).pop()
    }
}
