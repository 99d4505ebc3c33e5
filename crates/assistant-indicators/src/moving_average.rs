//! Moving average indicators.

use assistant_core::traits::Indicator;

/// Simple Moving Average (SMA).
///
/// Calculates the arithmetic mean of the last N values. The first output
/// corresponds to the N-th input.
#[derive(Debug, Clone)]
pub struct Sma {
    period: usize,
}

impl Sma {
    /// Create a new SMA with the specified period.
    pub fn new(period: usize) -> Self {
        assert!(period > 0, "Period must be greater than 0");
        Self { period }
    }
}

impl Indicator for Sma {
    type Output = f64;

    fn calculate(&self, data: &[f64]) -> Vec<f64> {
        if data.len() < self.period {
            return vec![];
        }

        let mut result = Vec::with_capacity(data.len() - self.period + 1);
        let period_f64 = self.period as f64;

        // Initial sum
        let mut sum: f64 = data[..self.period].iter().sum();
        result.push(sum / period_f64);

        // Sliding window
        for i in self.period..data.len() {
            sum = sum - data[i - self.period] + data[i];
            result.push(sum / period_f64);
        }

        result
    }

    fn period(&self) -> usize {
        self.period
    }

    fn name(&self) -> &str {
        "SMA"
    }
}

/// Exponential Moving Average (EMA), adjusted form.
///
/// Each output is the weighted average of every value seen so far with
/// weights `(1 - alpha)^i`, newest first, where `alpha = 2 / (span + 1)`.
/// Produces one value per input, starting at the first.
#[derive(Debug, Clone)]
pub struct Ema {
    span: usize,
    alpha: f64,
}

impl Ema {
    /// Create a new EMA with the specified span.
    pub fn new(span: usize) -> Self {
        assert!(span > 0, "Span must be greater than 0");
        let alpha = 2.0 / (span as f64 + 1.0);
        Self { span, alpha }
    }

    /// The span the smoothing factor was derived from.
    pub fn span(&self) -> usize {
        self.span
    }

    /// The smoothing factor.
    pub fn alpha(&self) -> f64 {
        self.alpha
    }
}

impl Indicator for Ema {
    type Output = f64;

    fn calculate(&self, data: &[f64]) -> Vec<f64> {
        let decay = 1.0 - self.alpha;
        let mut weighted_sum = 0.0;
        let mut weight_total = 0.0;

        data.iter()
            .map(|&price| {
                weighted_sum = price + decay * weighted_sum;
                weight_total = 1.0 + decay * weight_total;
                weighted_sum / weight_total
            })
            .collect()
    }

    fn period(&self) -> usize {
        1
    }

    fn name(&self) -> &str {
        "EMA"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sma() {
        let sma = Sma::new(3);
        let data = vec![1.0, 2.0, 3.0, 4.0, 5.0];
        let result = sma.calculate(&data);

        assert_eq!(result.len(), 3);
        assert!((result[0] - 2.0).abs() < 1e-10); // (1+2+3)/3
        assert!((result[1] - 3.0).abs() < 1e-10); // (2+3+4)/3
        assert!((result[2] - 4.0).abs() < 1e-10); // (3+4+5)/3
    }

    #[test]
    fn test_sma_insufficient_data() {
        let sma = Sma::new(5);
        let result = sma.calculate(&[1.0, 2.0, 3.0]);

        assert!(result.is_empty());
    }

    #[test]
    fn test_ema_adjusted_weights() {
        let ema = Ema::new(3);
        let result = ema.calculate(&[1.0, 2.0, 3.0]);

        // alpha = 0.5
        // [1] -> 1
        // [1, 2] -> (2 + 0.5*1) / 1.5
        // [1, 2, 3] -> (3 + 0.5*2 + 0.25*1) / 1.75
        assert_eq!(result.len(), 3);
        assert!((result[0] - 1.0).abs() < 1e-10);
        assert!((result[1] - 5.0 / 3.0).abs() < 1e-10);
        assert!((result[2] - 4.25 / 1.75).abs() < 1e-10);
    }

    #[test]
    fn test_ema_constant_series() {
        let ema = Ema::new(20);
        let result = ema.calculate(&[42.0; 60]);

        assert!(result.iter().all(|v| (v - 42.0).abs() < 1e-10));
        assert!((ema.alpha() - 2.0 / 21.0).abs() < 1e-12);
    }

    #[test]
    fn test_ema_empty_input() {
        let ema = Ema::new(50);
        assert!(ema.calculate(&[]).is_empty());
        assert_eq!(ema.latest(&[]), None);
    }
}
