//! Volume-based indicators.

use assistant_core::traits::BarIndicator;
use assistant_core::types::Bar;

/// Mean of the last `lookback` values (all of them if fewer), 0.0 when empty.
pub fn trailing_mean(data: &[f64], lookback: usize) -> f64 {
    let start = data.len().saturating_sub(lookback);
    let window = &data[start..];
    if window.is_empty() {
        return 0.0;
    }
    window.iter().sum::<f64>() / window.len() as f64
}

/// Volume-Weighted Average Price, cumulative from the first bar supplied.
///
/// While no volume has traded the VWAP is undefined and the bar's close is
/// reported instead.
#[derive(Debug, Clone, Default)]
pub struct Vwap;

impl Vwap {
    pub fn new() -> Self {
        Self
    }
}

impl BarIndicator for Vwap {
    type Output = f64;

    fn calculate(&self, bars: &[Bar]) -> Vec<f64> {
        let mut cum_pv = 0.0;
        let mut cum_volume = 0.0;

        bars.iter()
            .map(|bar| {
                cum_pv += bar.typical_price() * bar.volume;
                cum_volume += bar.volume;
                if cum_volume > 0.0 {
                    cum_pv / cum_volume
                } else {
                    bar.close
                }
            })
            .collect()
    }

    fn period(&self) -> usize {
        1
    }

    fn name(&self) -> &str {
        "VWAP"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trailing_mean() {
        let data: Vec<f64> = (1..=30).map(|v| v as f64).collect();

        // last 20 values: 11..=30 -> mean 20.5
        assert!((trailing_mean(&data, 20) - 20.5).abs() < 1e-10);
        assert!((trailing_mean(&[2.0, 4.0], 20) - 3.0).abs() < 1e-10);
        assert_eq!(trailing_mean(&[], 20), 0.0);
    }

    #[test]
    fn test_vwap_cumulative() {
        let bars = vec![
            // typical price 10
            Bar::new(1, 10.0, 11.0, 9.0, 10.0, 100.0),
            // typical price 20
            Bar::new(2, 20.0, 21.0, 19.0, 20.0, 300.0),
        ];
        let result = Vwap::new().calculate(&bars);

        assert!((result[0] - 10.0).abs() < 1e-10);
        // (10*100 + 20*300) / 400
        assert!((result[1] - 17.5).abs() < 1e-10);
    }

    #[test]
    fn test_vwap_zero_volume_falls_back_to_close() {
        let bars = vec![
            Bar::new(1, 10.0, 11.0, 9.0, 10.5, 0.0),
            Bar::new(2, 10.5, 12.0, 10.0, 11.5, 0.0),
        ];

        assert_eq!(Vwap::new().latest(&bars), Some(11.5));
    }
}
