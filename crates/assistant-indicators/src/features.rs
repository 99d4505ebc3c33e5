//! Feature extraction: one [`FeatureVector`] per symbol per scan.

use assistant_core::traits::{BarIndicator, Indicator};
use assistant_core::types::{Bar, FeatureVector};
use chrono::{FixedOffset, Offset, Utc};

use crate::momentum::Rsi;
use crate::moving_average::Ema;
use crate::session::session_range;
use crate::volatility::Atr;
use crate::volume::{trailing_mean, Vwap};

/// Minimum number of complete rows a series needs to produce features.
pub const MIN_BARS: usize = 30;

const FAST_EMA_SPAN: usize = 20;
const SLOW_EMA_SPAN: usize = 50;
const ATR_PERIOD: usize = 14;
const RSI_PERIOD: usize = 14;
const VOLUME_LOOKBACK: usize = 20;

/// `numerator / denominator * 100`, or 0.0 for a non-positive denominator.
fn percent_of(numerator: f64, denominator: f64) -> f64 {
    if denominator > 0.0 {
        numerator / denominator * 100.0
    } else {
        0.0
    }
}

/// Computes feature vectors from raw bar series.
///
/// The only state is the UTC offset used to decide which bars belong to the
/// current trading session.
#[derive(Debug, Clone)]
pub struct FeatureEngine {
    session_offset: FixedOffset,
    fast_ema: Ema,
    slow_ema: Ema,
    atr: Atr,
    rsi: Rsi,
    vwap: Vwap,
}

impl Default for FeatureEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl FeatureEngine {
    /// Engine with session dates taken in UTC.
    pub fn new() -> Self {
        Self {
            session_offset: Utc.fix(),
            fast_ema: Ema::new(FAST_EMA_SPAN),
            slow_ema: Ema::new(SLOW_EMA_SPAN),
            atr: Atr::new(ATR_PERIOD),
            rsi: Rsi::new(RSI_PERIOD),
            vwap: Vwap::new(),
        }
    }

    /// Engine with session dates taken in the exchange's UTC offset.
    pub fn with_session_offset(offset: FixedOffset) -> Self {
        Self {
            session_offset: offset,
            ..Self::new()
        }
    }

    pub fn session_offset(&self) -> FixedOffset {
        self.session_offset
    }

    /// Derive the feature vector, or `None` when fewer than [`MIN_BARS`]
    /// complete rows are available.
    pub fn compute(&self, bars: &[Bar]) -> Option<FeatureVector> {
        let bars: Vec<Bar> = bars.iter().copied().filter(Bar::is_complete).collect();
        if bars.len() < MIN_BARS {
            return None;
        }

        let last = bars.last()?;
        let price = last.close;
        let volume = last.volume;

        let closes: Vec<f64> = bars.iter().map(|b| b.close).collect();
        let volumes: Vec<f64> = bars.iter().map(|b| b.volume).collect();

        let ema20 = self.fast_ema.latest(&closes).unwrap_or(price);
        let ema50 = self.slow_ema.latest(&closes).unwrap_or(price);
        let atr = self.atr.latest(&bars).unwrap_or(0.0);
        let rsi = self.rsi.latest(&closes).unwrap_or(50.0);
        let vwap = self.vwap.latest(&bars).unwrap_or(price);

        let avg_volume = trailing_mean(&volumes, VOLUME_LOOKBACK);
        let vol_spike = if avg_volume > 0.0 {
            volume / avg_volume
        } else {
            0.0
        };

        let session = session_range(&bars, &self.session_offset)?;

        Some(FeatureVector {
            price,
            ema20,
            ema50,
            atr,
            atr_pct: percent_of(atr, price),
            rsi,
            avg_volume,
            vol_spike,
            vwap,
            volume,
            session_low: session.low,
            session_high: session.high,
            session_range: session.width(),
            pct_from_low: percent_of(price - session.low, session.low),
            pct_from_high: percent_of(session.high - price, session.high),
        })
    }
}

/// Feature vector with session dates taken in UTC.
pub fn compute_features(bars: &[Bar]) -> Option<FeatureVector> {
    FeatureEngine::new().compute(bars)
}
