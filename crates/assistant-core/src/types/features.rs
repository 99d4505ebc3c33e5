//! Per-symbol indicator snapshot.

use serde::{Deserialize, Serialize};

use super::Sentiment;

/// Indicator values derived from a symbol's bar series at scan time.
///
/// Computed fresh for every scan and never mutated afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FeatureVector {
    /// Last close
    pub price: f64,
    /// 20-span exponential moving average of close
    pub ema20: f64,
    /// 50-span exponential moving average of close
    pub ema50: f64,
    /// 14-period average true range
    pub atr: f64,
    /// ATR as a percentage of price
    pub atr_pct: f64,
    /// 14-period relative strength index (0-100)
    pub rsi: f64,
    /// Mean volume of the last 20 bars
    pub avg_volume: f64,
    /// Last volume relative to `avg_volume`
    pub vol_spike: f64,
    /// Cumulative volume-weighted average price
    pub vwap: f64,
    /// Last bar's volume
    pub volume: f64,
    /// Lowest low of the current session
    pub session_low: f64,
    /// Highest high of the current session
    pub session_high: f64,
    /// `session_high - session_low`
    pub session_range: f64,
    /// Distance of price above the session low, in percent
    pub pct_from_low: f64,
    /// Distance of price below the session high, in percent
    pub pct_from_high: f64,
}

impl FeatureVector {
    /// Human-readable trace attached to candidates and journal entries.
    pub fn confidence_annotation(&self, sentiment: Sentiment) -> String {
        format!(
            "rsi={:.2}, atr_pct={:.2}, sentiment={}",
            self.rsi, self.atr_pct, sentiment
        )
    }
}
