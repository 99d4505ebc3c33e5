//! Technical indicators and per-symbol feature extraction.
//!
//! This crate provides the indicator engine used by every scan:
//! - Moving averages (SMA, adjusted EMA)
//! - Momentum (simple-average RSI)
//! - Volatility (true range, rolling-mean ATR)
//! - Volume (cumulative VWAP, trailing volume average)
//! - Session high/low for the most recent trading day
//!
//! [`compute_features`] combines them into a [`FeatureVector`](assistant_core::FeatureVector).

pub mod features;
pub mod momentum;
pub mod moving_average;
pub mod session;
pub mod volatility;
pub mod volume;

pub use features::{compute_features, FeatureEngine, MIN_BARS};
pub use momentum::Rsi;
pub use moving_average::{Ema, Sma};
pub use session::{session_range, SessionRange};
pub use volatility::{true_ranges, Atr};
pub use volume::{trailing_mean, Vwap};
