//! Liquidity and volatility pre-filter.

use std::fmt;

use assistant_core::types::FeatureVector;

use crate::scanner::ScanConfig;

/// Why a symbol was left out of a scan.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Rejection {
    PriceBelowMin { price: f64, min: f64 },
    VolumeBelowMin { avg_volume: f64, min: f64 },
    AtrOutOfRange { atr_pct: f64, min: f64, max: f64 },
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Rejection::PriceBelowMin { price, min } => {
                write!(f, "price {price:.2} < min_price {min}")
            }
            Rejection::VolumeBelowMin { avg_volume, min } => {
                write!(f, "avg_volume {avg_volume:.0} < min_avg_volume {min}")
            }
            Rejection::AtrOutOfRange { atr_pct, min, max } => {
                write!(f, "atr_pct {atr_pct:.2} not in [{min}, {max}]")
            }
        }
    }
}

/// Rejects symbols that are too cheap, too illiquid, too quiet or too wild.
#[derive(Debug, Clone, Copy)]
pub struct EligibilityFilter {
    min_price: f64,
    min_avg_volume: f64,
    min_atr_pct: f64,
    max_atr_pct: f64,
}

impl EligibilityFilter {
    pub fn new(config: &ScanConfig) -> Self {
        Self {
            min_price: config.min_price,
            min_avg_volume: config.min_avg_volume,
            min_atr_pct: config.min_atr_pct,
            max_atr_pct: config.max_atr_pct,
        }
    }

    /// First failed check, if any. NaN values fail every check.
    pub fn check(&self, features: &FeatureVector) -> Result<(), Rejection> {
        if !(features.price >= self.min_price) {
            return Err(Rejection::PriceBelowMin {
                price: features.price,
                min: self.min_price,
            });
        }
        if !(features.avg_volume >= self.min_avg_volume) {
            return Err(Rejection::VolumeBelowMin {
                avg_volume: features.avg_volume,
                min: self.min_avg_volume,
            });
        }
        if !(self.min_atr_pct..=self.max_atr_pct).contains(&features.atr_pct) {
            return Err(Rejection::AtrOutOfRange {
                atr_pct: features.atr_pct,
                min: self.min_atr_pct,
                max: self.max_atr_pct,
            });
        }
        Ok(())
    }
}
