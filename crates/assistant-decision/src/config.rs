//! Decision thresholds.

use assistant_core::error::DecisionError;
use serde::{Deserialize, Serialize};

/// Thresholds used by the [`DecisionEngine`](crate::DecisionEngine).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DecisionConfig {
    /// Fraction below the session high that still counts as "at the high"
    pub high_buffer: f64,
    /// Minimum RSI for a SELL on a held symbol
    pub sell_rsi_threshold: f64,
    /// Fraction above the session low that still counts as "at the low"
    pub low_buffer: f64,
    /// Last volume must be at least this multiple of the average volume
    pub volume_multiplier: f64,
    /// Minimum RSI for a BUY
    pub buy_rsi_floor: f64,
}

impl Default for DecisionConfig {
    fn default() -> Self {
        Self {
            high_buffer: 0.01,
            sell_rsi_threshold: 60.0,
            low_buffer: 0.02,
            volume_multiplier: 1.5,
            buy_rsi_floor: 45.0,
        }
    }
}

impl DecisionConfig {
    pub fn validate(&self) -> Result<(), DecisionError> {
        for (name, buffer) in [("high_buffer", self.high_buffer), ("low_buffer", self.low_buffer)] {
            if !(0.0..1.0).contains(&buffer) {
                return Err(DecisionError::InvalidConfig(format!(
                    "{name} must be in [0, 1), got {buffer}"
                )));
            }
        }
        if self.volume_multiplier.is_nan() || self.volume_multiplier <= 0.0 {
            return Err(DecisionError::InvalidConfig(
                "volume_multiplier must be positive".into(),
            ));
        }
        for (name, rsi) in [
            ("sell_rsi_threshold", self.sell_rsi_threshold),
            ("buy_rsi_floor", self.buy_rsi_floor),
        ] {
            if !(0.0..=100.0).contains(&rsi) {
                return Err(DecisionError::InvalidConfig(format!(
                    "{name} must be between 0 and 100, got {rsi}"
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = DecisionConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.high_buffer, 0.01);
        assert_eq!(config.sell_rsi_threshold, 60.0);
        assert_eq!(config.low_buffer, 0.02);
        assert_eq!(config.volume_multiplier, 1.5);
        assert_eq!(config.buy_rsi_floor, 45.0);
    }

    #[test]
    fn test_rejects_bad_buffers() {
        let config = DecisionConfig {
            low_buffer: 1.0,
            ..Default::default()
        };
        assert!(config.validate().is_err());

        let config = DecisionConfig {
            high_buffer: -0.01,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rejects_bad_thresholds() {
        let config = DecisionConfig {
            volume_multiplier: 0.0,
            ..Default::default()
        };
        assert!(config.validate().is_err());

        let config = DecisionConfig {
            volume_multiplier: f64::NAN,
            ..Default::default()
        };
        assert!(config.validate().is_err());

        let config = DecisionConfig {
            sell_rsi_threshold: 120.0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_partial_deserialize_uses_defaults() {
        let config: DecisionConfig = serde_json::from_str(r#"{"buy_rsi_floor": 50.0}"#).unwrap();
        assert_eq!(config.buy_rsi_floor, 50.0);
        assert_eq!(config.volume_multiplier, 1.5);
    }
}
