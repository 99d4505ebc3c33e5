//! Persistence trait definitions.

use crate::error::StoreError;
use crate::types::{Action, FeatureVector, Position};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use std::collections::BTreeSet;

/// The user's position book.
pub trait PositionStore: Send + Sync {
    /// All positions with a positive quantity.
    fn open_positions(&self) -> Result<Vec<Position>, StoreError>;

    /// Symbols with an open position.
    fn open_position_symbols(&self) -> Result<BTreeSet<String>, StoreError> {
        Ok(self
            .open_positions()?
            .into_iter()
            .map(|p| p.symbol)
            .collect())
    }

    /// Apply a fill (positive quantity buys, negative sells) and persist it.
    ///
    /// # Returns
    /// The position after the fill; a flattened position has zero quantity.
    fn record_fill(
        &self,
        symbol: &str,
        quantity_delta: Decimal,
        price: Decimal,
        at: DateTime<Utc>,
    ) -> Result<Position, StoreError>;
}

/// Append-only record of indicator snapshots.
pub trait SnapshotRecorder: Send + Sync {
    /// Record the features computed for a symbol at scan time.
    fn record_snapshot(
        &self,
        symbol: &str,
        features: &FeatureVector,
        timestamp: DateTime<Utc>,
    ) -> Result<(), StoreError>;
}

/// Append-only record of BUY/SELL decisions.
pub trait DecisionRecorder: Send + Sync {
    /// Record one decision.
    fn record_trade_decision(
        &self,
        symbol: &str,
        action: Action,
        price: f64,
        confidence: &str,
    ) -> Result<(), StoreError>;
}
