//! JSON position book.

use std::collections::BTreeMap;
use std::fs;
use std::path::PathBuf;
use std::sync::{Mutex, PoisonError};

use assistant_core::error::StoreError;
use assistant_core::traits::PositionStore;
use assistant_core::types::Position;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::ensure_parent;

#[derive(Debug, Clone, Serialize, Deserialize)]
struct PositionRecord {
    qty: Decimal,
    price: Decimal,
    timestamp: DateTime<Utc>,
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct PositionFile {
    #[serde(default)]
    positions: BTreeMap<String, PositionRecord>,
}

/// Position book stored as `{"positions": {"SYMBOL": {qty, price, timestamp}}}`.
///
/// The whole book is held in memory and rewritten on every fill.
#[derive(Debug)]
pub struct JsonPositionStore {
    path: PathBuf,
    positions: Mutex<BTreeMap<String, Position>>,
}

impl JsonPositionStore {
    /// Open the book at `path`. A missing file is an empty book.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let path = path.into();
        let file: PositionFile = if path.exists() {
            let text = fs::read_to_string(&path)?;
            if text.trim().is_empty() {
                PositionFile::default()
            } else {
                serde_json::from_str(&text)
                    .map_err(|e| StoreError::Serialization(e.to_string()))?
            }
        } else {
            PositionFile::default()
        };

        let positions = file
            .positions
            .into_iter()
            .map(|(symbol, record)| {
                let symbol = symbol.trim().to_uppercase();
                let position = Position::new(symbol.clone(), record.qty, record.price, record.timestamp);
                (symbol, position)
            })
            .collect();

        Ok(Self {
            path,
            positions: Mutex::new(positions),
        })
    }

    pub fn path(&self) -> &PathBuf {
        &self.path
    }

    fn save(&self, positions: &BTreeMap<String, Position>) -> Result<(), StoreError> {
        let file = PositionFile {
            positions: positions
                .iter()
                .map(|(symbol, p)| {
                    (
                        symbol.clone(),
                        PositionRecord {
                            qty: p.quantity,
                            price: p.avg_price,
                            timestamp: p.updated_at,
                        },
                    )
                })
                .collect(),
        };

        ensure_parent(&self.path)?;
        let text = serde_json::to_string_pretty(&file)
            .map_err(|e| StoreError::Serialization(e.to_string()))?;

        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, text)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}

impl PositionStore for JsonPositionStore {
    fn open_positions(&self) -> Result<Vec<Position>, StoreError> {
        let positions = self.positions.lock().unwrap_or_else(PoisonError::into_inner);
        Ok(positions.values().filter(|p| p.is_open()).cloned().collect())
    }

    fn record_fill(
        &self,
        symbol: &str,
        quantity_delta: Decimal,
        price: Decimal,
        at: DateTime<Utc>,
    ) -> Result<Position, StoreError> {
        let symbol = symbol.trim().to_uppercase();
        if symbol.is_empty() {
            return Err(StoreError::InvalidRecord("empty symbol".into()));
        }
        if price < Decimal::ZERO {
            return Err(StoreError::InvalidRecord(format!("negative price {price}")));
        }

        let mut positions = self.positions.lock().unwrap_or_else(PoisonError::into_inner);
        let mut position = positions
            .get(&symbol)
            .cloned()
            .unwrap_or_else(|| Position::new(symbol.clone(), Decimal::ZERO, Decimal::ZERO, at));

        position.apply_fill(quantity_delta, price, at);

        if position.is_open() {
            info!(
                symbol = %symbol,
                qty = %position.quantity,
                avg_price = %position.avg_price,
                "Position updated"
            );
            positions.insert(symbol.clone(), position.clone());
        } else {
            info!(symbol = %symbol, "Position closed");
            positions.remove(&symbol);
        }

        self.save(&positions)?;
        Ok(position)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_missing_file_is_empty_book() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonPositionStore::open(dir.path().join("portfolio.json")).unwrap();

        assert!(store.open_positions().unwrap().is_empty());
        assert!(store.open_position_symbols().unwrap().is_empty());
    }

    #[test]
    fn test_fills_persist_and_reaverage() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("data").join("portfolio.json");
        let now = Utc::now();

        let store = JsonPositionStore::open(&path).unwrap();
        store.record_fill("infy", dec!(10), dec!(1500), now).unwrap();
        let position = store.record_fill("INFY", dec!(10), dec!(1600), now).unwrap();
        assert_eq!(position.quantity, dec!(20));
        assert_eq!(position.avg_price, dec!(1550));

        let reopened = JsonPositionStore::open(&path).unwrap();
        let positions = reopened.open_positions().unwrap();
        assert_eq!(positions.len(), 1);
        assert_eq!(positions[0].symbol, "INFY");
        assert_eq!(positions[0].quantity, dec!(20));
        assert_eq!(positions[0].avg_price, dec!(1550));
    }

    #[test]
    fn test_selling_out_removes_position() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonPositionStore::open(dir.path().join("portfolio.json")).unwrap();
        let now = Utc::now();

        store.record_fill("TCS", dec!(5), dec!(3500), now).unwrap();
        let partial = store.record_fill("TCS", dec!(-2), dec!(3600), now).unwrap();
        assert_eq!(partial.quantity, dec!(3));
        assert_eq!(partial.avg_price, dec!(3500));

        let closed = store.record_fill("TCS", dec!(-5), dec!(3700), now).unwrap();
        assert!(!closed.is_open());
        assert!(store.open_positions().unwrap().is_empty());

        let text = fs::read_to_string(store.path()).unwrap();
        assert!(!text.contains("TCS"));
    }

    #[test]
    fn test_reads_numeric_fields() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("portfolio.json");
        fs::write(
            &path,
            r#"{"positions": {"hdfcbank": {"qty": 4, "price": 1650.5, "timestamp": "2024-01-15T04:00:00Z"}}}"#,
        )
        .unwrap();

        let store = JsonPositionStore::open(&path).unwrap();
        let symbols = store.open_position_symbols().unwrap();
        assert!(symbols.contains("HDFCBANK"));
    }

    #[test]
    fn test_rejects_blank_symbol() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonPositionStore::open(dir.path().join("portfolio.json")).unwrap();

        assert!(matches!(
            store.record_fill("  ", dec!(1), dec!(1), Utc::now()),
            Err(StoreError::InvalidRecord(_))
        ));
    }
}
