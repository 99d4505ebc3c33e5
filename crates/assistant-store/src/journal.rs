//! Append-only trade decision journal.

use std::fs::OpenOptions;
use std::path::PathBuf;
use std::sync::{Mutex, PoisonError};

use assistant_core::error::StoreError;
use assistant_core::traits::DecisionRecorder;
use assistant_core::types::Action;
use chrono::{DateTime, Utc};
use csv::{ReaderBuilder, WriterBuilder};
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

/// One journal row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TradeRecord {
    pub id: Uuid,
    pub timestamp: DateTime<Utc>,
    pub symbol: String,
    pub action: Action,
    pub price: f64,
    pub confidence: String,
}

/// CSV journal of decisions, one row per recorded BUY or SELL.
#[derive(Debug)]
pub struct CsvTradeJournal {
    path: PathBuf,
    lock: Mutex<()>,
}

impl CsvTradeJournal {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &PathBuf {
        &self.path
    }

    fn append(&self, record: &TradeRecord) -> Result<(), StoreError> {
        let _guard = self.lock.lock().unwrap_or_else(PoisonError::into_inner);

        crate::ensure_parent(&self.path)?;
        let write_header = !self.path.exists() || self.path.metadata()?.len() == 0;
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;

        let mut writer = WriterBuilder::new()
            .has_headers(write_header)
            .from_writer(file);
        writer
            .serialize(record)
            .map_err(|e| StoreError::Csv(e.to_string()))?;
        writer.flush()?;
        Ok(())
    }

    /// Every row in the journal, oldest first.
    pub fn read_all(&self) -> Result<Vec<TradeRecord>, StoreError> {
        let _guard = self.lock.lock().unwrap_or_else(PoisonError::into_inner);

        if !self.path.exists() {
            return Ok(Vec::new());
        }

        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .from_path(&self.path)
            .map_err(|e| StoreError::Csv(e.to_string()))?;

        reader
            .deserialize()
            .map(|row| row.map_err(|e| StoreError::Csv(e.to_string())))
            .collect()
    }
}

impl DecisionRecorder for CsvTradeJournal {
    fn record_trade_decision(
        &self,
        symbol: &str,
        action: Action,
        price: f64,
        confidence: &str,
    ) -> Result<(), StoreError> {
        let record = TradeRecord {
            id: Uuid::new_v4(),
            timestamp: Utc::now(),
            symbol: symbol.to_string(),
            action,
            price,
            confidence: confidence.to_string(),
        };

        self.append(&record)?;
        info!(symbol, %action, price, confidence, "Trade decision recorded");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_records_append_with_single_header() {
        let dir = tempfile::tempdir().unwrap();
        let journal = CsvTradeJournal::new(dir.path().join("logs").join("trades.csv"));

        journal
            .record_trade_decision("INFY", Action::Buy, 1510.25, "rsi=55.00, atr_pct=1.20, sentiment=neutral")
            .unwrap();
        journal
            .record_trade_decision("TCS", Action::Sell, 3620.0, "rsi=71.00, atr_pct=0.90, sentiment=positive")
            .unwrap();

        let records = journal.read_all().unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].symbol, "INFY");
        assert_eq!(records[0].action, Action::Buy);
        assert_eq!(records[1].action, Action::Sell);
        assert_eq!(records[1].confidence, "rsi=71.00, atr_pct=0.90, sentiment=positive");
        assert_ne!(records[0].id, records[1].id);

        let text = std::fs::read_to_string(journal.path()).unwrap();
        assert_eq!(text.matches("id,timestamp,symbol,action,price,confidence").count(), 1);
        assert!(text.contains(",BUY,"));
    }

    #[test]
    fn test_read_missing_journal() {
        let dir = tempfile::tempdir().unwrap();
        let journal = CsvTradeJournal::new(dir.path().join("trades.csv"));

        assert!(journal.read_all().unwrap().is_empty());
    }
}
