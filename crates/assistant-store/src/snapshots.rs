//! Per-symbol indicator snapshots.

use std::fs::OpenOptions;
use std::path::PathBuf;
use std::sync::{Mutex, PoisonError};

use assistant_core::error::StoreError;
use assistant_core::traits::SnapshotRecorder;
use assistant_core::types::FeatureVector;
use chrono::{DateTime, SecondsFormat, Utc};
use csv::WriterBuilder;
use serde::Serialize;
use tracing::debug;

/// Column order of every snapshot file.
pub const SNAPSHOT_HEADER: [&str; 11] = [
    "timestamp",
    "price",
    "session_low",
    "session_high",
    "vwap",
    "rsi",
    "atr_pct",
    "avg_volume",
    "vol_spike",
    "pct_from_low",
    "pct_from_high",
];

#[derive(Debug, Serialize)]
struct SnapshotRow {
    timestamp: String,
    price: f64,
    session_low: f64,
    session_high: f64,
    vwap: f64,
    rsi: f64,
    atr_pct: f64,
    avg_volume: f64,
    vol_spike: f64,
    pct_from_low: f64,
    pct_from_high: f64,
}

impl SnapshotRow {
    fn new(features: &FeatureVector, timestamp: DateTime<Utc>) -> Self {
        Self {
            timestamp: timestamp.to_rfc3339_opts(SecondsFormat::Secs, true),
            price: features.price,
            session_low: features.session_low,
            session_high: features.session_high,
            vwap: features.vwap,
            rsi: features.rsi,
            atr_pct: features.atr_pct,
            avg_volume: features.avg_volume,
            vol_spike: features.vol_spike,
            pct_from_low: features.pct_from_low,
            pct_from_high: features.pct_from_high,
        }
    }
}

/// Appends one row per scan to `<dir>/<SYMBOL>.csv`.
#[derive(Debug)]
pub struct CsvSnapshotRecorder {
    dir: PathBuf,
    lock: Mutex<()>,
}

impl CsvSnapshotRecorder {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            lock: Mutex::new(()),
        }
    }

    pub fn path_for(&self, symbol: &str) -> PathBuf {
        self.dir.join(format!("{symbol}.csv"))
    }
}

impl SnapshotRecorder for CsvSnapshotRecorder {
    fn record_snapshot(
        &self,
        symbol: &str,
        features: &FeatureVector,
        timestamp: DateTime<Utc>,
    ) -> Result<(), StoreError> {
        let _guard = self.lock.lock().unwrap_or_else(PoisonError::into_inner);

        std::fs::create_dir_all(&self.dir)?;
        let path = self.path_for(symbol);
        let write_header = !path.exists();

        let file = OpenOptions::new().create(true).append(true).open(&path)?;
        let mut writer = WriterBuilder::new()
            .has_headers(write_header)
            .from_writer(file);
        writer
            .serialize(SnapshotRow::new(features, timestamp))
            .map_err(|e| StoreError::Csv(e.to_string()))?;
        writer.flush()?;

        debug!(symbol, path = %path.display(), "Snapshot recorded");
        Ok(())
    }
}
