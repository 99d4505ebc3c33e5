//! CSV bar source.

use std::path::{Path, PathBuf};

use assistant_core::error::DataError;
use assistant_core::traits::BarSource;
use assistant_core::types::Bar;
use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime};
use csv::ReaderBuilder;
use serde::Deserialize;
use tracing::debug;

/// CSV record format. Empty cells become missing values.
#[derive(Debug, Deserialize)]
struct CsvRecord {
    #[serde(
        alias = "Date",
        alias = "date",
        alias = "Datetime",
        alias = "datetime",
        alias = "timestamp",
        alias = "Timestamp"
    )]
    date: String,
    #[serde(alias = "Open", alias = "open")]
    open: Option<f64>,
    #[serde(alias = "High", alias = "high")]
    high: Option<f64>,
    #[serde(alias = "Low", alias = "low")]
    low: Option<f64>,
    #[serde(alias = "Close", alias = "close", alias = "Adj Close")]
    close: Option<f64>,
    #[serde(alias = "Volume", alias = "volume", default)]
    volume: Option<f64>,
}

/// Reads bars from `<dir>/<SYMBOL>.csv`.
///
/// A lowercase file name and a `_intraday` suffix are also accepted.
#[derive(Debug, Clone)]
pub struct CsvBarSource {
    dir: PathBuf,
}

impl CsvBarSource {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn candidate_paths(&self, symbol: &str) -> [PathBuf; 4] {
        let upper = symbol.to_uppercase();
        let lower = symbol.to_lowercase();
        [
            self.dir.join(format!("{upper}.csv")),
            self.dir.join(format!("{lower}.csv")),
            self.dir.join(format!("{upper}_intraday.csv")),
            self.dir.join(format!("{lower}_intraday.csv")),
        ]
    }

    /// Resolve the file holding a symbol's bars.
    pub fn path_for(&self, symbol: &str) -> Option<PathBuf> {
        self.candidate_paths(symbol)
            .into_iter()
            .find(|path| path.is_file())
    }

    /// Load bars from a specific path, oldest first.
    pub fn load_from_path(path: &Path) -> Result<Vec<Bar>, DataError> {
        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .trim(csv::Trim::All)
            .from_path(path)
            .map_err(|e| DataError::ParseError(e.to_string()))?;

        let mut bars = Vec::new();

        for result in reader.deserialize() {
            let record: CsvRecord = result.map_err(|e| DataError::ParseError(e.to_string()))?;

            let timestamp = parse_timestamp(&record.date)?;

            bars.push(Bar::new(
                timestamp,
                record.open.unwrap_or(f64::NAN),
                record.high.unwrap_or(f64::NAN),
                record.low.unwrap_or(f64::NAN),
                record.close.unwrap_or(f64::NAN),
                record.volume.unwrap_or(f64::NAN),
            ));
        }

        bars.sort_by_key(|b| b.timestamp);
        bars.dedup_by_key(|b| b.timestamp);

        Ok(bars)
    }
}

#[async_trait]
impl BarSource for CsvBarSource {
    async fn fetch_bars(&self, symbol: &str) -> Result<Vec<Bar>, DataError> {
        let path = self
            .path_for(symbol)
            .ok_or_else(|| DataError::SymbolNotFound(symbol.to_string()))?;

        debug!(symbol, path = %path.display(), "Loading bars from CSV");
        Self::load_from_path(&path)
    }

    fn name(&self) -> &str {
        "csv"
    }
}

/// Parse various timestamp formats into Unix milliseconds.
fn parse_timestamp(date_str: &str) -> Result<i64, DataError> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(date_str) {
        return Ok(dt.timestamp_millis());
    }
    // Exchange-local timestamps with an offset, e.g. "2024-01-15 09:15:00+05:30"
    if let Ok(dt) = DateTime::parse_from_str(date_str, "%Y-%m-%d %H:%M:%S%:z") {
        return Ok(dt.timestamp_millis());
    }

    let datetime_formats = ["%Y-%m-%d %H:%M:%S", "%Y-%m-%d %H:%M", "%Y-%m-%dT%H:%M:%S"];
    for format in datetime_formats {
        if let Ok(dt) = NaiveDateTime::parse_from_str(date_str, format) {
            return Ok(dt.and_utc().timestamp_millis());
        }
    }

    let date_formats = ["%Y-%m-%d", "%Y/%m/%d", "%m/%d/%Y", "%d-%m-%Y"];
    for format in date_formats {
        if let Ok(d) = NaiveDate::parse_from_str(date_str, format) {
            return Ok(d.and_time(NaiveTime::MIN).and_utc().timestamp_millis());
        }
    }

    if let Ok(ts) = date_str.parse::<i64>() {
        // Assume milliseconds if > 10 digits
        if ts > 10_000_000_000 {
            return Ok(ts);
        } else {
            return Ok(ts * 1000);
        }
    }

    Err(DataError::ParseError(format!(
        "Could not parse date: {}",
        date_str
    )))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_parse_timestamp() {
        assert!(parse_timestamp("2024-01-15").is_ok());
        assert!(parse_timestamp("2024-01-15 10:30:00").is_ok());
        assert!(parse_timestamp("1705312800000").is_ok()); // Unix ms
        assert!(parse_timestamp("1705312800").is_ok()); // Unix sec
        assert!(parse_timestamp("not a date").is_err());

        let local = parse_timestamp("2024-01-15 09:15:00+05:30").unwrap();
        let utc = parse_timestamp("2024-01-15T03:45:00Z").unwrap();
        assert_eq!(local, utc);
    }

    #[tokio::test]
    async fn test_fetch_bars_sorted_with_missing_cells() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join("INFY.csv"),
            "Datetime,Open,High,Low,Close,Volume\n\
             2024-01-15 09:20:00,101,102,100,101.5,2000\n\
             2024-01-15 09:15:00,100,101,99,100.5,1500\n\
             2024-01-15 09:25:00,101.5,,101,102,\n",
        )
        .unwrap();

        let source = CsvBarSource::new(dir.path());
        let bars = source.fetch_bars("infy").await.unwrap();

        assert_eq!(bars.len(), 3);
        assert!(bars.windows(2).all(|w| w[0].timestamp < w[1].timestamp));
        assert_eq!(bars[0].close, 100.5);
        assert!(bars[2].high.is_nan());
        assert!(bars[2].volume.is_nan());
        assert!(!bars[2].is_complete());
    }

    #[tokio::test]
    async fn test_intraday_file_variant() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join("tcs_intraday.csv"),
            "timestamp,open,high,low,close,volume\n1705312800,1,2,0.5,1.5,10\n",
        )
        .unwrap();

        let source = CsvBarSource::new(dir.path());
        let bars = source.fetch_bars("TCS").await.unwrap();
        assert_eq!(bars.len(), 1);
        assert_eq!(bars[0].timestamp, 1_705_312_800_000);
    }

    #[tokio::test]
    async fn test_missing_symbol() {
        let dir = tempfile::tempdir().unwrap();
        let source = CsvBarSource::new(dir.path());

        assert!(matches!(
            source.fetch_bars("NOPE").await,
            Err(DataError::SymbolNotFound(_))
        ));
    }
}
