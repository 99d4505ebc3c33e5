//! Symbol universe backed by a CSV file.

use std::path::PathBuf;

use assistant_core::error::DataError;
use assistant_core::traits::{normalize_symbols, SymbolUniverse};
use csv::ReaderBuilder;
use tracing::debug;

/// Reads the tradable symbols from the `symbol` column of a CSV file.
///
/// The header match is case-insensitive; values are trimmed, uppercased
/// and blanks dropped.
#[derive(Debug, Clone)]
pub struct CsvSymbolUniverse {
    path: PathBuf,
}

impl CsvSymbolUniverse {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl SymbolUniverse for CsvSymbolUniverse {
    fn load_symbols(&self) -> Result<Vec<String>, DataError> {
        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_path(&self.path)
            .map_err(|e| {
                DataError::UniverseUnavailable(format!("{}: {}", self.path.display(), e))
            })?;

        let headers = reader
            .headers()
            .map_err(|e| DataError::ParseError(e.to_string()))?;
        let column = headers
            .iter()
            .position(|h| h.trim().eq_ignore_ascii_case("symbol"))
            .ok_or_else(|| {
                DataError::UniverseUnavailable(format!(
                    "{} has no 'symbol' column",
                    self.path.display()
                ))
            })?;

        let mut raw = Vec::new();
        for record in reader.records() {
            let record = record.map_err(|e| DataError::ParseError(e.to_string()))?;
            if let Some(value) = record.get(column) {
                raw.push(value.to_string());
            }
        }

        let symbols = normalize_symbols(raw);
        debug!(path = %self.path.display(), count = symbols.len(), "Loaded symbol universe");
        Ok(symbols)
    }
}
