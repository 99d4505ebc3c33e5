//! Market data trait definitions.

use crate::error::DataError;
use crate::types::Bar;
use async_trait::async_trait;

/// Supplier of intraday OHLCV bars.
#[async_trait]
pub trait BarSource: Send + Sync {
    /// Fetch the recent bars for a symbol.
    ///
    /// # Returns
    /// A vector of bars ordered from oldest to newest. Bars may carry
    /// missing (NaN) fields; callers are expected to drop those rows.
    async fn fetch_bars(&self, symbol: &str) -> Result<Vec<Bar>, DataError>;

    /// Get the data source name.
    fn name(&self) -> &str;
}

/// Supplier of the list of symbols a whole-universe scan covers.
pub trait SymbolUniverse: Send + Sync {
    /// Load the universe. Symbols come back uppercased and trimmed.
    fn load_symbols(&self) -> Result<Vec<String>, DataError>;
}

/// Uppercase and trim symbols, dropping blank entries.
pub fn normalize_symbols<I, S>(symbols: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    symbols
        .into_iter()
        .map(|s| s.as_ref().trim().to_uppercase())
        .filter(|s| !s.is_empty())
        .collect()
}

/// A fixed, in-memory universe.
#[derive(Debug, Clone, Default)]
pub struct StaticUniverse {
    symbols: Vec<String>,
}

impl StaticUniverse {
    /// Create a universe from the given symbols.
    pub fn new<I, S>(symbols: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            symbols: normalize_symbols(symbols),
        }
    }
}

impl SymbolUniverse for StaticUniverse {
    fn load_symbols(&self) -> Result<Vec<String>, DataError> {
        Ok(self.symbols.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_symbols() {
        let symbols = normalize_symbols([" infy ", "", "tcs", "   "]);
        assert_eq!(symbols, vec!["INFY".to_string(), "TCS".to_string()]);
    }

    #[test]
    fn test_static_universe() {
        let universe = StaticUniverse::new(vec!["hdfcbank", " itc"]);
        assert_eq!(universe.load_symbols().unwrap(), vec!["HDFCBANK", "ITC"]);
    }
}
