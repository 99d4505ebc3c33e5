//! Configuration management.

mod settings;

pub use settings::{
    AppConfig, AppSettings, DataProvider, LoggingConfig, MarketDataSettings, NewsSettings,
    SchedulerSettings, StorageSettings, TelegramSettings,
};

pub use config::ConfigError;

use config::{Config, Environment, File};
use std::path::Path;

/// Load configuration from file and environment.
///
/// Environment variables override the file, e.g. `ASSISTANT__SCAN__TOP_N=3`.
pub fn load_config(path: &Path) -> Result<AppConfig, ConfigError> {
    let config = Config::builder()
        .add_source(File::from(path).required(true))
        .add_source(
            Environment::with_prefix("ASSISTANT")
                .separator("__")
                .try_parsing(true),
        )
        .build()?;

    config.try_deserialize()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_config(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_load_partial_file_fills_defaults() {
        let file = write_config(
            r#"
[scan]
top_n = 3
min_price = 20.0

[market_data]
provider = "csv"
csv_dir = "fixtures/bars"

[storage]
positions_file = "state/positions.json"
"#,
        );

        let config = load_config(file.path()).unwrap();

        assert_eq!(config.scan.top_n, 3);
        assert_eq!(config.scan.min_price, 20.0);
        assert_eq!(config.scan.max_atr_pct, 8.0);
        assert_eq!(config.market_data.provider, DataProvider::Csv);
        assert_eq!(config.market_data.csv_dir, "fixtures/bars");
        assert_eq!(config.market_data.symbol_suffix, ".NS");
        assert_eq!(config.storage.positions_file, "state/positions.json");
        assert_eq!(config.storage.graph_dir, "graphs");
        assert_eq!(config.decision.volume_multiplier, 1.5);
        assert_eq!(config.scheduler.scan_interval_secs, 300);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(load_config(&dir.path().join("absent.toml")).is_err());
    }

    #[test]
    fn test_invalid_values_fail_validation() {
        let file = write_config(
            r#"
[decision]
low_buffer = 1.5
"#,
        );

        let config = load_config(file.path()).unwrap();
        assert!(config.validate().is_err());
    }
}
