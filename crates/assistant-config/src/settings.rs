//! Configuration structures.

use std::time::Duration;

use assistant_core::error::{AssistantError, AssistantResult};
use assistant_data::YahooConfig;
use assistant_decision::DecisionConfig;
use assistant_monitor::TelegramConfig;
use assistant_news::NewsApiConfig;
use assistant_scan::ScanConfig;
use chrono::FixedOffset;
use serde::{Deserialize, Serialize};

/// Non-empty value of the environment variable `name`.
fn secret_from_env(name: &str) -> Option<String> {
    std::env::var(name)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Main application configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub app: AppSettings,
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub scan: ScanConfig,
    #[serde(default)]
    pub decision: DecisionConfig,
    #[serde(default)]
    pub market_data: MarketDataSettings,
    #[serde(default)]
    pub news: NewsSettings,
    #[serde(default)]
    pub telegram: TelegramSettings,
    #[serde(default)]
    pub storage: StorageSettings,
    #[serde(default)]
    pub scheduler: SchedulerSettings,
}

impl AppConfig {
    /// Check the sections that carry thresholds.
    pub fn validate(&self) -> AssistantResult<()> {
        self.scan.validate()?;
        self.decision.validate()?;
        self.market_data.session_offset()?;
        if self.news.page_size == 0 {
            return Err(AssistantError::Config("news.page_size must be positive".into()));
        }
        if self.scheduler.scan_interval_secs == 0 {
            return Err(AssistantError::Config(
                "scheduler.scan_interval_secs must be positive".into(),
            ));
        }
        Ok(())
    }
}

/// General app settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AppSettings {
    pub name: String,
    pub environment: String,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            name: "market-assistant".to_string(),
            environment: "development".to_string(),
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    /// `pretty` or `json`
    pub format: String,
    /// Directory for the daily log file; stdout only when unset
    pub dir: Option<String>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
            dir: None,
        }
    }
}

impl LoggingConfig {
    pub fn is_json(&self) -> bool {
        self.format.eq_ignore_ascii_case("json")
    }
}

/// Where bars come from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DataProvider {
    #[default]
    Yahoo,
    Csv,
}

/// Market data settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MarketDataSettings {
    pub provider: DataProvider,
    pub base_url: String,
    pub symbol_suffix: String,
    pub interval: String,
    pub range: String,
    pub timeout_secs: u64,
    /// `<csv_dir>/<SYMBOL>.csv` files for the csv provider
    pub csv_dir: String,
    /// Exchange offset from UTC, used to find the trading session
    pub session_utc_offset_minutes: i32,
}

impl Default for MarketDataSettings {
    fn default() -> Self {
        let yahoo = YahooConfig::default();
        Self {
            provider: DataProvider::default(),
            base_url: yahoo.base_url,
            symbol_suffix: yahoo.symbol_suffix,
            interval: yahoo.interval,
            range: yahoo.range,
            timeout_secs: yahoo.timeout_secs,
            csv_dir: "data/bars".to_string(),
            session_utc_offset_minutes: 330,
        }
    }
}

impl MarketDataSettings {
    pub fn yahoo(&self) -> YahooConfig {
        YahooConfig {
            base_url: self.base_url.clone(),
            symbol_suffix: self.symbol_suffix.clone(),
            interval: self.interval.clone(),
            range: self.range.clone(),
            timeout_secs: self.timeout_secs,
        }
    }

    pub fn session_offset(&self) -> AssistantResult<FixedOffset> {
        FixedOffset::east_opt(self.session_utc_offset_minutes * 60).ok_or_else(|| {
            AssistantError::Config(format!(
                "market_data.session_utc_offset_minutes out of range: {}",
                self.session_utc_offset_minutes
            ))
        })
    }
}

/// News settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct NewsSettings {
    pub api_key_env: String,
    pub base_url: String,
    pub page_size: usize,
    pub timeout_secs: u64,
    pub cache_ttl_secs: u64,
    /// JSON cache file; the cache lives in memory when unset
    pub cache_file: Option<String>,
}

impl Default for NewsSettings {
    fn default() -> Self {
        let client = NewsApiConfig::default();
        Self {
            api_key_env: "NEWS_API_KEY".to_string(),
            base_url: client.base_url,
            page_size: client.page_size,
            timeout_secs: client.timeout_secs,
            cache_ttl_secs: 45 * 60,
            cache_file: Some("data/news_cache.json".to_string()),
        }
    }
}

impl NewsSettings {
    pub fn client(&self) -> NewsApiConfig {
        NewsApiConfig {
            base_url: self.base_url.clone(),
            page_size: self.page_size,
            timeout_secs: self.timeout_secs,
        }
    }

    pub fn cache_ttl(&self) -> Duration {
        Duration::from_secs(self.cache_ttl_secs)
    }

    pub fn api_key(&self) -> Option<String> {
        secret_from_env(&self.api_key_env)
    }
}

/// Telegram settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TelegramSettings {
    pub bot_token_env: String,
    pub chat_id_env: String,
    pub base_url: String,
    pub timeout_secs: u64,
    pub poll_timeout_secs: u64,
}

impl Default for TelegramSettings {
    fn default() -> Self {
        let client = TelegramConfig::default();
        Self {
            bot_token_env: "TELEGRAM_BOT_TOKEN".to_string(),
            chat_id_env: "TELEGRAM_CHAT_ID".to_string(),
            base_url: client.base_url,
            timeout_secs: client.timeout_secs,
            poll_timeout_secs: client.poll_timeout_secs,
        }
    }
}

impl TelegramSettings {
    pub fn client(&self) -> TelegramConfig {
        TelegramConfig {
            base_url: self.base_url.clone(),
            timeout_secs: self.timeout_secs,
            poll_timeout_secs: self.poll_timeout_secs,
        }
    }

    pub fn bot_token(&self) -> Option<String> {
        secret_from_env(&self.bot_token_env)
    }

    pub fn chat_id(&self) -> Option<String> {
        secret_from_env(&self.chat_id_env)
    }
}

/// File locations.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageSettings {
    pub data_dir: String,
    /// CSV with a `symbol` column
    pub symbols_file: String,
    pub positions_file: String,
    pub trade_journal: String,
    pub analysis_dir: String,
    pub graph_dir: String,
}

impl Default for StorageSettings {
    fn default() -> Self {
        Self {
            data_dir: "data".to_string(),
            symbols_file: "data/nse_symbols.csv".to_string(),
            positions_file: "data/portfolio.json".to_string(),
            trade_journal: "logs/trades.csv".to_string(),
            analysis_dir: "analysis".to_string(),
            graph_dir: "graphs".to_string(),
        }
    }
}

/// Daemon timing.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SchedulerSettings {
    pub scan_interval_secs: u64,
    /// Pause between chat polls
    pub poll_interval_secs: u64,
}

impl Default for SchedulerSettings {
    fn default() -> Self {
        Self {
            scan_interval_secs: 300,
            poll_interval_secs: 5,
        }
    }
}
