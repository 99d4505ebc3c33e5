//! Validate configuration command.

use anyhow::Result;
use assistant_config::{AppConfig, ConfigError};
use std::path::Path;

pub fn run(config_path: &Path, loaded: Result<AppConfig, ConfigError>) -> Result<()> {
    println!("Validating configuration: {:?}", config_path);

    let config = match loaded {
        Ok(config) => config,
        Err(e) => {
            println!("Configuration error: {}", e);
            return Err(e.into());
        }
    };

    if let Err(e) = config.validate() {
        println!("Configuration error: {}", e);
        return Err(e.into());
    }

    println!("Configuration is valid!");
    println!();
    println!("App: {}", config.app.name);
    println!("Environment: {}", config.app.environment);
    println!("Log level: {}", config.logging.level);
    println!("Data provider: {:?}", config.market_data.provider);
    println!("Symbols file: {}", config.storage.symbols_file);
    println!("Positions file: {}", config.storage.positions_file);
    println!(
        "Price floor: {}, avg volume floor: {}, ATR%: {}-{}",
        config.scan.min_price,
        config.scan.min_avg_volume,
        config.scan.min_atr_pct,
        config.scan.max_atr_pct
    );
    println!("Top N: {}", config.scan.top_n);
    println!(
        "News API key: {}",
        if config.news.api_key().is_some() { "set" } else { "missing" }
    );
    println!(
        "Telegram: {}",
        if config.telegram.bot_token().is_some() && config.telegram.chat_id().is_some() {
            "configured"
        } else {
            "not configured"
        }
    );

    Ok(())
}
