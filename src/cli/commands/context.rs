//! Wiring of collaborators from configuration.

use std::sync::Arc;

use anyhow::{Context, Result};
use assistant_config::{AppConfig, DataProvider};
use assistant_core::traits::{BarSource, Notifier};
use assistant_core::types::{Action, ScanResult};
use assistant_data::{CsvBarSource, CsvSymbolUniverse, YahooBarSource};
use assistant_decision::DecisionEngine;
use assistant_indicators::FeatureEngine;
use assistant_monitor::{SvgGraphRenderer, TelegramNotifier};
use assistant_news::{
    CacheStore, JsonFileCacheStore, LexiconSentiment, MemoryCacheStore, NewsApiClient, NewsCache,
};
use assistant_scan::{format_decision_alert, Collaborators, CommandHandler, Scanner};
use assistant_store::{CsvSnapshotRecorder, CsvTradeJournal, JsonPositionStore};
use tracing::{error, info, warn};

/// Everything a command needs, built once per process.
pub struct AppContext {
    pub config: AppConfig,
    pub scanner: Arc<Scanner>,
    pub journal: Arc<CsvTradeJournal>,
    pub notifier: TelegramNotifier,
}

impl AppContext {
    pub fn build(config: AppConfig) -> Result<Self> {
        config.validate().context("Invalid configuration")?;

        let bars: Arc<dyn BarSource> = match config.market_data.provider {
            DataProvider::Yahoo => Arc::new(
                YahooBarSource::new(config.market_data.yahoo())
                    .context("Failed to create Yahoo client")?,
            ),
            DataProvider::Csv => Arc::new(CsvBarSource::new(&config.market_data.csv_dir)),
        };

        let cache_store: Box<dyn CacheStore> = match &config.news.cache_file {
            Some(path) => Box::new(JsonFileCacheStore::new(path)),
            None => Box::new(MemoryCacheStore::new()),
        };
        let news = NewsApiClient::new(
            config.news.client(),
            config.news.api_key(),
            NewsCache::new(config.news.cache_ttl(), cache_store),
        )
        .context("Failed to create news client")?;

        let positions = JsonPositionStore::open(&config.storage.positions_file).with_context(|| {
            format!("Failed to open positions file {}", config.storage.positions_file)
        })?;

        let collaborators = Collaborators {
            bars,
            universe: Arc::new(CsvSymbolUniverse::new(&config.storage.symbols_file)),
            news: Arc::new(news),
            sentiment: Arc::new(LexiconSentiment::default()),
            positions: Arc::new(positions),
            snapshots: Arc::new(CsvSnapshotRecorder::new(&config.storage.analysis_dir)),
            graphs: Arc::new(SvgGraphRenderer::new(&config.storage.graph_dir)),
        };

        let session_offset = config.market_data.session_offset()?;
        let scanner = Scanner::new(
            config.scan.clone(),
            FeatureEngine::with_session_offset(session_offset),
            DecisionEngine::new(config.decision.clone()),
            collaborators,
        );

        let notifier = TelegramNotifier::new(
            config.telegram.client(),
            config.telegram.bot_token(),
            config.telegram.chat_id(),
        )
        .context("Failed to create Telegram client")?;

        info!(
            provider = ?config.market_data.provider,
            bars = scanner.collaborators().bars.name(),
            telegram = notifier.is_configured(),
            "Assistant ready"
        );

        let journal = CsvTradeJournal::new(&config.storage.trade_journal);

        Ok(Self {
            config,
            scanner: Arc::new(scanner),
            journal: Arc::new(journal),
            notifier,
        })
    }

    pub fn command_handler(&self) -> CommandHandler {
        CommandHandler::new(self.scanner.clone(), self.journal.clone())
    }

    /// Send a message, logging instead of failing.
    pub async fn notify(&self, text: &str) -> bool {
        match self.notifier.send_notification(text).await {
            Ok(()) => true,
            Err(e) => {
                error!(error = %e, "Failed to send Telegram message");
                false
            }
        }
    }

    /// One alert per SELL, then per BUY candidate.
    pub async fn send_decision_alerts(&self, result: &ScanResult) -> usize {
        if !self.notifier.is_configured() {
            warn!("Telegram not configured; skipping alerts");
            return 0;
        }

        let alerts = result
            .sell_candidates
            .iter()
            .map(|entry| (Action::Sell, entry))
            .chain(result.buy_candidates.iter().map(|entry| (Action::Buy, entry)));

        let mut sent = 0;
        for (action, entry) in alerts {
            let text = format_decision_alert(
                &entry.symbol,
                action,
                &entry.confidence,
                entry.price,
                result.timestamp,
            );
            if self.notify(&text).await {
                info!(symbol = %entry.symbol, %action, "Decision alert sent");
                sent += 1;
            }
        }
        sent
    }
}
