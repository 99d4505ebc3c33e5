//! Scan orchestrator.

use std::collections::BTreeSet;
use std::sync::Arc;

use assistant_core::error::{AssistantError, AssistantResult};
use assistant_core::traits::{
    normalize_symbols, BarSource, GraphRenderer, NewsSource, PositionStore, SentimentClassifier,
    SnapshotRecorder, SymbolUniverse,
};
use assistant_core::types::{Action, Bar, CandidateEntry, ScanResult, Scope};
use assistant_decision::DecisionEngine;
use assistant_indicators::FeatureEngine;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info, warn};

use crate::filter::EligibilityFilter;

/// Scan thresholds and caps.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScanConfig {
    /// Minimum last price
    pub min_price: f64,
    /// Minimum average volume over the volume lookback
    pub min_avg_volume: f64,
    /// Lowest accepted ATR as percent of price
    pub min_atr_pct: f64,
    /// Highest accepted ATR as percent of price
    pub max_atr_pct: f64,
    /// BUY candidates kept after ranking
    pub top_n: usize,
    /// Bars drawn in each graph
    pub graph_points: usize,
    /// SELL graphs rendered per scan
    pub max_sell_graphs: usize,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            min_price: 5.0,
            min_avg_volume: 50_000.0,
            min_atr_pct: 0.2,
            max_atr_pct: 8.0,
            top_n: 5,
            graph_points: 60,
            max_sell_graphs: 3,
        }
    }
}

impl ScanConfig {
    pub fn validate(&self) -> AssistantResult<()> {
        if !(self.min_price >= 0.0) {
            return Err(AssistantError::Config(
                "scan.min_price must be non-negative".into(),
            ));
        }
        if !(self.min_avg_volume >= 0.0) {
            return Err(AssistantError::Config(
                "scan.min_avg_volume must be non-negative".into(),
            ));
        }
        if !(self.min_atr_pct >= 0.0 && self.min_atr_pct <= self.max_atr_pct) {
            return Err(AssistantError::Config(
                "scan.min_atr_pct must be non-negative and <= max_atr_pct".into(),
            ));
        }
        if self.top_n == 0 {
            return Err(AssistantError::Config("scan.top_n must be positive".into()));
        }
        if self.graph_points == 0 {
            return Err(AssistantError::Config(
                "scan.graph_points must be positive".into(),
            ));
        }
        Ok(())
    }
}

/// What to scan.
#[derive(Debug, Clone, Default)]
pub struct ScanRequest {
    pub scope: Scope,
    /// Explicit symbols; overrides the scope's default target list
    pub symbols: Option<Vec<String>>,
    /// BUY cap for this scan; falls back to `ScanConfig::top_n`
    pub top_n: Option<usize>,
}

impl ScanRequest {
    pub fn new(scope: Scope) -> Self {
        Self {
            scope,
            ..Self::default()
        }
    }

    pub fn with_symbols(mut self, symbols: Vec<String>) -> Self {
        self.symbols = Some(symbols);
        self
    }

    pub fn with_top_n(mut self, top_n: usize) -> Self {
        self.top_n = Some(top_n);
        self
    }
}

/// External services a scan talks to.
#[derive(Clone)]
pub struct Collaborators {
    pub bars: Arc<dyn BarSource>,
    pub universe: Arc<dyn SymbolUniverse>,
    pub news: Arc<dyn NewsSource>,
    pub sentiment: Arc<dyn SentimentClassifier>,
    pub positions: Arc<dyn PositionStore>,
    pub snapshots: Arc<dyn SnapshotRecorder>,
    pub graphs: Arc<dyn GraphRenderer>,
}

/// A BUY candidate waiting for ranking, with the bars for its graph.
#[derive(Debug, Clone)]
struct PendingBuy {
    entry: CandidateEntry,
    score: f64,
    trace: Vec<Bar>,
}

/// Per-symbol result.
enum Outcome {
    Skipped,
    Decided {
        action: Action,
        entry: CandidateEntry,
        score: f64,
        trace: Vec<Bar>,
    },
}

/// Sort by score, highest first, and keep `top_n`.
///
/// Equal scores keep their input order. Returns the retained items and the
/// number dropped by the cap.
pub fn rank_buy_candidates<T>(
    mut candidates: Vec<T>,
    top_n: usize,
    score: impl Fn(&T) -> f64,
) -> (Vec<T>, usize) {
    candidates.sort_by(|a, b| score(b).total_cmp(&score(a)));
    let collected = candidates.len();
    candidates.truncate(top_n);
    let filtered = collected - candidates.len();
    (candidates, filtered)
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Runs scans over a symbol set.
pub struct Scanner {
    config: ScanConfig,
    features: FeatureEngine,
    decisions: DecisionEngine,
    filter: EligibilityFilter,
    collaborators: Collaborators,
}

impl Scanner {
    pub fn new(
        config: ScanConfig,
        features: FeatureEngine,
        decisions: DecisionEngine,
        collaborators: Collaborators,
    ) -> Self {
        let filter = EligibilityFilter::new(&config);
        Self {
            config,
            features,
            decisions,
            filter,
            collaborators,
        }
    }

    pub fn config(&self) -> &ScanConfig {
        &self.config
    }

    pub fn collaborators(&self) -> &Collaborators {
        &self.collaborators
    }

    /// Last complete close for a symbol, if the bar source has one.
    pub async fn last_close(&self, symbol: &str) -> Option<f64> {
        match self.collaborators.bars.fetch_bars(symbol).await {
            Ok(bars) => bars
                .iter()
                .rev()
                .find(|bar| bar.is_complete())
                .map(|bar| bar.close),
            Err(e) => {
                warn!(symbol, error = %e, "Price lookup failed");
                None
            }
        }
    }

    fn active_positions(&self) -> BTreeSet<String> {
        match self.collaborators.positions.open_position_symbols() {
            Ok(symbols) => symbols,
            Err(e) => {
                warn!(error = %e, "Could not read positions; treating as none held");
                BTreeSet::new()
            }
        }
    }

    fn target_symbols(&self, request: &ScanRequest, active: &BTreeSet<String>) -> Vec<String> {
        if let Some(symbols) = &request.symbols {
            return normalize_symbols(symbols);
        }
        match request.scope {
            Scope::Portfolio => active.iter().cloned().collect(),
            Scope::Whole => match self.collaborators.universe.load_symbols() {
                Ok(symbols) => symbols,
                Err(e) => {
                    warn!(error = %e, "Symbol universe unavailable");
                    Vec::new()
                }
            },
        }
    }

    /// Scan the requested symbols and collect BUY/SELL/HOLD candidates.
    ///
    /// Never fails: per-symbol problems are logged and the symbol skipped.
    pub async fn perform_scan(&self, request: ScanRequest) -> ScanResult {
        let timestamp = Utc::now();
        let label = timestamp.format("%Y%m%d%H%M%S").to_string();
        let top_n = request.top_n.unwrap_or(self.config.top_n);

        let active = self.active_positions();
        let targets = self.target_symbols(&request, &active);
        if targets.is_empty() {
            warn!(scope = %request.scope, "No symbols to scan");
        }
        info!(scope = %request.scope, symbols = targets.len(), top_n, "Starting scan");

        let mut pending_buys = Vec::new();
        let mut sell_candidates = Vec::new();
        let mut hold_candidates = Vec::new();
        let mut sell_graphs = 0usize;

        for symbol in &targets {
            let outcome = match self.scan_symbol(symbol, &active, timestamp).await {
                Ok(outcome) => outcome,
                Err(e) => {
                    error!(symbol = %symbol, error = %e, "Symbol scan failed");
                    continue;
                }
            };

            let Outcome::Decided {
                action,
                mut entry,
                score,
                trace,
            } = outcome
            else {
                continue;
            };

            match action {
                Action::Buy if request.scope.allows_new_entries() => {
                    entry.score = Some(score);
                    pending_buys.push(PendingBuy {
                        entry,
                        score,
                        trace,
                    });
                }
                Action::Sell => {
                    if sell_graphs < self.config.max_sell_graphs {
                        entry.graph = self
                            .collaborators
                            .graphs
                            .render_price_graph(symbol, &trace, &label);
                        sell_graphs += 1;
                    }
                    sell_candidates.push(entry);
                }
                Action::Hold => hold_candidates.push(entry.symbol),
                Action::Buy | Action::Ignore => {}
            }
        }

        let (retained, filtered_buy_count) =
            rank_buy_candidates(pending_buys, top_n, |c| c.score);

        let buy_candidates = retained
            .into_iter()
            .map(|pending| {
                let mut entry = pending.entry;
                entry.graph = self.collaborators.graphs.render_price_graph(
                    &entry.symbol,
                    &pending.trace,
                    &label,
                );
                entry
            })
            .collect::<Vec<_>>();

        info!(
            scanned = targets.len(),
            buys = buy_candidates.len(),
            sells = sell_candidates.len(),
            holds = hold_candidates.len(),
            filtered = filtered_buy_count,
            "Scan complete"
        );

        ScanResult {
            scope: request.scope,
            symbols_scanned: targets.len(),
            buy_candidates,
            sell_candidates,
            hold_candidates,
            filtered_buy_count,
            active_positions: active.into_iter().collect(),
            timestamp,
        }
    }

    async fn scan_symbol(
        &self,
        symbol: &str,
        active: &BTreeSet<String>,
        timestamp: DateTime<Utc>,
    ) -> AssistantResult<Outcome> {
        let bars = self.collaborators.bars.fetch_bars(symbol).await?;

        let Some(features) = self.features.compute(&bars) else {
            debug!(symbol, bars = bars.len(), "Insufficient bars; skipping");
            return Ok(Outcome::Skipped);
        };

        if let Err(rejection) = self.filter.check(&features) {
            debug!(symbol, reason = %rejection, "Ineligible; skipping");
            return Ok(Outcome::Skipped);
        }

        if let Err(e) = self
            .collaborators
            .snapshots
            .record_snapshot(symbol, &features, timestamp)
        {
            warn!(symbol, error = %e, "Snapshot not recorded");
        }

        let headlines = self.collaborators.news.fetch_headlines(symbol).await;
        let sentiment = self.collaborators.sentiment.classify(&headlines);
        debug!(symbol, headlines = headlines.len(), %sentiment, "Sentiment classified");

        let action = self.decisions.decide(symbol, &features, sentiment, active);

        let trace_start = bars.len().saturating_sub(self.config.graph_points);
        Ok(Outcome::Decided {
            action,
            entry: CandidateEntry {
                symbol: symbol.to_string(),
                price: round2(features.price),
                confidence: features.confidence_annotation(sentiment),
                score: None,
                graph: None,
            },
            score: features.vol_spike + features.rsi / 100.0,
            trace: bars[trace_start..].to_vec(),
        })
    }
}
