//! Stub collaborators and bar fixtures shared by the scan tests.

use std::collections::{BTreeMap, HashMap};
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use assistant_core::error::{DataError, StoreError};
use assistant_core::traits::{
    BarSource, DecisionRecorder, GraphRenderer, NewsSource, PositionStore, SentimentClassifier,
    SnapshotRecorder, SymbolUniverse,
};
use assistant_core::types::{Action, Bar, FeatureVector, Position, Sentiment};
use assistant_decision::{DecisionConfig, DecisionEngine};
use assistant_indicators::FeatureEngine;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

use crate::scanner::{Collaborators, ScanConfig, Scanner};

/// 2024-01-15 03:45 UTC
const SESSION_START_MS: i64 = 1_705_290_300_000;
const STEP_MS: i64 = 5 * 60 * 1000;

fn bars_from_closes(closes: &[f64], last_volume: f64) -> Vec<Bar> {
    let last = closes.len() - 1;
    closes
        .iter()
        .enumerate()
        .map(|(i, &close)| {
            let volume = if i == last { last_volume } else { 100_000.0 };
            Bar::new(
                SESSION_START_MS + i as i64 * STEP_MS,
                close,
                close + 0.5,
                close - 0.5,
                close,
                volume,
            )
        })
        .collect()
}

/// A morning sell-off from 120 to 100 followed by a choppy drift up to
/// 100.7, closing on a volume spike. Not held, this is a BUY.
pub fn dip_bars(last_volume: f64) -> Vec<Bar> {
    let mut closes: Vec<f64> = (0..26).map(|i| 120.0 - i as f64 * 0.8).collect();
    let mut close = 100.0;
    for i in 0..14 {
        close += if i % 2 == 0 { 0.3 } else { -0.2 };
        closes.push(close);
    }
    bars_from_closes(&closes, last_volume)
}

/// A steady climb from 100 to 119.5. Held, this is a SELL.
pub fn rise_bars() -> Vec<Bar> {
    let closes: Vec<f64> = (0..40).map(|i| 100.0 + i as f64 * 0.5).collect();
    bars_from_closes(&closes, 100_000.0)
}

#[derive(Default)]
pub struct StubBars {
    bars: HashMap<String, Vec<Bar>>,
}

#[async_trait]
impl BarSource for StubBars {
    async fn fetch_bars(&self, symbol: &str) -> Result<Vec<Bar>, DataError> {
        self.bars
            .get(symbol)
            .cloned()
            .ok_or_else(|| DataError::SymbolNotFound(symbol.to_string()))
    }

    fn name(&self) -> &str {
        "stub"
    }
}

pub struct StubUniverse(Option<Vec<String>>);

impl SymbolUniverse for StubUniverse {
    fn load_symbols(&self) -> Result<Vec<String>, DataError> {
        self.0
            .clone()
            .ok_or_else(|| DataError::UniverseUnavailable("no symbols file".into()))
    }
}

#[derive(Default)]
pub struct RecordingNews {
    requested: Mutex<Vec<String>>,
}

impl RecordingNews {
    pub fn requested(&self) -> Vec<String> {
        self.requested.lock().unwrap().clone()
    }
}

#[async_trait]
impl NewsSource for RecordingNews {
    async fn fetch_headlines(&self, symbol: &str) -> Vec<String> {
        self.requested.lock().unwrap().push(symbol.to_string());
        vec![format!("{symbol} shares trade flat")]
    }
}

pub struct NeutralSentiment;

impl SentimentClassifier for NeutralSentiment {
    fn classify(&self, _headlines: &[String]) -> Sentiment {
        Sentiment::Neutral
    }
}

#[derive(Default)]
pub struct StubPositions {
    positions: Mutex<BTreeMap<String, Position>>,
    broken: bool,
}

impl StubPositions {
    pub fn quantity(&self, symbol: &str) -> Option<Decimal> {
        self.positions
            .lock()
            .unwrap()
            .get(symbol)
            .map(|p| p.quantity)
    }
}

impl PositionStore for StubPositions {
    fn open_positions(&self) -> Result<Vec<Position>, StoreError> {
        if self.broken {
            return Err(StoreError::Serialization("corrupt positions file".into()));
        }
        Ok(self.positions.lock().unwrap().values().cloned().collect())
    }

    fn record_fill(
        &self,
        symbol: &str,
        quantity_delta: Decimal,
        price: Decimal,
        at: DateTime<Utc>,
    ) -> Result<Position, StoreError> {
        let mut positions = self.positions.lock().unwrap();
        let position = positions
            .entry(symbol.to_string())
            .or_insert_with(|| Position::new(symbol, Decimal::ZERO, Decimal::ZERO, at));
        position.apply_fill(quantity_delta, price, at);
        let updated = position.clone();
        if !updated.is_open() {
            positions.remove(symbol);
        }
        Ok(updated)
    }
}

#[derive(Default)]
pub struct RecordingSnapshots {
    recorded: Mutex<Vec<String>>,
}

impl RecordingSnapshots {
    pub fn recorded(&self) -> Vec<String> {
        self.recorded.lock().unwrap().clone()
    }
}

impl SnapshotRecorder for RecordingSnapshots {
    fn record_snapshot(
        &self,
        symbol: &str,
        _features: &FeatureVector,
        _timestamp: DateTime<Utc>,
    ) -> Result<(), StoreError> {
        self.recorded.lock().unwrap().push(symbol.to_string());
        Ok(())
    }
}

#[derive(Default)]
pub struct RecordingGraphs {
    rendered: Mutex<Vec<(String, usize)>>,
}

impl RecordingGraphs {
    pub fn rendered(&self) -> Vec<String> {
        self.rendered
            .lock()
            .unwrap()
            .iter()
            .map(|(s, _)| s.clone())
            .collect()
    }

    pub fn trace_lengths(&self) -> Vec<usize> {
        self.rendered.lock().unwrap().iter().map(|(_, n)| *n).collect()
    }
}

impl GraphRenderer for RecordingGraphs {
    fn render_price_graph(&self, symbol: &str, bars: &[Bar], label: &str) -> Option<PathBuf> {
        self.rendered
            .lock()
            .unwrap()
            .push((symbol.to_string(), bars.len()));
        Some(PathBuf::from(format!("graphs/{symbol}_{label}.svg")))
    }
}

/// Journal stub; symbols in `failing` are rejected.
#[derive(Default)]
pub struct RecordingJournal {
    pub rows: Mutex<Vec<(String, Action, f64)>>,
    pub failing: Vec<String>,
}

impl DecisionRecorder for RecordingJournal {
    fn record_trade_decision(
        &self,
        symbol: &str,
        action: Action,
        price: f64,
        _confidence: &str,
    ) -> Result<(), StoreError> {
        if self.failing.iter().any(|s| s == symbol) {
            return Err(StoreError::Csv("disk full".into()));
        }
        self.rows
            .lock()
            .unwrap()
            .push((symbol.to_string(), action, price));
        Ok(())
    }
}

pub struct Fixture {
    bars: StubBars,
    universe: Option<Vec<String>>,
    pub positions: Arc<StubPositions>,
    pub news: Arc<RecordingNews>,
    pub snapshots: Arc<RecordingSnapshots>,
    pub graphs: Arc<RecordingGraphs>,
}

impl Fixture {
    pub fn new() -> Self {
        Self {
            bars: StubBars::default(),
            universe: None,
            positions: Arc::new(StubPositions::default()),
            news: Arc::new(RecordingNews::default()),
            snapshots: Arc::new(RecordingSnapshots::default()),
            graphs: Arc::new(RecordingGraphs::default()),
        }
    }

    pub fn with_bars(mut self, symbol: &str, bars: Vec<Bar>) -> Self {
        self.bars.bars.insert(symbol.to_string(), bars);
        self
    }

    pub fn with_universe(mut self, symbols: &[&str]) -> Self {
        self.universe = Some(symbols.iter().map(|s| s.to_string()).collect());
        self
    }

    pub fn with_positions(self, symbols: &[&str]) -> Self {
        let at = Utc::now();
        for symbol in symbols {
            self.positions
                .record_fill(symbol, Decimal::ONE, Decimal::ONE_HUNDRED, at)
                .unwrap();
        }
        self
    }

    pub fn with_broken_positions(mut self) -> Self {
        self.positions = Arc::new(StubPositions {
            broken: true,
            ..StubPositions::default()
        });
        self
    }

    pub fn scanner(&self, config: ScanConfig) -> Scanner {
        let collaborators = Collaborators {
            bars: Arc::new(StubBars {
                bars: self.bars.bars.clone(),
            }),
            universe: Arc::new(StubUniverse(self.universe.clone())),
            news: self.news.clone(),
            sentiment: Arc::new(NeutralSentiment),
            positions: self.positions.clone(),
            snapshots: self.snapshots.clone(),
            graphs: self.graphs.clone(),
        };
        Scanner::new(
            config,
            FeatureEngine::new(),
            DecisionEngine::new(DecisionConfig::default()),
            collaborators,
        )
    }
}
