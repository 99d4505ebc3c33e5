//! Core traits for the market assistant.

mod data_source;
mod indicator;
mod news;
mod notify;
mod store;

pub use data_source::{normalize_symbols, BarSource, StaticUniverse, SymbolUniverse};
pub use indicator::{BarIndicator, Indicator};
pub use news::{NewsSource, SentimentClassifier};
pub use notify::{GraphRenderer, Notifier};
pub use store::{DecisionRecorder, PositionStore, SnapshotRecorder};
