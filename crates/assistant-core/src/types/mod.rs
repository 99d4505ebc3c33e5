//! Core data types for the market assistant.

mod decision;
mod features;
mod ohlcv;
mod position;
mod scan;

pub use decision::{Action, Sentiment};
pub use features::FeatureVector;
pub use ohlcv::Bar;
pub use position::Position;
pub use scan::{CandidateEntry, ScanResult, Scope};
