//! Decision engine.
//!
//! Turns a symbol's [`FeatureVector`](assistant_core::FeatureVector) and the
//! set of currently held symbols into exactly one
//! [`Action`](assistant_core::Action):
//! - held symbols are checked for a SELL near the session high, else HOLD
//! - other symbols must pass four entry gates for a BUY, else IGNORE

mod config;
mod engine;

pub use config::DecisionConfig;
pub use engine::{BuyGates, DecisionEngine, SellCheck};
