//! Core types and traits for the market assistant.
//!
//! This crate provides the foundational building blocks including:
//! - Market data types (Bar)
//! - Derived indicator snapshots (FeatureVector)
//! - Decision, position and scan result types
//! - Collaborator traits for data, news, sentiment, storage and notification

pub mod error;
pub mod traits;
pub mod types;

pub use error::{AssistantError, AssistantResult};
pub use traits::*;
pub use types::*;
