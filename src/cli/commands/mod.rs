//! CLI command implementations.

pub mod context;
pub mod daemon;
pub mod positions;
pub mod research;
pub mod scan;
pub mod validate;
