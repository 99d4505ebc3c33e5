//! File-backed persistence.
//!
//! - [`JsonPositionStore`]: the user's position book as a JSON document
//! - [`CsvTradeJournal`]: append-only log of emitted BUY/SELL decisions
//! - [`CsvSnapshotRecorder`]: per-symbol indicator history for later analysis

mod journal;
mod positions;
mod snapshots;

pub use journal::{CsvTradeJournal, TradeRecord};
pub use positions::JsonPositionStore;
pub use snapshots::{CsvSnapshotRecorder, SNAPSHOT_HEADER};

use std::fs;
use std::path::Path;

use assistant_core::error::StoreError;

/// Create the parent directory of `path` if it has one.
fn ensure_parent(path: &Path) -> Result<(), StoreError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    Ok(())
}
