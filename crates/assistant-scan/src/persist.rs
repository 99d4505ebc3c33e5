//! Journal persistence for scan results.

use assistant_core::traits::DecisionRecorder;
use assistant_core::types::{Action, ScanResult};
use tracing::error;

/// Record every SELL candidate, then every retained BUY candidate.
///
/// A failed row is logged and the rest are still attempted. Returns the
/// number of rows written.
pub fn persist_scan_results(result: &ScanResult, recorder: &dyn DecisionRecorder) -> usize {
    let rows = result
        .sell_candidates
        .iter()
        .map(|entry| (Action::Sell, entry))
        .chain(result.buy_candidates.iter().map(|entry| (Action::Buy, entry)));

    let mut written = 0;
    for (action, entry) in rows {
        match recorder.record_trade_decision(&entry.symbol, action, entry.price, &entry.confidence)
        {
            Ok(()) => written += 1,
            Err(e) => {
                error!(symbol = %entry.symbol, %action, error = %e, "Failed to record decision");
            }
        }
    }
    written
}
