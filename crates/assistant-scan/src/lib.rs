//! Scan orchestration.
//!
//! [`Scanner::perform_scan`] walks the target symbols one at a time:
//! bars -> features -> eligibility -> snapshot -> sentiment -> decision,
//! then ranks and caps the BUY candidates. The rest of the crate turns a
//! [`ScanResult`](assistant_core::ScanResult) into journal rows, chat text
//! and replies to chat commands.

mod commands;
mod filter;
mod persist;
mod report;
mod scanner;

#[cfg(test)]
mod testing;

pub use commands::{parse_command, ChatCommand, CommandHandler};
pub use filter::{EligibilityFilter, Rejection};
pub use persist::persist_scan_results;
pub use report::{format_decision_alert, format_summary_text};
pub use scanner::{rank_buy_candidates, Collaborators, ScanConfig, ScanRequest, Scanner};
