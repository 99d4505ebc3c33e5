//! Operator-facing output: logs, chat notifications and graph snapshots.

mod graph;
mod logging;
mod telegram;

pub use graph::SvgGraphRenderer;
pub use logging::setup_logging;
pub use telegram::{next_offset, ChatUpdate, TelegramConfig, TelegramNotifier};
