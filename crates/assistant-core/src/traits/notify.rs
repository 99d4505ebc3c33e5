//! Notification and graph rendering trait definitions.

use crate::error::NotifyError;
use crate::types::Bar;
use async_trait::async_trait;
use std::path::PathBuf;

/// Outbound message delivery.
#[async_trait]
pub trait Notifier: Send + Sync {
    /// Deliver a plain-text message.
    async fn send_notification(&self, text: &str) -> Result<(), NotifyError>;
}

/// Renders a short price trace to an image file.
pub trait GraphRenderer: Send + Sync {
    /// Render the bars and return the written path, or `None` on failure.
    fn render_price_graph(&self, symbol: &str, bars: &[Bar], label: &str) -> Option<PathBuf>;
}
