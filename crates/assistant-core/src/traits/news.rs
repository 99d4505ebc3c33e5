//! News and sentiment trait definitions.

use crate::types::Sentiment;
use async_trait::async_trait;

/// Supplier of recent headlines for a symbol.
#[async_trait]
pub trait NewsSource: Send + Sync {
    /// Fetch recent headlines.
    ///
    /// Implementations degrade to an empty list on failure or missing
    /// credentials; they never surface errors to the scan.
    async fn fetch_headlines(&self, symbol: &str) -> Vec<String>;
}

/// Maps a batch of headlines to a coarse sentiment label.
pub trait SentimentClassifier: Send + Sync {
    /// Classify the headlines. Empty input is neutral.
    fn classify(&self, headlines: &[String]) -> Sentiment;
}
