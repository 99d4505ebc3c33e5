//! News headlines and sentiment.
//!
//! Headlines are fetched per symbol from NewsAPI and kept in a TTL cache
//! whose storage backend is chosen at construction. A lexicon classifier
//! turns the headlines into a single [`Sentiment`](assistant_core::Sentiment).

mod cache;
mod newsapi;
mod sentiment;

pub use cache::{CacheStore, CachedHeadlines, JsonFileCacheStore, MemoryCacheStore, NewsCache};
pub use newsapi::{NewsApiClient, NewsApiConfig};
pub use sentiment::LexiconSentiment;
