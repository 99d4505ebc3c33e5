//! Lexicon-based headline sentiment.

use assistant_core::traits::SentimentClassifier;
use assistant_core::types::Sentiment;
use tracing::debug;

const POSITIVE_WORDS: &[&str] = &[
    "beat", "beats", "surge", "surges", "surged", "record", "growth", "profit", "profits",
    "rally", "rallies", "gain", "gains", "soar", "soars", "jump", "jumps", "exceed", "exceeds",
    "outperform", "strong", "upgrade", "upgraded", "bullish", "wins", "win", "expands",
    "dividend", "buyback", "approval", "approves", "rise", "rises", "higher", "boost",
];

const NEGATIVE_WORDS: &[&str] = &[
    "miss", "misses", "drop", "drops", "fall", "falls", "fell", "decline", "declines", "loss",
    "losses", "fail", "fails", "crash", "plunge", "plunges", "cut", "cuts", "layoff", "layoffs",
    "weak", "downgrade", "downgraded", "bearish", "warning", "probe", "fraud", "penalty",
    "slump", "slumps", "lower", "default", "resigns", "lawsuit", "concern", "concerns",
];

/// Classifies headlines by counting finance-specific positive and negative
/// words.
///
/// Each headline with at least one scoring word contributes
/// `(positive - negative) / (positive + negative)`; the mean over those
/// headlines is compared against `threshold`.
#[derive(Debug, Clone)]
pub struct LexiconSentiment {
    threshold: f64,
}

impl Default for LexiconSentiment {
    fn default() -> Self {
        Self { threshold: 0.15 }
    }
}

impl LexiconSentiment {
    pub fn new(threshold: f64) -> Self {
        Self { threshold }
    }

    /// Score of a single headline in [-1, 1], `None` without scoring words.
    pub fn score_headline(&self, headline: &str) -> Option<f64> {
        let (mut positive, mut negative) = (0u32, 0u32);

        for word in headline
            .split(|c: char| !c.is_alphanumeric())
            .filter(|w| !w.is_empty())
        {
            let word = word.to_lowercase();
            if POSITIVE_WORDS.contains(&word.as_str()) {
                positive += 1;
            } else if NEGATIVE_WORDS.contains(&word.as_str()) {
                negative += 1;
            }
        }

        let total = positive + negative;
        (total > 0).then(|| (positive as f64 - negative as f64) / total as f64)
    }
}

impl SentimentClassifier for LexiconSentiment {
    fn classify(&self, headlines: &[String]) -> Sentiment {
        let scores: Vec<f64> = headlines
            .iter()
            .filter_map(|h| self.score_headline(h))
            .collect();

        if scores.is_empty() {
            return Sentiment::Neutral;
        }

        let mean = scores.iter().sum::<f64>() / scores.len() as f64;
        let sentiment = if mean >= self.threshold {
            Sentiment::Positive
        } else if mean <= -self.threshold {
            Sentiment::Negative
        } else {
            Sentiment::Neutral
        };

        debug!(mean, scored = scores.len(), %sentiment, "Classified headlines");
        sentiment
    }
}
