//! Decision outcomes and sentiment labels.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Outcome of the decision engine for one symbol in one scan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Action {
    /// Open a new position
    Buy,
    /// Close a held position
    Sell,
    /// Keep a held position
    Hold,
    /// Not held and no entry
    Ignore,
}

impl Action {
    /// Upper-case label used in reports and journals.
    pub fn as_str(&self) -> &'static str {
        match self {
            Action::Buy => "BUY",
            Action::Sell => "SELL",
            Action::Hold => "HOLD",
            Action::Ignore => "IGNORE",
        }
    }

    /// True for actions that warrant an alert.
    pub fn is_actionable(&self) -> bool {
        matches!(self, Action::Buy | Action::Sell)
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Action {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "BUY" => Ok(Action::Buy),
            "SELL" => Ok(Action::Sell),
            "HOLD" => Ok(Action::Hold),
            "IGNORE" => Ok(Action::Ignore),
            other => Err(format!("unknown action: {}", other)),
        }
    }
}

/// Coarse news sentiment label.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sentiment {
    Negative,
    #[default]
    Neutral,
    Positive,
}

impl Sentiment {
    /// Lower-case label.
    pub fn as_str(&self) -> &'static str {
        match self {
            Sentiment::Negative => "negative",
            Sentiment::Neutral => "neutral",
            Sentiment::Positive => "positive",
        }
    }
}

impl fmt::Display for Sentiment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Sentiment {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "negative" => Ok(Sentiment::Negative),
            "neutral" => Ok(Sentiment::Neutral),
            "positive" => Ok(Sentiment::Positive),
            other => Err(format!("unknown sentiment: {}", other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_action_labels() {
        assert_eq!(Action::Buy.to_string(), "BUY");
        assert_eq!("sell".parse::<Action>().unwrap(), Action::Sell);
        assert!(Action::Sell.is_actionable());
        assert!(!Action::Hold.is_actionable());
        assert!("maybe".parse::<Action>().is_err());
    }

    #[test]
    fn test_sentiment_parsing() {
        assert_eq!(" Positive ".parse::<Sentiment>().unwrap(), Sentiment::Positive);
        assert_eq!(Sentiment::default(), Sentiment::Neutral);
        assert_eq!(
            serde_json::to_string(&Sentiment::Negative).unwrap(),
            "\"negative\""
        );
    }
}
