//! Scan scope and result types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

/// Which symbols a scan considers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Scope {
    /// The full symbol universe
    #[default]
    Whole,
    /// Only symbols with an open position
    Portfolio,
}

impl Scope {
    /// Lower-case label.
    pub fn as_str(&self) -> &'static str {
        match self {
            Scope::Whole => "whole",
            Scope::Portfolio => "portfolio",
        }
    }

    /// Portfolio reviews never originate new positions.
    pub fn allows_new_entries(&self) -> bool {
        matches!(self, Scope::Whole)
    }
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Scope {
    type Err = String;

    /// Accepts the full name or any prefix of it (`p`, `port`, `w`, ...).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_ascii_lowercase();
        if lower.is_empty() {
            return Err("empty scope".to_string());
        }
        if "portfolio".starts_with(&lower) {
            Ok(Scope::Portfolio)
        } else if "whole".starts_with(&lower) {
            Ok(Scope::Whole)
        } else {
            Err(format!("unknown scope: {}", s))
        }
    }
}

/// A BUY or SELL candidate produced by a scan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CandidateEntry {
    /// Symbol
    pub symbol: String,
    /// Last price rounded to two decimals
    pub price: f64,
    /// Indicator and sentiment trace
    pub confidence: String,
    /// Ranking score (BUY candidates only)
    pub score: Option<f64>,
    /// Rendered price graph, if any
    pub graph: Option<PathBuf>,
}

/// Aggregate outcome of one scan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScanResult {
    /// Scan scope
    pub scope: Scope,
    /// Number of target symbols attempted (including skipped ones)
    pub symbols_scanned: usize,
    /// Ranked BUY candidates after the cap
    pub buy_candidates: Vec<CandidateEntry>,
    /// All SELL candidates in scan order
    pub sell_candidates: Vec<CandidateEntry>,
    /// Symbols that stay held
    pub hold_candidates: Vec<String>,
    /// BUY candidates dropped by the cap
    pub filtered_buy_count: usize,
    /// Open positions at scan start, sorted
    pub active_positions: Vec<String>,
    /// Scan start time
    pub timestamp: DateTime<Utc>,
}

impl ScanResult {
    /// Timestamp formatted for human-readable reports.
    pub fn display_timestamp(&self) -> String {
        self.timestamp.format("%Y-%m-%d %H:%M").to_string()
    }

    /// Serialize the result as pretty JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}
