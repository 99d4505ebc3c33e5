//! Session high/low of the most recent trading day.

use assistant_core::types::Bar;
use chrono::FixedOffset;
use serde::{Deserialize, Serialize};

/// Price extremes of the current session.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SessionRange {
    pub low: f64,
    pub high: f64,
}

impl SessionRange {
    /// `high - low`.
    pub fn width(&self) -> f64 {
        self.high - self.low
    }
}

/// Lowest low and highest high over the bars that share the last bar's
/// calendar date in `offset`. Falls back to every bar if none match.
pub fn session_range(bars: &[Bar], offset: &FixedOffset) -> Option<SessionRange> {
    let last_date = bars.last()?.date_in(offset);

    let extremes = |iter: &mut dyn Iterator<Item = &Bar>| {
        iter.fold(None, |acc: Option<SessionRange>, bar| {
            Some(match acc {
                None => SessionRange {
                    low: bar.low,
                    high: bar.high,
                },
                Some(range) => SessionRange {
                    low: range.low.min(bar.low),
                    high: range.high.max(bar.high),
                },
            })
        })
    };

    extremes(&mut bars.iter().filter(|bar| bar.date_in(offset) == last_date))
        .or_else(|| extremes(&mut bars.iter()))
}
