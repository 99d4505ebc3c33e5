//! Plain-text renderings of scan results and decisions.

use std::fmt::Write as _;

use assistant_core::types::{Action, CandidateEntry, ScanResult, Scope};
use chrono::{DateTime, Utc};

fn push_entries(out: &mut String, heading: &str, empty: &str, entries: &[CandidateEntry]) {
    if entries.is_empty() {
        let _ = writeln!(out, "{empty}: none");
        return;
    }
    let _ = writeln!(out, "{heading}:");
    for entry in entries {
        let _ = writeln!(
            out,
            "- {} @ {:.2} ({})",
            entry.symbol, entry.price, entry.confidence
        );
        if let Some(graph) = &entry.graph {
            let _ = writeln!(out, "  Graph: {}", graph.display());
        }
    }
}

/// Multi-line chat/console summary of a scan.
pub fn format_summary_text(result: &ScanResult) -> String {
    let scope_label = match result.scope {
        Scope::Portfolio => "Portfolio",
        Scope::Whole => "Full universe",
    };

    let mut out = String::new();
    let _ = writeln!(
        out,
        "{scope_label} research @ {}",
        result.display_timestamp()
    );
    let _ = writeln!(out, "Symbols processed: {}", result.symbols_scanned);

    push_entries(&mut out, "SELL", "SELL", &result.sell_candidates);
    push_entries(
        &mut out,
        "BUY (top candidates)",
        "BUY",
        &result.buy_candidates,
    );

    if result.hold_candidates.is_empty() {
        out.push_str("HOLD: none\n");
    } else {
        out.push_str("HOLD:\n");
        for symbol in &result.hold_candidates {
            let _ = writeln!(out, "- {symbol}");
        }
    }

    if result.filtered_buy_count > 0 {
        let _ = writeln!(
            out,
            "{} buy candidates filtered after TOP_N cap.",
            result.filtered_buy_count
        );
    }

    out.truncate(out.trim_end().len());
    out
}

/// Alert text for a single BUY or SELL decision.
pub fn format_decision_alert(
    symbol: &str,
    action: Action,
    confidence: &str,
    price: f64,
    time: DateTime<Utc>,
) -> String {
    format!(
        "{symbol} \u{2014} {action}\nConfidence: {confidence}\nPrice: {price:.2}\nTime: {}",
        time.format("%Y-%m-%d %H:%M:%S UTC")
    )
}
