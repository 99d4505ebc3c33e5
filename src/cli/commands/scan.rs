//! Scheduled whole-universe scan.

use anyhow::Result;
use assistant_config::AppConfig;
use assistant_core::types::{ScanResult, Scope};
use assistant_scan::{persist_scan_results, ScanRequest};
use tracing::info;

use super::context::AppContext;

pub async fn run(config: AppConfig) -> Result<()> {
    let ctx = AppContext::build(config)?;
    let result = scan_and_alert(&ctx).await;

    println!(
        "Scanned {} symbols: {} BUY, {} SELL, {} HOLD",
        result.symbols_scanned,
        result.buy_candidates.len(),
        result.sell_candidates.len(),
        result.hold_candidates.len()
    );
    Ok(())
}

/// Scan the universe, journal the candidates and alert on each of them.
pub async fn scan_and_alert(ctx: &AppContext) -> ScanResult {
    let result = ctx.scanner.perform_scan(ScanRequest::new(Scope::Whole)).await;

    let recorded = persist_scan_results(&result, ctx.journal.as_ref());
    let alerted = ctx.send_decision_alerts(&result).await;
    info!(recorded, alerted, "Scan results processed");

    result
}
