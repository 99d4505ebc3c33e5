//! On-demand research command.

use anyhow::Result;
use assistant_config::AppConfig;
use assistant_scan::{format_summary_text, persist_scan_results, ScanRequest};
use tracing::info;

use super::context::AppContext;
use crate::cli::ResearchArgs;

pub async fn run(args: ResearchArgs, config: AppConfig) -> Result<()> {
    let ctx = AppContext::build(config)?;

    let mut request = ScanRequest::new(args.scope);
    if !args.symbols.is_empty() {
        request = request.with_symbols(args.symbols);
    }
    if let Some(top_n) = args.top_n.filter(|&n| n > 0) {
        request = request.with_top_n(top_n);
    }

    info!(scope = %request.scope, "Running research scan");
    let result = ctx.scanner.perform_scan(request).await;
    persist_scan_results(&result, ctx.journal.as_ref());

    let summary = format_summary_text(&result);
    match args.output.as_str() {
        "json" => println!("{}", result.to_json()?),
        _ => println!("{}", summary),
    }

    if args.notify {
        ctx.notify(&summary).await;
    }

    Ok(())
}
