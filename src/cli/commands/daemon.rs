//! Long-running scheduler: periodic scans plus Telegram commands.

use std::time::Duration;

use anyhow::Result;
use assistant_config::AppConfig;
use assistant_monitor::{next_offset, ChatUpdate};
use assistant_scan::CommandHandler;
use tokio::time::Instant;
use tracing::{error, info, warn};

use super::context::AppContext;
use super::scan::scan_and_alert;

/// Scan cadence, measured from the start of each scan.
#[derive(Debug, Clone, Copy)]
struct ScanSchedule {
    interval: Duration,
    next: Instant,
}

impl ScanSchedule {
    fn new(interval: Duration, now: Instant) -> Self {
        Self {
            interval,
            next: now,
        }
    }

    fn is_due(&self, now: Instant) -> bool {
        now >= self.next
    }

    fn started(&mut self, at: Instant) {
        self.next = at + self.interval;
    }

    /// Sleep before the next loop turn: a poll pause, cut short by a due scan.
    fn pause(&self, now: Instant, poll_every: Duration) -> Duration {
        poll_every.min(self.next.saturating_duration_since(now))
    }
}

pub async fn run(config: AppConfig) -> Result<()> {
    let ctx = AppContext::build(config)?;
    let handler = ctx.command_handler();

    let poll_every = Duration::from_secs(ctx.config.scheduler.poll_interval_secs);
    let mut schedule = ScanSchedule::new(
        Duration::from_secs(ctx.config.scheduler.scan_interval_secs),
        Instant::now(),
    );
    let polling = ctx.notifier.is_configured();
    if !polling {
        warn!("Telegram not configured; chat commands disabled");
    }
    info!(
        scan_interval_secs = schedule.interval.as_secs(),
        poll_interval_secs = poll_every.as_secs(),
        "Daemon started"
    );

    let shutdown = tokio::signal::ctrl_c();
    tokio::pin!(shutdown);
    let mut offset: Option<i64> = None;

    loop {
        if schedule.is_due(Instant::now()) {
            schedule.started(Instant::now());
            tokio::select! {
                _ = &mut shutdown => break,
                result = scan_and_alert(&ctx) => {
                    info!(scanned = result.symbols_scanned, "Scheduled scan finished");
                }
            }
        }

        if polling {
            tokio::select! {
                _ = &mut shutdown => break,
                polled = ctx.notifier.poll_updates(offset) => match polled {
                    Ok(updates) => {
                        offset = next_offset(offset, &updates);
                        handle_updates(&ctx, &handler, updates).await;
                    }
                    Err(e) => error!(error = %e, "Chat poll failed"),
                },
            }
        }

        tokio::select! {
            _ = &mut shutdown => break,
            _ = tokio::time::sleep(schedule.pause(Instant::now(), poll_every)) => {}
        }
    }

    info!("Shutdown requested");
    Ok(())
}

async fn handle_updates(ctx: &AppContext, handler: &CommandHandler, updates: Vec<ChatUpdate>) {
    for update in updates {
        let Some(text) = update.text.as_deref() else {
            continue;
        };
        if !ctx.notifier.is_from_configured_chat(&update) {
            warn!(chat_id = ?update.chat_id, "Ignoring message from unknown chat");
            continue;
        }
        info!(text = %text, "Chat command received");
        if let Some(reply) = handler.handle_text(text).await {
            ctx.notify(&reply).await;
        }
    }
}
