//! Chat command parsing and handling.

use std::str::FromStr;
use std::sync::Arc;

use assistant_core::traits::DecisionRecorder;
use assistant_core::types::{Action, Scope};
use chrono::Utc;
use rust_decimal::Decimal;
use tracing::{error, info, warn};

use crate::persist::persist_scan_results;
use crate::report::format_summary_text;
use crate::scanner::{ScanRequest, Scanner};

/// A parsed chat command.
#[derive(Debug, Clone, PartialEq)]
pub enum ChatCommand {
    /// `/bought SYM QTY [PRICE]`
    Bought {
        symbol: String,
        quantity: Decimal,
        price: Option<Decimal>,
    },
    /// `/sold SYM QTY [PRICE]`
    Sold {
        symbol: String,
        quantity: Decimal,
        price: Option<Decimal>,
    },
    /// `/positions`
    Positions,
    /// `/research [w|p...] [N]`
    Research { scope: Scope, limit: Option<usize> },
    /// A recognised command with bad arguments
    Invalid(String),
    Unknown,
}

fn parse_fill(parts: &[&str]) -> Result<(String, Decimal, Option<Decimal>), String> {
    let symbol = parts[1].to_ascii_uppercase();
    let quantity = Decimal::from_str(parts[2])
        .map_err(|_| format!("Invalid quantity: {}", parts[2]))?;
    if quantity <= Decimal::ZERO {
        return Err(format!("Quantity must be positive: {}", parts[2]));
    }
    let price = match parts.get(3) {
        Some(raw) => {
            let price = Decimal::from_str(raw).map_err(|_| format!("Invalid price: {raw}"))?;
            if price < Decimal::ZERO {
                return Err(format!("Price must not be negative: {raw}"));
            }
            Some(price)
        }
        None => None,
    };
    Ok((symbol, quantity, price))
}

/// Parse a chat message; `None` for blank input.
pub fn parse_command(text: &str) -> Option<ChatCommand> {
    let parts: Vec<&str> = text.split_whitespace().collect();
    let command = parts.first()?.to_ascii_lowercase();

    let parsed = match command.as_str() {
        "/bought" | "/sold" if parts.len() >= 3 => match parse_fill(&parts) {
            Ok((symbol, quantity, price)) if command == "/bought" => ChatCommand::Bought {
                symbol,
                quantity,
                price,
            },
            Ok((symbol, quantity, price)) => ChatCommand::Sold {
                symbol,
                quantity,
                price,
            },
            Err(reason) => ChatCommand::Invalid(reason),
        },
        "/positions" => ChatCommand::Positions,
        "/research" => {
            let scope = match parts.get(1) {
                Some(arg) if arg.to_ascii_lowercase().starts_with('p') => Scope::Portfolio,
                _ => Scope::Whole,
            };
            let limit = parts.get(2).and_then(|raw| match raw.parse::<usize>() {
                Ok(n) => Some(n),
                Err(_) => {
                    warn!(limit = %raw, "Invalid /research limit, using default");
                    None
                }
            });
            ChatCommand::Research { scope, limit }
        }
        _ => ChatCommand::Unknown,
    };
    Some(parsed)
}

/// Answers chat commands against the position book and the scanner.
pub struct CommandHandler {
    scanner: Arc<Scanner>,
    journal: Arc<dyn DecisionRecorder>,
}

impl CommandHandler {
    pub fn new(scanner: Arc<Scanner>, journal: Arc<dyn DecisionRecorder>) -> Self {
        Self { scanner, journal }
    }

    /// Parse and handle a raw message; `None` for blank input.
    pub async fn handle_text(&self, text: &str) -> Option<String> {
        let command = parse_command(text)?;
        Some(self.handle(command).await)
    }

    pub async fn handle(&self, command: ChatCommand) -> String {
        match command {
            ChatCommand::Bought {
                symbol,
                quantity,
                price,
            } => self.record_fill(Action::Buy, &symbol, quantity, price).await,
            ChatCommand::Sold {
                symbol,
                quantity,
                price,
            } => self.record_fill(Action::Sell, &symbol, quantity, price).await,
            ChatCommand::Positions => self.positions(),
            ChatCommand::Research { scope, limit } => self.research(scope, limit).await,
            ChatCommand::Invalid(reason) => reason,
            ChatCommand::Unknown => "Unknown command.".to_string(),
        }
    }

    /// Missing or zero prices are filled from the last close, or zero.
    async fn resolve_price(&self, symbol: &str, price: Option<Decimal>) -> Decimal {
        if let Some(price) = price.filter(|p| !p.is_zero()) {
            return price;
        }
        match self.scanner.last_close(symbol).await {
            Some(close) => {
                let price = Decimal::try_from(close)
                    .map(|p| p.round_dp(2))
                    .unwrap_or(Decimal::ZERO);
                info!(symbol, %price, "Using market price for fill");
                price
            }
            None => {
                warn!(symbol, "No market data to derive fill price");
                Decimal::ZERO
            }
        }
    }

    async fn record_fill(
        &self,
        action: Action,
        symbol: &str,
        quantity: Decimal,
        price: Option<Decimal>,
    ) -> String {
        let price = self.resolve_price(symbol, price).await;
        let delta = match action {
            Action::Sell => -quantity,
            _ => quantity,
        };

        let positions = &self.scanner.collaborators().positions;
        match positions.record_fill(symbol, delta, price, Utc::now()) {
            Ok(_) => format!(
                "Recorded {action}: {symbol} qty={} price={}",
                quantity.normalize(),
                price.normalize()
            ),
            Err(e) => {
                error!(symbol, %action, error = %e, "Failed to record fill");
                format!("Failed to record {action} for {symbol}: {e}")
            }
        }
    }

    fn positions(&self) -> String {
        let positions = match self.scanner.collaborators().positions.open_positions() {
            Ok(positions) => positions,
            Err(e) => {
                error!(error = %e, "Failed to read positions");
                return format!("Failed to read positions: {e}");
            }
        };

        let mut lines = vec!["Open Positions:".to_string()];
        lines.extend(positions.iter().map(|p| {
            format!(
                "{}: qty={} price={}",
                p.symbol,
                p.quantity.normalize(),
                p.avg_price.round_dp(2).normalize()
            )
        }));
        lines.join("\n")
    }

    async fn research(&self, scope: Scope, limit: Option<usize>) -> String {
        let top_n = limit
            .filter(|&n| n > 0)
            .unwrap_or(self.scanner.config().top_n);
        let result = self
            .scanner
            .perform_scan(ScanRequest::new(scope).with_top_n(top_n))
            .await;
        persist_scan_results(&result, self.journal.as_ref());
        format_summary_text(&result)
    }
}
