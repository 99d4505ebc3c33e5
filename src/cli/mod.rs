//! CLI definitions.

pub mod commands;

use assistant_core::types::Scope;
use clap::{Parser, Subcommand, ValueEnum};
use rust_decimal::Decimal;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "market-assistant")]
#[command(author, version, about = "Intraday market scanning assistant")]
pub struct Cli {
    /// Configuration file path
    #[arg(short, long, default_value = "config/default.toml")]
    pub config: PathBuf,

    /// Log level
    #[arg(short, long, default_value = "info")]
    pub log_level: LogLevel,

    /// Enable JSON log format
    #[arg(long)]
    pub json_logs: bool,

    /// Also write a daily rolling log file to this directory
    #[arg(long)]
    pub log_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Clone, ValueEnum)]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl LogLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Scan the whole universe once, journal and alert
    Scan,
    /// Run an on-demand research scan and print the summary
    Research(ResearchArgs),
    /// Scan on a schedule and answer Telegram commands
    Daemon,
    /// Record a purchase
    Bought(FillArgs),
    /// Record a sale
    Sold(FillArgs),
    /// List open positions
    Positions,
    /// Validate configuration
    ValidateConfig,
}

#[derive(clap::Args)]
pub struct ResearchArgs {
    /// Scope (whole, portfolio, or a prefix of either)
    #[arg(short, long, default_value = "whole")]
    pub scope: Scope,

    /// BUY candidates to keep
    #[arg(short = 'n', long)]
    pub top_n: Option<usize>,

    /// Symbols to scan (comma-separated); overrides the scope's symbol list
    #[arg(short = 'S', long, value_delimiter = ',')]
    pub symbols: Vec<String>,

    /// Output format (text, json)
    #[arg(long, default_value = "text")]
    pub output: String,

    /// Send the summary to Telegram
    #[arg(long)]
    pub notify: bool,
}

#[derive(clap::Args)]
pub struct FillArgs {
    /// Symbol
    pub symbol: String,

    /// Quantity
    pub quantity: Decimal,

    /// Fill price; the last close is used when omitted
    #[arg(short, long)]
    pub price: Option<Decimal>,
}
