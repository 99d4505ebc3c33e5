//! Position book commands.

use anyhow::{bail, Result};
use assistant_config::AppConfig;
use assistant_scan::ChatCommand;
use rust_decimal::Decimal;

use super::context::AppContext;
use crate::cli::FillArgs;

fn check_quantity(args: &FillArgs) -> Result<()> {
    if args.quantity <= Decimal::ZERO {
        bail!("Quantity must be positive, got {}", args.quantity);
    }
    Ok(())
}

pub async fn bought(args: FillArgs, config: AppConfig) -> Result<()> {
    check_quantity(&args)?;
    let ctx = AppContext::build(config)?;
    let reply = ctx
        .command_handler()
        .handle(ChatCommand::Bought {
            symbol: args.symbol.trim().to_ascii_uppercase(),
            quantity: args.quantity,
            price: args.price,
        })
        .await;
    println!("{}", reply);
    Ok(())
}

pub async fn sold(args: FillArgs, config: AppConfig) -> Result<()> {
    check_quantity(&args)?;
    let ctx = AppContext::build(config)?;
    let reply = ctx
        .command_handler()
        .handle(ChatCommand::Sold {
            symbol: args.symbol.trim().to_ascii_uppercase(),
            quantity: args.quantity,
            price: args.price,
        })
        .await;
    println!("{}", reply);
    Ok(())
}

pub async fn list(config: AppConfig) -> Result<()> {
    let ctx = AppContext::build(config)?;
    println!("{}", ctx.command_handler().handle(ChatCommand::Positions).await);
    Ok(())
}
