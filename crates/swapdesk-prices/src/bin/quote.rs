//! # Swap Quote
//!
//! Fetches current prices and prints what an amount of one currency buys.
//!
//! ## Usage
//! ```bash
//! cargo run -p swapdesk-prices --bin quote -- 10 ETH USDC
//!
//! # Against another feed
//! PRICES_URL=http://localhost:8080/prices.json cargo run -p swapdesk-prices --bin quote -- 1 BTC ETH
//! ```

use std::env;

use anyhow::{bail, Context};
use swapdesk_core::format::format_recalculated_amount;
use swapdesk_core::{Side, SwapForm};
use swapdesk_prices::{PriceClient, PriceConfig};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_target(false)
        .init();

    let args: Vec<String> = env::args().collect();
    if args.len() != 4 {
        bail!("usage: quote <amount> <from> <to>");
    }
    let (amount, from, to) = (&args[1], &args[2], &args[3]);

    let client = PriceClient::new(PriceConfig::from_env()?)?;
    let rows = client
        .prices()
        .await
        .with_context(|| format!("fetching {}", client.config().url))?;

    let mut form = SwapForm::with_currencies(&rows, from.as_str(), to.as_str());
    form.edit_amount(Side::From, amount)
        .with_context(|| format!("'{}' is not an amount", amount))?;

    for currency in [from, to] {
        if !form.currencies().iter().any(|row| &row.currency == currency) {
            eprintln!("warning: no price for {}, assuming 1.0", currency);
        }
    }

    let rate = form.price(Side::From) / form.price(Side::To);

    println!(
        "{} {} = {} {}",
        form.slot(Side::From).amount,
        from,
        form.slot(Side::To).amount,
        to
    );
    println!("rate: 1 {} = {} {}", from, format_recalculated_amount(rate), to);
    println!("value: ${}", form.usd_value(Side::From));

    Ok(())
}
