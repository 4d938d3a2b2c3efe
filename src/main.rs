// Copyright (c) 2025 Coinwatch. All rights reserved.

mod consts;
mod environment;
mod error_classifier;
mod events;
mod logging;
mod market;
mod runtime;
mod session;
mod ui;
mod workers;

use crate::environment::Environment;
use crate::session::{run_headless_mode, run_tui_mode, setup_session};
use clap::{Parser, Subcommand};
use std::error::Error;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
/// Command-line arguments
struct Args {
    /// Command to execute
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Start the market dashboard
    Start {
        /// Quote currency for prices, e.g. "usd" or "eur".
        #[arg(long, value_name = "CODE", default_value = "usd")]
        currency: String,

        /// Run without the terminal UI, logging dashboard activity to the console.
        #[arg(long)]
        headless: bool,

        /// Disable the dashboard background fill.
        #[arg(long)]
        no_background: bool,

        /// Pull the current page back into range when a refresh shrinks the table.
        #[arg(long)]
        clamp_pages: bool,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let coinwatch_environment_str = std::env::var("COINWATCH_ENVIRONMENT").unwrap_or_default();
    let environment = coinwatch_environment_str
        .parse::<Environment>()
        .unwrap_or(Environment::default());

    let args = Args::parse();
    match args.command {
        Command::Start {
            currency,
            headless,
            no_background,
            clamp_pages,
        } => start(environment, &currency, headless, !no_background, clamp_pages).await,
    }
}

/// Starts the Coinwatch dashboard.
///
/// # Arguments
/// * `env` - The environment to connect to.
/// * `currency` - Quote currency for all market requests.
/// * `headless` - Run without the terminal UI.
/// * `with_background` - Whether to fill the dashboard background.
/// * `clamp_pages` - Whether to pull an out-of-range page back after a refresh.
async fn start(
    env: Environment,
    currency: &str,
    headless: bool,
    with_background: bool,
    clamp_pages: bool,
) -> Result<(), Box<dyn Error>> {
    let session = setup_session(env, currency)?;
    if headless {
        run_headless_mode(session).await
    } else {
        run_tui_mode(session, with_background, clamp_pages).await
    }
}
