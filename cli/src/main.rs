//! Holiday planner CLI
//!
//! Command-line front-end over the planner store.

mod args;
mod cli;

use std::time::Duration;

use anyhow::{anyhow, Context, Result};
use args::{Args, Commands};
use clap::Parser;
use cli::Cli;
use holiday_core::{ClientConfig, PlannerStore, Preferences};
use log::info;

const BASE_URL_PREF: &str = "base_url";

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();

    let Args {
        base_url,
        timeout,
        prefs_file,
        command,
    } = Args::parse();

    let prefs = match prefs_file {
        Some(path) => Preferences::open(path),
        None => Preferences::default_location().context("Failed to locate preferences")?,
    };

    let command = match command.unwrap_or(Commands::List) {
        Commands::Prefs { command } => return cli::handle_prefs(&prefs, command),
        command => command,
    };

    let base_url = base_url
        .or_else(|| prefs.read::<Option<String>>(BASE_URL_PREF, None))
        .ok_or_else(|| {
            anyhow!(
                "No API base URL. Pass --base-url, set HOLIDAY_API_HOST, \
                 or run `holiday prefs set {BASE_URL_PREF} <URL>`"
            )
        })?;
    let config = ClientConfig::new(base_url).with_timeout(timeout.map(Duration::from_secs));

    let store = PlannerStore::connect(&config);
    info!("Using planner API at {}", config.base_url());

    Cli::new(&store).run(command).await
}
