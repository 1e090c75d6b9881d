//! The `logs` command: one-shot or continuously refreshed dashboard.
//!
//! GET /getServer
//! Aggregator
//! DashboardState
//! render / redraw

use crate::api::ApiClient;
use crate::config::ClientConfig;
use crate::dashboard::{Dashboard, spawn_periodic_refresh};
use crate::logs::render_json;
use anyhow::{Context, Result};
use clap::Args;
use std::future::Future;
use std::io::{self, Write};
use std::sync::Arc;
use std::time::Duration;

#[derive(Args, Debug, Clone, Default)]
pub struct LogsArgs {
    /// Keep refreshing until interrupted
    #[arg(long)]
    pub watch: bool,

    /// Seconds between refreshes in watch mode (defaults to the configured interval)
    #[arg(long, value_parser = clap::value_parser!(u64).range(1..))]
    pub interval: Option<u64>,

    /// Print the aggregated tables as JSON
    #[arg(long, conflicts_with = "watch")]
    pub json: bool,
}

/// Run the dashboard. In watch mode it redraws after every refresh until
/// `shutdown` resolves.
pub async fn run_logs<F>(cfg: &ClientConfig, args: LogsArgs, shutdown: F) -> Result<()>
where
    F: Future<Output = ()>,
{
    let client = ApiClient::new(&cfg.base_url()?, cfg.timeout())?;
    let dashboard = Dashboard::from_config(client, cfg);

    if !args.watch {
        return run_once(&dashboard, args.json).await;
    }

    let every = args
        .interval
        .map(Duration::from_secs)
        .unwrap_or_else(|| cfg.refresh_interval());

    // Hide the cursor while the dashboard runs.
    print!("\x1b[?25l");
    let _ = io::stdout().flush();

    let handle = spawn_periodic_refresh(Arc::new(dashboard), every, |state| {
        redraw(&state.render());
    });

    shutdown.await;
    handle.stop().await;

    // Restore cursor
    print!("\x1b[?25h");
    let _ = io::stdout().flush();

    Ok(())
}

async fn run_once(dashboard: &Dashboard<ApiClient>, json: bool) -> Result<()> {
    let state = dashboard.refresh().await.context("failed to fetch logs")?;

    match &state.result {
        Some(result) if json => println!("{}", render_json(result)?),
        _ => print!("{}", state.render()),
    }
    Ok(())
}

pub fn redraw(output: &str) {
    print!("\x1b[2J\x1b[H");
    println!("{output}");
    let _ = io::stdout().flush();
}
