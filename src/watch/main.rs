//! FIR watcher.
//!
//! Downloads the FIR boundaries and the VATSIM data feed on a fixed interval
//! and prints every pilot or controller found inside a watched FIR.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use firwatch::report::ConsoleReporter;
use firwatch::source::TokioSleeper;
use firwatch::vatsim::VatsimClient;
use firwatch::{Config, CycleRunner, RunOptions};

#[derive(Parser, Debug)]
#[command(name = "firwatch")]
#[command(about = "Report VATSIM traffic inside selected FIRs")]
struct Args {
    /// TOML config file (defaults are used when omitted)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Seconds between refreshes
    #[arg(short, long)]
    interval: Option<u64>,

    /// FIR code to watch; repeat to watch several (replaces the configured list)
    #[arg(long = "fir", value_name = "CODE")]
    firs: Vec<String>,

    /// FIR boundary GeoJSON URL
    #[arg(long)]
    boundary_url: Option<String>,

    /// VATSIM data feed URL
    #[arg(long)]
    data_url: Option<String>,

    /// Run a single cycle and exit
    #[arg(long)]
    once: bool,

    /// Don't clear the terminal between refreshes
    #[arg(long)]
    no_clear: bool,

    /// Debug logging
    #[arg(short, long)]
    verbose: bool,
}

impl Args {
    fn apply(&self, config: &mut Config) {
        if let Some(interval) = self.interval {
            config.interval_seconds = interval;
        }
        if !self.firs.is_empty() {
            config.allowlist = self.firs.clone();
        }
        if let Some(url) = &self.boundary_url {
            config.boundary_url = url.clone();
        }
        if let Some(url) = &self.data_url {
            config.data_url = url.clone();
        }
        if self.no_clear {
            config.clear_screen = false;
        }
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Logs go to stderr; stdout carries the report
    let level = if args.verbose { "debug" } else { "info" };
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level)),
        )
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let mut config = match &args.config {
        Some(path) => Config::load_from_file(path)
            .with_context(|| format!("Could not load {}", path.display()))?,
        None => Config::default(),
    };
    args.apply(&mut config);
    config.validate().context("Invalid configuration")?;

    info!("firwatch");
    info!("Watching FIRs: {}", config.allowlist.join(", "));
    info!("Refresh interval: {}s", config.interval_seconds);

    let client = VatsimClient::from_config(&config).context("Failed to create HTTP client")?;
    let reporter = ConsoleReporter::stdout(config.clear_screen);
    let mut runner = CycleRunner::new(client.clone(), client, reporter, config.allowlist.clone());

    let options = RunOptions {
        interval: config.interval(),
        max_cycles: args.once.then_some(1),
    };

    let shutdown = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!("Could not listen for Ctrl-C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    let cycles = runner.run(&TokioSleeper, options, shutdown).await;
    info!("Stopped after {} cycles", cycles);

    Ok(())
}
