//! `clustermon` polling agent
//!
//! Opens one SSH session per configured host at start-up, then runs the
//! probe battery over every host at the configured interval until the
//! process is interrupted.

mod cli;
mod error;

use std::sync::Arc;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use clustermon_core::config::AgentConfig;
use clustermon_core::poller::Poller;
use clustermon_core::session::{SessionManager, SshTransport};
use clustermon_core::shutdown::{install_interrupt_handler, shutdown_channel};
use clustermon_core::sink::HttpSink;

use cli::Cli;
use error::AgentError;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_tracing(&cli);

    if let Err(e) = run(&cli).await {
        eprintln!("Error: {e}");
        std::process::exit(e.exit_code());
    }
}

fn init_tracing(cli: &Cli) {
    let default_level = if cli.quiet {
        "error"
    } else {
        match cli.verbose {
            0 => "info",
            1 => "debug",
            _ => "trace",
        }
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

async fn run(cli: &Cli) -> Result<(), AgentError> {
    let config = AgentConfig::load(&cli.config)?;
    let hosts = config.resolved_hosts()?;

    let transport = SshTransport::new(std::env::temp_dir());
    let sessions = SessionManager::connect_all(&transport, &hosts).await?;

    let sink = Arc::new(HttpSink::new(&config.sink)?);

    let (handle, token) = shutdown_channel();
    install_interrupt_handler(handle);

    tracing::info!(
        hosts = hosts.len(),
        interval_secs = config.poll_interval_secs,
        index = %config.sink.index,
        "Starting poller"
    );

    let poller = Poller::new(
        hosts.into_iter().map(|h| h.name).collect(),
        sessions,
        sink,
        config.poll_interval(),
        token,
    );
    poller.run().await?;

    Ok(())
}
