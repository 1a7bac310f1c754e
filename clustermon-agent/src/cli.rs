//! CLI argument parsing types using `clap`.

use std::path::PathBuf;

use clap::Parser;

/// `clustermon` polling agent command line
#[derive(Parser)]
#[command(name = "clustermon-agent")]
#[command(
    author,
    version,
    about = "Polls diagnostic metrics from cluster hosts into an indexing store"
)]
pub struct Cli {
    /// Path to the agent configuration file
    #[arg(
        short,
        long,
        default_value = "clustermon.yml",
        env = "CLUSTERMON_CONFIG"
    )]
    pub config: PathBuf,

    /// Increase output verbosity (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,
}
