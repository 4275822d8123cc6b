//! CLI argument parsing.

use std::path::PathBuf;

use clap::Parser;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Follow a Seoul subway train and sound an alarm before your stop
#[derive(Debug, Parser)]
#[command(name = "subway-waker", version = VERSION, about)]
pub struct Args {
    /// Config file (default: <config dir>/subway-waker/config.toml)
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Seoul open-API key
    #[arg(long, env = "SEOUL_SUBWAY_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// Seconds between tracking polls
    #[arg(short = 'i', long, value_name = "SECS")]
    pub poll_interval: Option<u64>,

    /// Milliseconds between alarm pulses
    #[arg(long, value_name = "MS")]
    pub alert_period: Option<u64>,

    /// Line directory JSON replacing the built-in one
    #[arg(long, value_name = "FILE")]
    pub stations: Option<PathBuf>,

    /// Log file (default: <cache dir>/subway-waker/subway-waker.log)
    #[arg(long, value_name = "FILE")]
    pub log_file: Option<PathBuf>,
}
