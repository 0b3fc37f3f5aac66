//! Command-line interface definitions.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// Tradepost - barter marketplace maintenance CLI.
#[derive(Parser, Debug)]
#[command(name = "tradepost")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Path to the config file
    #[arg(long, default_value = "tradepost.toml")]
    pub config: PathBuf,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show marketplace statistics
    Stats(StatsArgs),

    /// List every registered shop
    List,

    /// Search available listings
    Search(SearchArgs),
}

#[derive(Args, Debug)]
pub struct StatsArgs {
    /// Emit JSON instead of a table
    #[arg(long)]
    pub json: bool,
}

#[derive(Args, Debug)]
pub struct SearchArgs {
    /// Item name fragment to look for
    pub name: String,

    /// Only shops whose seller name contains this fragment
    #[arg(long)]
    pub seller: Option<String>,
}
