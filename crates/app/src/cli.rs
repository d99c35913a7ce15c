//! Command-line interface

use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(name = "pairwise")]
#[command(about = "Weekly doubles registration and teammate rotation", long_about = None)]
pub struct Cli {
    /// League config file (defaults to league.toml in the data directory)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Directory holding the weekly JSON records
    #[arg(long, global = true)]
    pub data_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Show this week's roster and, once locked, its schedule
    Status,

    /// Register a player for this week
    Add {
        /// Player name
        name: String,
    },

    /// Lock this week now if it is full or registration has closed
    Lock,

    /// List the weeks on record
    Weeks,
}
