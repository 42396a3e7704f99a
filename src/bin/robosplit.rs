// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! # Robosplit CLI
//!
//! Per-topic splitting and schema indexing for MCAP robotics logs.
//!
//! ## Usage
//!
//! ```sh
//! # Split every topic into its own MCAP file
//! robosplit split recording.mcap
//!
//! # Split selected topics from every log under a directory
//! robosplit split logs/ --topics /camera/image_raw,/imu
//!
//! # List topics with counts, time bounds, and schema checksums
//! robosplit topics recording.mcap
//!
//! # Flatten topic schemas into dotted field paths
//! robosplit paths recording.mcap --topic /hesai/pandar
//! ```

mod cmd;
mod common;

use std::process;

use clap::{Parser, Subcommand};
use cmd::{PathsCmd, SplitCmd, TopicsCmd};
use common::Result;
use tracing_subscriber::EnvFilter;

/// Robosplit - per-topic MCAP splitting toolkit
///
/// Split MCAP recordings into per-topic files and index their ROS message
/// schemas as flattened field paths.
#[derive(Parser, Clone)]
#[command(name = "robosplit")]
#[command(about = "Per-topic splitting and schema indexing for MCAP logs", long_about = None)]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(author = "ArcheBase")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Available commands
#[derive(Subcommand, Clone)]
enum Commands {
    /// Split logs into per-topic MCAP files
    Split(SplitCmd),

    /// List topics with counts, time bounds, and schema checksums
    Topics(TopicsCmd),

    /// Flatten topic schemas into dotted field paths
    Paths(PathsCmd),
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Split(cmd) => cmd.run(),
        Commands::Topics(cmd) => cmd.run(),
        Commands::Paths(cmd) => cmd.run(),
    }
}

fn main() {
    init_logging();

    let result = run();

    if let Err(e) = result {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}
