// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! # pbstream CLI
//!
//! Command-line tool for gzip-compressed DeviceApps frame streams.
//!
//! ## Usage
//!
//! ```sh
//! # Convert JSON lines into a frame stream
//! pbstream write apps.jsonl apps.pb.gz
//!
//! # Dump records as JSON lines
//! pbstream read apps.pb.gz --limit 10
//!
//! # List raw frames
//! pbstream inspect apps.pb.gz --type 1 --hex
//!
//! # Emit the serialized demonstration record
//! pbstream example > record.bin
//! ```
//!
//! Logging goes to stderr and is controlled by `RUST_LOG` (default `warn`).

mod cmd;
mod common;

use std::process;

use clap::{Parser, Subcommand};
use cmd::{ExampleCmd, InspectCmd, ReadCmd, WriteCmd};
use common::Result;
use tracing_subscriber::EnvFilter;

/// pbstream - framed protobuf record streams
///
/// Every record is one frame `[magic][type][length][payload]` inside a
/// single gzip stream.
#[derive(Parser, Clone)]
#[command(name = "pbstream")]
#[command(about = "Gzip-compressed framed protobuf record streams", long_about = None)]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(author = "ArcheBase")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Available commands
#[derive(Subcommand, Clone)]
enum Commands {
    /// Convert JSON lines into a DeviceApps frame stream
    Write(WriteCmd),

    /// Print DeviceApps records as JSON lines
    Read(ReadCmd),

    /// List raw frames with offsets, type tags and lengths
    Inspect(InspectCmd),

    /// Write the serialized demonstration record to stdout
    Example(ExampleCmd),
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .init();
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Write(cmd) => cmd.run(),
        Commands::Read(cmd) => cmd.run(),
        Commands::Inspect(cmd) => cmd.run(),
        Commands::Example(cmd) => cmd.run(),
    }
}

fn main() {
    init_tracing();

    if let Err(e) = run() {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}
