// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! # taffmat CLI
//!
//! Command-line tool for TEAC TAFFmat captures.
//!
//! ## Usage
//!
//! ```sh
//! # Show sample count, duration and rate
//! taffmat inspect info UTEST001.DAT
//!
//! # Dump the parsed header
//! taffmat inspect header UTEST001 --json
//!
//! # Cut samples 0..=999 into a new capture
//! taffmat extract slice UTEST001 UTEST001_HEAD --start 0 --end 999
//!
//! # Export to CSV
//! taffmat convert to-csv UTEST001 -o utest001.csv
//! ```

mod cmd;
mod common;

use std::process;

use clap::{Parser, Subcommand};
use cmd::{ConvertCmd, ExtractCmd, InspectCmd};
use common::Result;

/// taffmat - TEAC TAFFmat capture toolkit
///
/// A capture is named by its base name or either of its .hdr/.dat files.
#[derive(Parser, Clone)]
#[command(name = "taffmat")]
#[command(about = "TEAC TAFFmat data-recorder capture toolkit", long_about = None)]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(author = "ArcheBase")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Available commands
#[derive(Subcommand, Clone)]
enum Commands {
    /// Inspect captures (info, header)
    #[command(subcommand)]
    Inspect(InspectCmd),

    /// Convert captures to other formats (csv)
    #[command(subcommand)]
    Convert(ConvertCmd),

    /// Extract sample ranges into new captures
    #[command(subcommand)]
    Extract(ExtractCmd),
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Inspect(cmd) => cmd.run(),
        Commands::Convert(cmd) => cmd.run(),
        Commands::Extract(cmd) => cmd.run(),
    }
}

fn main() {
    let result = run();

    if let Err(e) = result {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}
