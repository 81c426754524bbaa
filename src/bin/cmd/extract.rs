// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Extract command - cut sample ranges into new captures.

use std::path::PathBuf;

use clap::Subcommand;

use crate::common::{open_capture, Result};
use taffmat::write_slice;

/// Extract sample ranges into new captures.
#[derive(Subcommand, Clone, Debug)]
pub enum ExtractCmd {
    /// Write samples START..=END as a new capture
    Slice {
        /// Capture base name, .hdr or .dat file
        #[arg(value_name = "INPUT")]
        input: PathBuf,

        /// Output base name; its uppercased stem becomes the DATASET
        #[arg(value_name = "OUTPUT")]
        output: PathBuf,

        /// First sample index (inclusive)
        #[arg(short, long, default_value = "0")]
        start: usize,

        /// Last sample index (inclusive, default: last sample)
        #[arg(short, long)]
        end: Option<usize>,

        /// Accept a NUM_SAMPS that disagrees with the data file
        #[arg(long)]
        lenient: bool,
    },
}

impl ExtractCmd {
    pub fn run(self) -> Result<()> {
        match self {
            ExtractCmd::Slice {
                input,
                output,
                start,
                end,
                lenient,
            } => cmd_extract_slice(input, output, start, end, lenient),
        }
    }
}

fn cmd_extract_slice(
    input: PathBuf,
    output: PathBuf,
    start: usize,
    end: Option<usize>,
    lenient: bool,
) -> Result<()> {
    let capture = open_capture(&input, lenient)?;
    let end = match end {
        Some(end) => end,
        None => capture
            .header()
            .number_of_samples
            .checked_sub(1)
            .ok_or_else(|| anyhow::anyhow!("Capture has no samples to extract"))?,
    };

    println!("Extracting samples {start}..={end}");
    println!("  Input:  {}", input.display());

    let stats = write_slice(&capture, start, end, &output)?;

    println!("  Header: {}", stats.paths.header.display());
    println!("  Data:   {}", stats.paths.data.display());
    println!(
        "  Wrote {} samples x {} series ({:.3} sec)",
        stats.number_of_samples, stats.number_of_series, stats.duration_secs
    );

    Ok(())
}
