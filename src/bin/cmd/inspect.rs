// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Inspect command - show capture contents.

use std::path::PathBuf;

use clap::Subcommand;

use crate::common::{open_capture, summary_lines, Result};
use taffmat::Header;

/// Inspect capture contents.
#[derive(Subcommand, Clone, Debug)]
pub enum InspectCmd {
    /// Show sample count, duration and sampling rate
    Info {
        /// Capture base name, .hdr or .dat file
        #[arg(value_name = "INPUT")]
        input: PathBuf,

        /// Accept a NUM_SAMPS that disagrees with the data file
        #[arg(long)]
        lenient: bool,
    },

    /// Show the parsed header
    Header {
        /// Capture base name, .hdr or .dat file
        #[arg(value_name = "INPUT")]
        input: PathBuf,

        /// Print as JSON
        #[arg(long)]
        json: bool,

        /// Accept a NUM_SAMPS that disagrees with the data file
        #[arg(long)]
        lenient: bool,
    },
}

impl InspectCmd {
    pub fn run(self) -> Result<()> {
        match self {
            InspectCmd::Info { input, lenient } => cmd_info(input, lenient),
            InspectCmd::Header {
                input,
                json,
                lenient,
            } => cmd_header(input, json, lenient),
        }
    }
}

fn cmd_info(input: PathBuf, lenient: bool) -> Result<()> {
    let capture = open_capture(&input, lenient)?;
    let header = capture.header();

    println!("Dataset:  {}", header.dataset);
    println!("Series:   {}", header.number_of_series);
    if let Some(version) = header.recorder.version() {
        println!("Recorder: {} {}", header.recorder.model(), version);
    }
    for line in summary_lines(&capture.summary()) {
        println!("{line}");
    }

    Ok(())
}

fn cmd_header(input: PathBuf, json: bool, lenient: bool) -> Result<()> {
    let capture = open_capture(&input, lenient)?;
    let header = capture.header();

    if json {
        println!("{}", serde_json::to_string_pretty(header)?);
    } else {
        print_header(header);
    }

    Ok(())
}

fn print_header(header: &Header) {
    println!("Dataset:    {}", header.dataset);
    println!("Version:    {}", header.version);
    println!(
        "Recorded:   {}",
        header.recording_start.format("%Y-%m-%d %H:%M:%S%.3f")
    );
    println!("Rate:       {} Hz", header.sampling_frequency_hz);
    println!("File type:  {}", header.file_type.as_str());
    println!("Samples:    {}", header.number_of_samples);
    println!("Device:     {}", header.device);
    println!("Voice memo: {}", if header.voice_memo_on() { "on" } else { "off" });
    if !header.comment.is_empty() {
        println!("Comment:    {}", header.comment);
    }
    println!();
    println!(
        "{:<6} {:<12} {:<8} {:>12} {:>12}",
        "Series", "Label", "Units", "Slope", "Offset"
    );
    for i in 0..header.number_of_series {
        println!(
            "{:<6} {:<12} {:<8} {:>12e} {:>12e}",
            i + 1,
            header.series_labels[i],
            header.vertical_units[i],
            header.slope[i],
            header.y_offset[i],
        );
    }
}
