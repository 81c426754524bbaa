// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Convert command - export captures to other formats.

use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::Subcommand;

use crate::common::{open_capture, sibling_path, Result};
use taffmat::Capture;

/// Export captures to other formats.
#[derive(Subcommand, Clone, Debug)]
pub enum ConvertCmd {
    /// Export physical-unit samples as CSV with a leading time column
    ToCsv {
        /// Capture base name, .hdr or .dat file
        #[arg(value_name = "INPUT")]
        input: PathBuf,

        /// Output CSV file (default: INPUT base name with .csv)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Accept a NUM_SAMPS that disagrees with the data file
        #[arg(long)]
        lenient: bool,
    },
}

impl ConvertCmd {
    pub fn run(self) -> Result<()> {
        match self {
            ConvertCmd::ToCsv {
                input,
                output,
                lenient,
            } => cmd_to_csv(input, output, lenient),
        }
    }
}

fn cmd_to_csv(input: PathBuf, output: Option<PathBuf>, lenient: bool) -> Result<()> {
    let output = output.unwrap_or_else(|| sibling_path(&input, "csv"));

    println!("Converting capture to CSV");
    println!("  Input:  {}", input.display());
    println!("  Output: {}", output.display());

    let capture = open_capture(&input, lenient)?;
    let rows = write_csv(&capture, &output)?;

    println!("  Wrote {rows} rows");
    Ok(())
}

/// One row per sample instant: `time,<label1>,<label2>,...`.
fn write_csv(capture: &Capture, output: &Path) -> Result<usize> {
    let mut writer = csv::Writer::from_path(output).context("creating CSV")?;

    let header = capture.header();
    let mut record = Vec::with_capacity(header.number_of_series + 1);
    record.push("time".to_string());
    record.extend(header.series_labels.iter().cloned());
    writer
        .write_record(&record)
        .context("writing CSV header")?;

    let samples = capture.samples();
    let time = capture.time_axis();
    for (i, t) in time.iter().enumerate() {
        record.clear();
        record.push(t.to_string());
        for series in 0..samples.series() {
            record.push(samples.row(series)[i].to_string());
        }
        writer.write_record(&record)?;
    }

    writer.flush()?;
    Ok(time.len())
}
