// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Common utilities for CLI commands.

use std::path::{Path, PathBuf};

use taffmat::format::format_exponent;
use taffmat::io::paths::split_extension;
use taffmat::{Capture, CaptureSummary, ReadOptions};

pub use anyhow::Result as CliResult;
pub type Result<T = ()> = CliResult<T>;

/// Open a capture, failing if either sibling file is missing.
pub fn open_capture(path: &Path, lenient: bool) -> Result<Capture> {
    let options = ReadOptions {
        strict_sample_count: !lenient,
    };
    taffmat::read_with_options(path, &options)?
        .ok_or_else(|| anyhow::anyhow!("No .hdr/.dat pair found for {}", path.display()))
}

/// Group digits in threes: `96000` -> `96,000`.
pub fn format_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

/// The two summary lines printed for a capture.
pub fn summary_lines(summary: &CaptureSummary) -> [String; 2] {
    [
        format!(
            "Sampled {} samples over {:.3} sec at {} Hz",
            format_thousands(summary.number_of_samples as u64),
            summary.duration_secs,
            format_thousands(u64::from(summary.sampling_frequency_hz)),
        ),
        format!(
            "Resulting in {} sec/sample",
            format_exponent(summary.sampling_interval_secs, 4, 2)
        ),
    ]
}

/// `input` with its capture extension replaced by `ext`.
pub fn sibling_path(input: &Path, ext: &str) -> PathBuf {
    let (base, _) = split_extension(input);
    let mut name = base.into_os_string();
    name.push(".");
    name.push(ext);
    PathBuf::from(name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_thousands() {
        assert_eq!(format_thousands(0), "0");
        assert_eq!(format_thousands(999), "999");
        assert_eq!(format_thousands(1000), "1,000");
        assert_eq!(format_thousands(96000), "96,000");
        assert_eq!(format_thousands(1234567), "1,234,567");
    }

    #[test]
    fn test_summary_lines() {
        let summary = CaptureSummary {
            number_of_samples: 96000,
            sampling_frequency_hz: 96000,
            duration_secs: 1.0,
            sampling_interval_secs: 1.0 / 96000.0,
        };
        let [first, second] = summary_lines(&summary);
        assert_eq!(first, "Sampled 96,000 samples over 1.000 sec at 96,000 Hz");
        assert_eq!(second, "Resulting in 1.0417e-05 sec/sample");
    }

    #[test]
    fn test_sibling_path() {
        assert_eq!(
            sibling_path(Path::new("data/UTEST001.DAT"), "csv"),
            PathBuf::from("data/UTEST001.csv")
        );
        assert_eq!(
            sibling_path(Path::new("data/UTEST001"), "csv"),
            PathBuf::from("data/UTEST001.csv")
        );
    }
}
