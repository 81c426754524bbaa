// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Reading and writing whole captures.
//!
//! # Example
//!
//! ```no_run
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! use taffmat::io::capture::{read, Capture};
//!
//! let Some(capture) = read("UTEST001")? else {
//!     println!("no such capture");
//!     return Ok(());
//! };
//! println!("{} series", capture.header().number_of_series);
//! capture.write("copy_of_utest001")?;
//! # Ok(())
//! # }
//! ```

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;

use tracing::{debug, warn};

use super::paths::{self, CapturePaths};
use crate::format::header::{FileType, Header};
use crate::format::parser::parse_header;
use crate::format::samples::{decode_samples, write_samples, SampleMatrix};
use crate::format::writer::write_header;
use crate::{CaptureError, Result};

/// Options controlling how a capture is read.
#[derive(Debug, Clone)]
pub struct ReadOptions {
    /// Reject captures whose `NUM_SAMPS` disagrees with the data file.
    ///
    /// When disabled the mismatch is logged and the header count is
    /// replaced by the decoded one.
    pub strict_sample_count: bool,
}

impl Default for ReadOptions {
    fn default() -> Self {
        Self {
            strict_sample_count: true,
        }
    }
}

/// A decoded capture: header plus physical-unit samples.
///
/// The two halves always agree on shape: `samples` has
/// `header.number_of_series` rows of `header.number_of_samples` values.
#[derive(Debug, Clone, PartialEq)]
pub struct Capture {
    header: Header,
    samples: SampleMatrix,
}

/// Headline numbers of a capture.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CaptureSummary {
    pub number_of_samples: usize,
    pub sampling_frequency_hz: u32,
    /// `number_of_samples / sampling_frequency_hz`
    pub duration_secs: f64,
    pub sampling_interval_secs: f64,
}

impl Capture {
    /// Pair a header with its samples, checking that their shapes agree.
    pub fn new(header: Header, samples: SampleMatrix) -> Result<Self> {
        header.validate()?;
        if samples.series() != header.number_of_series
            || samples.samples() != header.number_of_samples
        {
            return Err(CaptureError::ShapeMismatch {
                series: samples.series(),
                samples: samples.samples(),
                expected_series: header.number_of_series,
                expected_samples: header.number_of_samples,
            });
        }
        Ok(Self { header, samples })
    }

    pub fn header(&self) -> &Header {
        &self.header
    }

    pub fn samples(&self) -> &SampleMatrix {
        &self.samples
    }

    /// Sample instants in seconds, derived from the header.
    pub fn time_axis(&self) -> Vec<f64> {
        time_axis(
            self.header.number_of_samples,
            self.header.sampling_frequency_hz,
        )
    }

    pub fn summary(&self) -> CaptureSummary {
        CaptureSummary {
            number_of_samples: self.header.number_of_samples,
            sampling_frequency_hz: self.header.sampling_frequency_hz,
            duration_secs: self.header.duration_secs(),
            sampling_interval_secs: self.header.sampling_interval_secs(),
        }
    }

    /// Write this capture under the base name `path`.
    pub fn write<P: AsRef<Path>>(&self, path: P) -> Result<CapturePaths> {
        write(&self.samples, &self.header, path)
    }
}

/// `number_of_samples` instants spaced `1 / sampling_frequency_hz` apart,
/// starting at 0.
pub fn time_axis(number_of_samples: usize, sampling_frequency_hz: u32) -> Vec<f64> {
    let rate = f64::from(sampling_frequency_hz);
    (0..number_of_samples).map(|i| i as f64 / rate).collect()
}

/// Read a capture with default options.
///
/// Returns `Ok(None)` when either sibling file is missing, so batch callers
/// can skip absent captures without matching on an error.
pub fn read<P: AsRef<Path>>(path: P) -> Result<Option<Capture>> {
    read_with_options(path, &ReadOptions::default())
}

/// Read a capture, treating a missing file pair as an error.
pub fn read_required<P: AsRef<Path>>(path: P) -> Result<Capture> {
    let path = path.as_ref();
    read(path)?.ok_or_else(|| CaptureError::not_found(path))
}

/// Read a capture.
pub fn read_with_options<P: AsRef<Path>>(
    path: P,
    options: &ReadOptions,
) -> Result<Option<Capture>> {
    let path = path.as_ref();
    let Some(paths) = paths::resolve(path) else {
        debug!(
            context = "capture_read",
            path = %path.display(),
            "Capture file pair not found"
        );
        return Ok(None);
    };

    let text = read_header_text(&paths.header)?;
    let mut header = parse_header(&text).inspect_err(|err| log_read_error(&paths.header, err))?;

    if let FileType::Other(tag) = &header.file_type {
        warn!(
            context = "capture_read",
            file_type = %tag,
            "Unrecognized FILE_TYPE, decoding as 2-byte samples"
        );
    }

    let bytes = fs::read(&paths.data)?;
    let samples = decode_samples(
        &bytes,
        header.number_of_series,
        &header.file_type,
        &header.slope,
        &header.y_offset,
    )
    .inspect_err(|err| log_read_error(&paths.data, err))?;

    if samples.samples() != header.number_of_samples {
        if options.strict_sample_count {
            let err = CaptureError::SampleCountMismatch {
                expected: header.number_of_samples,
                actual: samples.samples(),
            };
            log_read_error(&paths.data, &err);
            return Err(err);
        }
        warn!(
            context = "capture_read",
            expected = header.number_of_samples,
            actual = samples.samples(),
            "NUM_SAMPS disagrees with data file, using decoded count"
        );
        header.number_of_samples = samples.samples();
    }

    debug!(
        context = "capture_read",
        header = %paths.header.display(),
        series = header.number_of_series,
        samples = header.number_of_samples,
        bytes = bytes.len(),
        "Read capture"
    );

    Capture::new(header, samples).map(Some)
}

/// Write `samples` and `header` as a file pair named `path`.
///
/// Samples are always stored 2 bytes wide, so the written header says
/// `FILE_TYPE INTEGER` whatever `header.file_type` holds. Nothing is created
/// when the matrix shape disagrees with the header. The two files are written
/// independently; there is no atomicity across the pair.
pub fn write<P: AsRef<Path>>(
    samples: &SampleMatrix,
    header: &Header,
    path: P,
) -> Result<CapturePaths> {
    header.validate()?;
    if samples.series() != header.number_of_series
        || samples.samples() != header.number_of_samples
    {
        return Err(CaptureError::ShapeMismatch {
            series: samples.series(),
            samples: samples.samples(),
            expected_series: header.number_of_series,
            expected_samples: header.number_of_samples,
        });
    }

    let paths = paths::output_paths(path.as_ref());

    let retagged;
    let header = if header.file_type == FileType::Integer {
        header
    } else {
        warn!(
            context = "capture_write",
            file_type = header.file_type.as_str(),
            "Samples are written 2 bytes wide, storing FILE_TYPE INTEGER"
        );
        retagged = Header {
            file_type: FileType::Integer,
            ..header.clone()
        };
        &retagged
    };

    let mut header_file = BufWriter::new(File::create(&paths.header)?);
    write_header(&mut header_file, header)?;
    header_file.flush()?;

    let mut data_file = BufWriter::new(File::create(&paths.data)?);
    write_samples(&mut data_file, samples, &header.slope, &header.y_offset)?;
    data_file.flush()?;

    debug!(
        context = "capture_write",
        header = %paths.header.display(),
        series = samples.series(),
        samples = samples.samples(),
        "Wrote capture"
    );

    Ok(paths)
}

fn log_read_error(path: &Path, err: &CaptureError) {
    warn!(
        context = "capture_read",
        path = %path.display(),
        fields = ?err.log_fields(),
        "{err}"
    );
}

fn read_header_text(path: &Path) -> Result<String> {
    let bytes = fs::read(path)?;
    match String::from_utf8(bytes) {
        Ok(text) => Ok(text),
        Err(err) => {
            warn!(
                context = "capture_read",
                path = %path.display(),
                "Header is not valid UTF-8, replacing invalid bytes"
            );
            Ok(String::from_utf8_lossy(err.as_bytes()).into_owned())
        }
    }
}
