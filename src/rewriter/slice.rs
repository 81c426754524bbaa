// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Extraction of a contiguous sample range into a new capture.
//!
//! The slice is an independent capture: its header is a copy of the source
//! header with `NUM_SAMPS` and `DATASET` rewritten and the voice memo dropped
//! (a memo cannot be cut to match), and its samples are an owned copy of the
//! selected columns. The source capture is never modified.

use std::path::Path;

use tracing::debug;

use crate::io::capture::Capture;
use crate::io::paths::{dataset_name, CapturePaths};
use crate::{CaptureError, Result};

/// Statistics from writing a slice.
#[derive(Debug, Clone)]
pub struct SliceStats {
    /// Files written
    pub paths: CapturePaths,
    /// Samples per series in the slice
    pub number_of_samples: usize,
    /// Series in the slice
    pub number_of_series: usize,
    /// Slice length in seconds
    pub duration_secs: f64,
}

/// Cut samples `start..=end` out of `capture`.
///
/// `output` is the base name the slice will be written under; its uppercased
/// file stem becomes the new `DATASET`.
pub fn slice<P: AsRef<Path>>(
    capture: &Capture,
    start: usize,
    end: usize,
    output: P,
) -> Result<Capture> {
    let total = capture.header().number_of_samples;
    if start > end || end >= total {
        return Err(CaptureError::range(start, end, total));
    }

    let samples = capture.samples().columns(start..=end)?;

    let mut header = capture.header().clone();
    header.number_of_samples = end - start + 1;
    header.voice_memo = None;
    header.dataset = dataset_name(output.as_ref());

    debug!(
        context = "slice",
        start,
        end,
        dataset = %header.dataset,
        "Extracted sample range"
    );

    Capture::new(header, samples)
}

/// Cut samples `start..=end` out of `capture` and write them to `output`.
pub fn write_slice<P: AsRef<Path>>(
    capture: &Capture,
    start: usize,
    end: usize,
    output: P,
) -> Result<SliceStats> {
    let output = output.as_ref();
    let sliced = slice(capture, start, end, output)?;
    let paths = sliced.write(output)?;

    let summary = sliced.summary();
    Ok(SliceStats {
        paths,
        number_of_samples: summary.number_of_samples,
        number_of_series: sliced.header().number_of_series,
        duration_secs: summary.duration_secs,
    })
}
