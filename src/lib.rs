// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! # taffmat
//!
//! Reader and writer for TEAC TAFFmat data-recorder captures.
//!
//! A capture is a `.hdr` text file of `KEY value` lines and a `.dat` file of
//! interleaved little-endian integers sharing a base name. This crate
//! translates both into a typed [`Header`] and a physical-unit
//! [`SampleMatrix`] and back, reproducing the recorder's text layout on
//! write.
//!
//! ## Architecture
//!
//! - `format/` - pure codecs: header text, sample bytes, exponent notation
//! - `io/` - sibling path resolution, capture read/write
//! - `rewriter/` - slice extraction into new captures
//!
//! ## Example: Reading and slicing
//!
//! ```rust,no_run
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! use taffmat::rewriter::write_slice;
//!
//! let capture = taffmat::read_required("UTEST001.DAT")?;
//! let summary = capture.summary();
//! println!(
//!     "{} samples at {} Hz",
//!     summary.number_of_samples, summary.sampling_frequency_hz
//! );
//!
//! // First thousand samples as a new capture
//! write_slice(&capture, 0, 999, "UTEST001_HEAD")?;
//! # Ok(())
//! # }
//! ```

// Core types
pub mod core;

pub use core::{CaptureError, Result};

// On-disk format codecs
pub mod format;

pub use format::{
    AmpSlot, ChannelInfo, FileType, Header, RecorderVersion, SampleMatrix, VoiceMemo,
};

// File-pair I/O
pub mod io;

pub use io::{read, read_required, read_with_options, write, Capture, CaptureSummary, ReadOptions};

// Slice extraction
pub mod rewriter;

pub use rewriter::{slice, write_slice, SliceStats};
