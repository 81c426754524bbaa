// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Error types for TAFFmat captures.
//!
//! Every failure in this crate is a deterministic function of the input
//! bytes, so there is no retryable class:
//! - Header parsing (missing or malformed fields)
//! - Sample data decoding (truncated payload, count mismatch)
//! - Matrix/header shape disagreements on write
//! - Slice bounds
//! - File I/O

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while reading, writing or slicing a capture.
#[derive(Debug, Error)]
pub enum CaptureError {
    /// One of the two sibling files of a capture does not exist.
    #[error("Capture not found: '{}'", path.display())]
    NotFound {
        /// Path that was looked up
        path: PathBuf,
    },

    /// A required header key is absent.
    #[error("Missing header field '{key}'")]
    MissingField {
        /// Lowercased header key
        key: String,
    },

    /// A header value could not be interpreted.
    #[error("Malformed header field '{field}': {message}")]
    MalformedHeader {
        /// Header key or logical field name
        field: String,
        /// Error message
        message: String,
    },

    /// Sample payload is not a whole number of sample records.
    #[error("Truncated sample data: {len} bytes is not a multiple of the {record_size}-byte record")]
    TruncatedData {
        /// Payload length in bytes
        len: usize,
        /// Bytes per record (series count * sample width)
        record_size: usize,
    },

    /// Header sample count disagrees with the decoded payload.
    #[error("Sample count mismatch: header says {expected}, data holds {actual}")]
    SampleCountMismatch {
        /// NUM_SAMPS from the header
        expected: usize,
        /// Samples per series found in the data file
        actual: usize,
    },

    /// A sample matrix does not have the shape the header describes.
    #[error("Shape mismatch: matrix is {series}x{samples}, header expects {expected_series}x{expected_samples}")]
    ShapeMismatch {
        /// Matrix series count
        series: usize,
        /// Matrix samples per series
        samples: usize,
        /// Header NUM_SERIES
        expected_series: usize,
        /// Header NUM_SAMPS
        expected_samples: usize,
    },

    /// Slice bounds outside `0 <= start <= end < number_of_samples`.
    #[error("Invalid sample range {start}..={end} for a capture of {number_of_samples} samples")]
    Range {
        /// First requested sample index
        start: usize,
        /// Last requested sample index (inclusive)
        end: usize,
        /// Samples available
        number_of_samples: usize,
    },

    /// Underlying file I/O failure.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl CaptureError {
    /// Create a "not found" error.
    pub fn not_found(path: impl Into<PathBuf>) -> Self {
        CaptureError::NotFound { path: path.into() }
    }

    /// Create a missing field error.
    pub fn missing_field(key: impl Into<String>) -> Self {
        CaptureError::MissingField { key: key.into() }
    }

    /// Create a malformed header error.
    pub fn malformed(field: impl Into<String>, message: impl Into<String>) -> Self {
        CaptureError::MalformedHeader {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Create a truncated data error.
    pub fn truncated(len: usize, record_size: usize) -> Self {
        CaptureError::TruncatedData { len, record_size }
    }

    /// Create a range error.
    pub fn range(start: usize, end: usize, number_of_samples: usize) -> Self {
        CaptureError::Range {
            start,
            end,
            number_of_samples,
        }
    }

    /// Get structured fields for logging.
    pub fn log_fields(&self) -> Vec<(&'static str, String)> {
        match self {
            CaptureError::NotFound { path } => vec![("path", path.display().to_string())],
            CaptureError::MissingField { key } => vec![("key", key.clone())],
            CaptureError::MalformedHeader { field, message } => {
                vec![("field", field.clone()), ("message", message.clone())]
            }
            CaptureError::TruncatedData { len, record_size } => vec![
                ("len", len.to_string()),
                ("record_size", record_size.to_string()),
            ],
            CaptureError::SampleCountMismatch { expected, actual } => vec![
                ("expected", expected.to_string()),
                ("actual", actual.to_string()),
            ],
            CaptureError::ShapeMismatch {
                series,
                samples,
                expected_series,
                expected_samples,
            } => vec![
                ("series", series.to_string()),
                ("samples", samples.to_string()),
                ("expected_series", expected_series.to_string()),
                ("expected_samples", expected_samples.to_string()),
            ],
            CaptureError::Range {
                start,
                end,
                number_of_samples,
            } => vec![
                ("start", start.to_string()),
                ("end", end.to_string()),
                ("number_of_samples", number_of_samples.to_string()),
            ],
            CaptureError::Io(err) => vec![("message", err.to_string())],
        }
    }
}

/// Result type for taffmat operations.
pub type Result<T> = std::result::Result<T, CaptureError>;
