// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! TAFFmat on-disk format.
//!
//! A capture is a pair of files sharing a base name:
//! - `.hdr`: ASCII `KEY value` lines, CRLF terminated ([`parser`], [`writer`])
//! - `.dat`: interleaved little-endian signed integers ([`samples`])
//!
//! These modules are pure byte/text transformations; file handling lives in
//! [`crate::io`].

pub mod exponent;
pub mod header;
pub mod parser;
pub mod samples;
pub mod writer;

pub use exponent::format_exponent;
pub use header::{AmpSlot, ChannelInfo, FileType, Header, RecorderVersion, VoiceMemo};
pub use parser::parse_header;
pub use samples::{decode_samples, encode_samples, SampleMatrix};
pub use writer::serialize_header;
