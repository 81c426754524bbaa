// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! File-pair I/O.
//!
//! - [`paths`] - base name to `.hdr`/`.dat` sibling resolution
//! - [`capture`] - read/write of whole captures

pub mod capture;
pub mod paths;

pub use capture::{
    read, read_required, read_with_options, time_axis, write, Capture, CaptureSummary,
    ReadOptions,
};
pub use paths::CapturePaths;
