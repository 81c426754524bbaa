// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Rewriting captures into new captures.
//!
//! - [`slice`] - contiguous sample-range extraction

pub mod slice;

pub use slice::{slice, write_slice, SliceStats};
