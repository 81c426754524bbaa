// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Core types used throughout taffmat.
//!
//! - [`CaptureError`] - Error taxonomy shared by every layer
//! - [`Result`] - Crate result alias

pub mod error;

pub use error::{CaptureError, Result};
