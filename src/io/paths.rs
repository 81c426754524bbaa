// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Resolution of a capture name to its `.hdr`/`.dat` siblings.
//!
//! A capture may be referenced by its bare base name or by either sibling,
//! with the extension in any case (`UTEST001`, `UTEST001.DAT`,
//! `utest001.hdr`). The sibling extension copies the case of the one given,
//! so `UTEST001.DAT` pairs with `UTEST001.HDR`.

use std::ffi::OsString;
use std::path::{Path, PathBuf};

/// Metadata file extension.
pub const HEADER_EXTENSION: &str = "hdr";

/// Sample file extension.
pub const DATA_EXTENSION: &str = "dat";

/// The two files that make up one capture.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CapturePaths {
    /// `.hdr` metadata file
    pub header: PathBuf,
    /// `.dat` sample file
    pub data: PathBuf,
}

impl CapturePaths {
    /// Sibling paths for `base` using the given extension spellings.
    fn with_extensions(base: &Path, header_ext: &str, data_ext: &str) -> Self {
        Self {
            header: with_extension(base, header_ext),
            data: with_extension(base, data_ext),
        }
    }

    /// Whether both files exist.
    pub fn exist(&self) -> bool {
        self.header.is_file() && self.data.is_file()
    }
}

/// Split a recognized capture extension off `path`.
///
/// Returns the base path and the extension as spelled, or `None` when the
/// path carries no `.hdr`/`.dat` extension (other extensions are part of the
/// base name).
pub fn split_extension(path: &Path) -> (PathBuf, Option<String>) {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .filter(|e| {
            e.eq_ignore_ascii_case(HEADER_EXTENSION) || e.eq_ignore_ascii_case(DATA_EXTENSION)
        });

    match ext {
        Some(ext) => (path.with_extension(""), Some(ext.to_string())),
        None => (path.to_path_buf(), None),
    }
}

/// Find the existing sibling pair for `path`, if any.
///
/// Candidates are tried in order: the case of the extension given (when one
/// is given), then lowercase, then uppercase.
pub fn resolve(path: &Path) -> Option<CapturePaths> {
    let (base, ext) = split_extension(path);

    let mut candidates = Vec::with_capacity(3);
    if let Some(ext) = &ext {
        candidates.push(CapturePaths::with_extensions(
            &base,
            &match_case(ext, HEADER_EXTENSION),
            &match_case(ext, DATA_EXTENSION),
        ));
    }
    candidates.push(CapturePaths::with_extensions(
        &base,
        HEADER_EXTENSION,
        DATA_EXTENSION,
    ));
    candidates.push(CapturePaths::with_extensions(
        &base,
        &HEADER_EXTENSION.to_ascii_uppercase(),
        &DATA_EXTENSION.to_ascii_uppercase(),
    ));

    candidates.into_iter().find(CapturePaths::exist)
}

/// Paths a capture named `path` is written to.
///
/// A recognized extension on `path` is replaced and its case kept; a bare
/// base name gets lowercase extensions.
pub fn output_paths(path: &Path) -> CapturePaths {
    let (base, ext) = split_extension(path);
    match ext {
        Some(ext) => CapturePaths::with_extensions(
            &base,
            &match_case(&ext, HEADER_EXTENSION),
            &match_case(&ext, DATA_EXTENSION),
        ),
        None => CapturePaths::with_extensions(&base, HEADER_EXTENSION, DATA_EXTENSION),
    }
}

/// `DATASET` name for a capture written to `path`: the uppercased file stem.
pub fn dataset_name(path: &Path) -> String {
    let (base, _) = split_extension(path);
    base.file_name()
        .map(|name| name.to_string_lossy().to_uppercase())
        .unwrap_or_default()
}

/// Append `.ext` without touching dots already in the base name.
fn with_extension(base: &Path, ext: &str) -> PathBuf {
    let mut name = OsString::from(base.as_os_str());
    name.push(".");
    name.push(ext);
    PathBuf::from(name)
}

/// Spell `target` with the per-character case of `template`.
fn match_case(template: &str, target: &str) -> String {
    target
        .chars()
        .zip(template.chars().chain(std::iter::repeat('a')))
        .map(|(c, t)| {
            if t.is_ascii_uppercase() {
                c.to_ascii_uppercase()
            } else {
                c.to_ascii_lowercase()
            }
        })
        .collect()
}
