// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Common utilities for integration tests.

#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

use byteorder::{LittleEndian, WriteBytesExt};

// ============================================================================
// Temporary Directories
// ============================================================================

/// A fresh temporary directory for one test.
pub fn temp_dir(name: &str) -> (PathBuf, CleanupGuard) {
    let random = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap()
        .subsec_nanos();
    let dir = std::env::temp_dir().join(format!(
        "taffmat_{}_{}_{}",
        name,
        std::process::id(),
        random
    ));
    fs::create_dir_all(&dir).unwrap();
    (dir.clone(), CleanupGuard(dir))
}

/// Cleanup guard for test temporary files
pub struct CleanupGuard(PathBuf);

impl Drop for CleanupGuard {
    fn drop(&mut self) {
        let _ = fs::remove_dir_all(&self.0);
    }
}

// ============================================================================
// Capture Fixtures
// ============================================================================

/// Samples per series in [`fixture_header`].
pub const FIXTURE_SAMPLES: usize = 1200;

/// Sampling rate in [`fixture_header`].
pub const FIXTURE_RATE: u32 = 96000;

/// Per-series slopes in [`fixture_header`].
pub const FIXTURE_SLOPE: [f64; 3] = [8.0e-5, 2.0e-4, 1.0e-3];

/// Per-series offsets in [`fixture_header`].
pub const FIXTURE_OFFSET: [f64; 3] = [0.0, 0.5, -1.25];

/// A three-series LX-10 header as the recorder lays it out.
pub fn fixture_header(number_of_samples: usize) -> String {
    format!(
        "DATASET UTEST001\r\n\
VERSION 1\r\n\
SERIES CH1,CH2,CH3 \r\n\
DATE 03-14-2016\r\n\
TIME 09:26:53.15\r\n\
RATE {FIXTURE_RATE}\r\n\
VERT_UNITS V,V,mV \r\n\
HORZ_UNITS sec\r\n\
COMMENT bench test\r\n\
NUM_SERIES 3\r\n\
STORAGE_MODE INTERLACED\r\n\
FILE_TYPE INTEGER\r\n\
SLOPE 8.000000e-005,2.000000e-004,1.000000e-003 \r\n\
X_OFFSET 0.0\r\n\
Y_OFFSET 0.000000e+000,5.000000e-001,-1.250000e+000 \r\n\
NUM_SAMPS {number_of_samples}\r\n\
DATA\r\n\
DEVICE LX-10\r\n\
SLOT1_AMP AR-LX10,8,1.00    ,1.02    \r\n\
SLOT2_AMP NONE,0,,\r\n\
CH1_1 VOLT,2V,OFF\r\n\
CH2_2 VOLT,5V,OFF\r\n\
CH3_3 VOLT,10V,LPF\r\n\
ID_NO 1\r\n\
TIME 0,{number_of_samples}\r\n\
REC_MODE CF \r\n\
START_TRIGGER MANUAL  \r\n\
STOP_CONDITION MANUAL  \r\n\
ID_END\r\n\
VOICE_MEMO 16,48000\r\n\
LX10_VERSION 1.02\r\n\
MEMO_LENGTH 0,0,0,0,0,0,0,0\r\n\
MEMO \r\n\
\r\n"
    )
}

/// Raw count of series `series` at sample `sample`.
///
/// Covers both signs and the i16 extremes.
pub fn raw_sample(series: usize, sample: usize) -> i16 {
    match sample {
        0 => i16::MIN,
        1 => i16::MAX,
        _ => ((sample * 37 + series * 1009) % 65536) as u16 as i16,
    }
}

/// Interleaved 2-byte little-endian data for [`raw_sample`].
pub fn fixture_data(number_of_series: usize, number_of_samples: usize) -> Vec<u8> {
    let mut bytes = Vec::with_capacity(number_of_series * number_of_samples * 2);
    for sample in 0..number_of_samples {
        for series in 0..number_of_series {
            bytes
                .write_i16::<LittleEndian>(raw_sample(series, sample))
                .unwrap();
        }
    }
    bytes
}

/// Write a fixture capture as `dir/name.{header_ext,data_ext}`.
///
/// Returns the bare base path.
pub fn write_fixture(
    dir: &Path,
    name: &str,
    header_ext: &str,
    data_ext: &str,
    number_of_samples: usize,
) -> PathBuf {
    let base = dir.join(name);
    fs::write(
        dir.join(format!("{name}.{header_ext}")),
        fixture_header(number_of_samples),
    )
    .unwrap();
    fs::write(
        dir.join(format!("{name}.{data_ext}")),
        fixture_data(FIXTURE_SLOPE.len(), number_of_samples),
    )
    .unwrap();
    base
}

/// Non-blank lines of a header, in order.
pub fn non_blank_lines(text: &str) -> Vec<&str> {
    text.split("\r\n")
        .filter(|line| !line.trim().is_empty())
        .collect()
}
