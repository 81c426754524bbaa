// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Typed TAFFmat header record.
//!
//! A [`Header`] is the parsed form of a `.hdr` file. Presence-based fields of
//! the text format are modelled as variants: the recorder model is a
//! [`RecorderVersion`] and the voice annotation is an `Option<VoiceMemo>`.

use chrono::NaiveDateTime;
use serde::Serialize;

use crate::{CaptureError, Result};

/// Header key of the recorder version line, by priority.
pub const RECORDER_VERSION_KEYS: [&str; 4] = [
    "lx10_version",
    "lx20_version",
    "lx110_version",
    "lx120_version",
];

/// Recorder model that produced the capture, with its firmware string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum RecorderVersion {
    /// No known version key was present.
    Unrecognized,
    /// `LX10_VERSION`
    Lx10(String),
    /// `LX20_VERSION`
    Lx20(String),
    /// `LX110_VERSION`
    Lx110(String),
    /// `LX120_VERSION`
    Lx120(String),
}

impl RecorderVersion {
    /// Build from a lowercased header key and its value.
    pub fn from_key(key: &str, version: impl Into<String>) -> Option<Self> {
        let version = version.into();
        match key {
            "lx10_version" => Some(Self::Lx10(version)),
            "lx20_version" => Some(Self::Lx20(version)),
            "lx110_version" => Some(Self::Lx110(version)),
            "lx120_version" => Some(Self::Lx120(version)),
            _ => None,
        }
    }

    /// Header key as written to disk, `None` when unrecognized.
    pub fn key(&self) -> Option<&'static str> {
        match self {
            Self::Unrecognized => None,
            Self::Lx10(_) => Some("LX10_VERSION"),
            Self::Lx20(_) => Some("LX20_VERSION"),
            Self::Lx110(_) => Some("LX110_VERSION"),
            Self::Lx120(_) => Some("LX120_VERSION"),
        }
    }

    /// Version string reported by the recorder.
    pub fn version(&self) -> Option<&str> {
        match self {
            Self::Unrecognized => None,
            Self::Lx10(v) | Self::Lx20(v) | Self::Lx110(v) | Self::Lx120(v) => Some(v),
        }
    }

    /// Short model name (e.g. `LX-10`).
    pub fn model(&self) -> &'static str {
        match self {
            Self::Unrecognized => "unrecognized",
            Self::Lx10(_) => "LX-10",
            Self::Lx20(_) => "LX-20",
            Self::Lx110(_) => "LX-110",
            Self::Lx120(_) => "LX-120",
        }
    }
}

/// `FILE_TYPE` tag, which fixes the on-disk sample width.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum FileType {
    /// `INTEGER`: 2-byte signed samples.
    Integer,
    /// `LONG`: 4-byte signed samples.
    Long,
    /// Any other tag, kept verbatim. Decoded as 2-byte samples.
    Other(String),
}

impl FileType {
    /// Interpret a raw `FILE_TYPE` value.
    pub fn from_tag(tag: &str) -> Self {
        if tag.eq_ignore_ascii_case("INTEGER") {
            Self::Integer
        } else if tag.eq_ignore_ascii_case("LONG") {
            Self::Long
        } else {
            Self::Other(tag.to_string())
        }
    }

    /// Tag as written to disk.
    pub fn as_str(&self) -> &str {
        match self {
            Self::Integer => "INTEGER",
            Self::Long => "LONG",
            Self::Other(tag) => tag,
        }
    }

    /// Bytes per stored sample.
    pub fn sample_width(&self) -> usize {
        match self {
            Self::Long => 4,
            Self::Integer | Self::Other(_) => 2,
        }
    }
}

/// Amplifier unit installed in one of the two recorder slots.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AmpSlot {
    /// Unit identifier
    pub id_name: String,
    /// Channel count, kept as written
    pub num_channels: String,
    /// PLD version, surrounding blanks removed
    pub pld_version: String,
    /// Firmware version, surrounding blanks removed
    pub firmware_version: String,
}

/// Per-series amplifier configuration (`CHn_n` lines).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ChannelInfo {
    /// 1-based channel number
    pub channel_num: usize,
    pub amp_type: String,
    pub range_setting: String,
    pub filter_setting: String,
}

/// Voice annotation recorded alongside the capture.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VoiceMemo {
    /// Bits per sample, kept as written
    pub bits_per_sample: String,
    /// Annotation size in bytes
    pub size_bytes: u64,
}

/// Parsed `.hdr` metadata of one capture.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Header {
    pub dataset: String,
    pub version: i64,
    pub series_labels: Vec<String>,
    /// `DATE` + first `TIME` line
    pub recording_start: NaiveDateTime,
    pub sampling_frequency_hz: u32,
    pub vertical_units: Vec<String>,
    pub horizontal_units: String,
    pub comment: String,
    pub number_of_series: usize,
    pub storage_mode: String,
    pub file_type: FileType,
    /// Physical units per integer count, one per series
    pub slope: Vec<f64>,
    /// Round-tripped only
    pub x_offset: f64,
    pub y_offset: Vec<f64>,
    pub number_of_samples: usize,
    pub device: String,
    pub slot1_amp: AmpSlot,
    pub slot2_amp: AmpSlot,
    pub channel_info: Vec<ChannelInfo>,
    pub id_num: i64,
    /// Start marker from the second `TIME` line
    pub start_time: i64,
    /// Stop marker from the second `TIME` line
    pub stop_time: i64,
    /// `REC_MODE`
    pub recording_destination: String,
    pub start_trigger: String,
    pub stop_condition: String,
    pub voice_memo: Option<VoiceMemo>,
    pub recorder: RecorderVersion,
    /// `MEMO_LENGTH`, kept as written
    pub memo_length: String,
    pub memo: String,
}

impl Header {
    /// Whether a voice annotation accompanies the capture.
    pub fn voice_memo_on(&self) -> bool {
        self.voice_memo.is_some()
    }

    /// Capture length in seconds.
    pub fn duration_secs(&self) -> f64 {
        self.number_of_samples as f64 / f64::from(self.sampling_frequency_hz)
    }

    /// Seconds between consecutive samples.
    pub fn sampling_interval_secs(&self) -> f64 {
        1.0 / f64::from(self.sampling_frequency_hz)
    }

    /// Check the cross-field invariants every header must satisfy.
    ///
    /// All per-series lists must hold exactly `number_of_series` entries, and
    /// both the series count and the sampling frequency must be positive.
    pub fn validate(&self) -> Result<()> {
        if self.number_of_series == 0 {
            return Err(CaptureError::malformed(
                "num_series",
                "a capture needs at least one series",
            ));
        }
        if self.sampling_frequency_hz == 0 {
            return Err(CaptureError::malformed(
                "rate",
                "sampling frequency must be positive",
            ));
        }

        let lengths = [
            ("series", self.series_labels.len()),
            ("vert_units", self.vertical_units.len()),
            ("slope", self.slope.len()),
            ("y_offset", self.y_offset.len()),
            ("channel_info", self.channel_info.len()),
        ];
        for (field, len) in lengths {
            if len != self.number_of_series {
                return Err(CaptureError::malformed(
                    field,
                    format!(
                        "expected {} entries (num_series), found {len}",
                        self.number_of_series
                    ),
                ));
            }
        }

        Ok(())
    }
}
