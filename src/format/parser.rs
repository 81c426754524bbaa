// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! `.hdr` text parser.
//!
//! # Line format
//!
//! Every line is `<KEY> <value>`: the key runs up to the first space and is
//! matched case-insensitively, the value is the rest of the line with
//! surrounding blanks removed. Lines without a space are sentinels (`DATA`,
//! `ID_END`, blank lines) and carry an empty value.
//!
//! The format reuses some keys. The second `TIME` line holds the start/stop
//! markers, distinct from the recording start time, and is looked up as
//! `time2`.
//!
//! Parsing goes straight into a typed [`Header`]; the key/value table is
//! scratch state discarded afterwards.

use std::collections::BTreeMap;
use std::str::FromStr;

use chrono::NaiveDateTime;

use super::header::{
    AmpSlot, ChannelInfo, FileType, Header, RecorderVersion, VoiceMemo, RECORDER_VERSION_KEYS,
};
use crate::{CaptureError, Result};

/// `DATE` + ` ` + `TIME`, e.g. `03-14-2016 09:26:53.15`.
const DATETIME_FORMAT: &str = "%m-%d-%Y %H:%M:%S%.f";

/// Parse the full text of a `.hdr` file.
pub fn parse_header(text: &str) -> Result<Header> {
    let fields = RawFields::from_text(text);

    let number_of_series: usize = fields.number("num_series")?;
    if number_of_series == 0 {
        return Err(CaptureError::malformed(
            "num_series",
            "a capture needs at least one series",
        ));
    }

    let sampling_frequency_hz: u32 = fields.number("rate")?;
    if sampling_frequency_hz == 0 {
        return Err(CaptureError::malformed(
            "rate",
            "sampling frequency must be positive",
        ));
    }

    let recording_start = {
        let stamp = format!("{} {}", fields.require("date")?, fields.require("time")?);
        NaiveDateTime::parse_from_str(&stamp, DATETIME_FORMAT)
            .map_err(|e| CaptureError::malformed("date/time", format!("'{stamp}': {e}")))?
    };

    let (start_time, stop_time) = {
        let markers = fields.list("time2", Some(2))?;
        (
            parse_number::<i64>("time2", &markers[0])?,
            parse_number::<i64>("time2", &markers[1])?,
        )
    };

    let channel_info = (1..=number_of_series)
        .map(|index| {
            let key = format!("ch{index}_{index}");
            // Fields past the third are ignored.
            let parts = fields.list(&key, None)?;
            if parts.len() < 3 {
                return Err(CaptureError::malformed(
                    &key,
                    format!("expected 3 comma-separated values, found {}", parts.len()),
                ));
            }
            let mut parts = parts.into_iter();
            Ok(ChannelInfo {
                channel_num: index,
                amp_type: parts.next().unwrap_or_default(),
                range_setting: parts.next().unwrap_or_default(),
                filter_setting: parts.next().unwrap_or_default(),
            })
        })
        .collect::<Result<Vec<_>>>()?;

    let voice_memo = match fields.get("voice_memo") {
        Some(_) => {
            let parts = fields.list("voice_memo", Some(2))?;
            Some(VoiceMemo {
                bits_per_sample: parts[0].clone(),
                size_bytes: parse_number("voice_memo", &parts[1])?,
            })
        }
        None => None,
    };

    let recorder = RECORDER_VERSION_KEYS
        .iter()
        .find_map(|&key| {
            fields
                .get(key)
                .and_then(|version| RecorderVersion::from_key(key, version))
        })
        .unwrap_or(RecorderVersion::Unrecognized);

    let header = Header {
        dataset: fields.require("dataset")?.to_string(),
        version: fields.number("version")?,
        series_labels: fields.list("series", Some(number_of_series))?,
        recording_start,
        sampling_frequency_hz,
        vertical_units: fields.list("vert_units", Some(number_of_series))?,
        horizontal_units: fields.require("horz_units")?.to_string(),
        comment: fields.require("comment")?.to_string(),
        number_of_series,
        storage_mode: fields.require("storage_mode")?.to_string(),
        file_type: FileType::from_tag(fields.require("file_type")?),
        slope: fields.numbers("slope", number_of_series)?,
        x_offset: fields.number("x_offset")?,
        y_offset: fields.numbers("y_offset", number_of_series)?,
        number_of_samples: fields.number("num_samps")?,
        device: fields.require("device")?.to_string(),
        slot1_amp: fields.amp_slot("slot1_amp")?,
        slot2_amp: fields.amp_slot("slot2_amp")?,
        channel_info,
        id_num: fields.number("id_no")?,
        start_time,
        stop_time,
        recording_destination: fields.require("rec_mode")?.to_string(),
        start_trigger: fields.require("start_trigger")?.to_string(),
        stop_condition: fields.require("stop_condition")?.to_string(),
        voice_memo,
        recorder,
        memo_length: fields.require("memo_length")?.to_string(),
        memo: fields.require("memo")?.to_string(),
    };

    header.validate()?;
    Ok(header)
}

/// Key/value table of one header file.
struct RawFields {
    values: BTreeMap<String, String>,
}

impl RawFields {
    fn from_text(text: &str) -> Self {
        let mut values = BTreeMap::new();

        for line in text.lines() {
            let (key, value) = match line.split_once(' ') {
                Some((key, rest)) => (key, rest.trim()),
                None => (line.trim(), ""),
            };
            if key.is_empty() {
                continue;
            }

            let mut key = key.to_ascii_lowercase();
            if values.contains_key(&key) {
                key.push('2');
            }
            values.insert(key, value.to_string());
        }

        Self { values }
    }

    fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    fn require(&self, key: &str) -> Result<&str> {
        self.get(key).ok_or_else(|| CaptureError::missing_field(key))
    }

    fn number<T: FromStr>(&self, key: &str) -> Result<T> {
        parse_number(key, self.require(key)?)
    }

    /// Comma-separated list, optionally checked against an expected length.
    fn list(&self, key: &str, expected: Option<usize>) -> Result<Vec<String>> {
        let items: Vec<String> = self
            .require(key)?
            .split(',')
            .map(|item| item.to_string())
            .collect();

        match expected {
            Some(n) if items.len() != n => Err(CaptureError::malformed(
                key,
                format!("expected {n} comma-separated values, found {}", items.len()),
            )),
            _ => Ok(items),
        }
    }

    fn numbers(&self, key: &str, expected: usize) -> Result<Vec<f64>> {
        self.list(key, Some(expected))?
            .iter()
            .map(|item| parse_number(key, item))
            .collect()
    }

    fn amp_slot(&self, key: &str) -> Result<AmpSlot> {
        let mut parts = self.list(key, Some(4))?.into_iter();
        Ok(AmpSlot {
            id_name: parts.next().unwrap_or_default(),
            num_channels: parts.next().unwrap_or_default(),
            pld_version: parts.next().unwrap_or_default().trim().to_string(),
            firmware_version: parts.next().unwrap_or_default().trim().to_string(),
        })
    }
}

fn parse_number<T: FromStr>(key: &str, text: &str) -> Result<T> {
    text.trim().parse().map_err(|_| {
        CaptureError::malformed(
            key,
            format!(
                "'{text}' is not a valid {}",
                std::any::type_name::<T>()
            ),
        )
    })
}
