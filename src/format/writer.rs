// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! `.hdr` text writer.
//!
//! Produces the line layout the recorder itself writes, so that a header read
//! by [`parse_header`](super::parser::parse_header) and written back is
//! textually identical on every non-blank line:
//!
//! - lines end with CRLF regardless of the host platform
//! - `SERIES`, `VERT_UNITS`, `SLOPE`, `Y_OFFSET` and `REC_MODE` carry one
//!   trailing space; `START_TRIGGER` and `STOP_CONDITION` carry two
//! - slopes and offsets use `2.000000e-005` notation, `X_OFFSET` one decimal
//! - amplifier version strings are left-justified to 8 characters
//! - the file ends with an empty line

use std::io::Write;

use super::exponent::format_exponent;
use super::header::{AmpSlot, Header};
use crate::Result;

/// Line terminator of the format.
pub const LINE_TERMINATOR: &str = "\r\n";

/// Field width of amplifier PLD/firmware version strings.
const AMP_VERSION_WIDTH: usize = 8;

/// Mantissa decimals of `SLOPE`/`Y_OFFSET` values.
const SCALING_PRECISION: usize = 6;

/// Exponent digits of `SLOPE`/`Y_OFFSET` values.
const SCALING_EXPONENT_DIGITS: usize = 3;

/// Render a header as `.hdr` text.
///
/// The header is validated first so that a file is never produced that the
/// parser would reject.
pub fn serialize_header(header: &Header) -> Result<String> {
    header.validate()?;

    let mut lines = HeaderLines::default();

    lines.field("DATASET", &header.dataset);
    lines.field("VERSION", header.version);
    lines.list("SERIES", header.series_labels.join(","));
    lines.field("DATE", header.recording_start.format("%m-%d-%Y"));
    lines.field("TIME", recording_time(header));
    lines.field("RATE", header.sampling_frequency_hz);
    lines.list("VERT_UNITS", header.vertical_units.join(","));
    lines.field("HORZ_UNITS", &header.horizontal_units);
    lines.field("COMMENT", &header.comment);
    lines.field("NUM_SERIES", header.number_of_series);
    lines.field("STORAGE_MODE", &header.storage_mode);
    lines.field("FILE_TYPE", header.file_type.as_str());
    lines.list("SLOPE", scaling_list(&header.slope));
    lines.field("X_OFFSET", format!("{:.1}", header.x_offset));
    lines.list("Y_OFFSET", scaling_list(&header.y_offset));
    lines.field("NUM_SAMPS", header.number_of_samples);
    lines.marker("DATA");
    lines.field("DEVICE", &header.device);
    lines.field("SLOT1_AMP", amp_slot(&header.slot1_amp));
    lines.field("SLOT2_AMP", amp_slot(&header.slot2_amp));
    for channel in &header.channel_info {
        let key = format!("CH{0}_{0}", channel.channel_num);
        lines.field(
            &key,
            format!(
                "{},{},{}",
                channel.amp_type, channel.range_setting, channel.filter_setting
            ),
        );
    }
    lines.field("ID_NO", header.id_num);
    lines.field("TIME", format!("{},{}", header.start_time, header.stop_time));
    lines.padded("REC_MODE", &header.recording_destination, 1);
    lines.padded("START_TRIGGER", &header.start_trigger, 2);
    lines.padded("STOP_CONDITION", &header.stop_condition, 2);
    lines.marker("ID_END");
    if let Some(memo) = &header.voice_memo {
        lines.field(
            "VOICE_MEMO",
            format!("{},{}", memo.bits_per_sample, memo.size_bytes),
        );
    }
    if let (Some(key), Some(version)) = (header.recorder.key(), header.recorder.version()) {
        lines.field(key, version);
    }
    lines.field("MEMO_LENGTH", &header.memo_length);
    lines.field("MEMO", &header.memo);
    lines.marker("");

    Ok(lines.finish())
}

/// Serialize a header into any byte sink.
pub fn write_header<W: Write>(writer: &mut W, header: &Header) -> Result<()> {
    let text = serialize_header(header)?;
    writer.write_all(text.as_bytes())?;
    Ok(())
}

/// `HH:MM:SS.ff`: the microsecond rendering cut to 11 characters.
fn recording_time(header: &Header) -> String {
    let mut time = header.recording_start.format("%H:%M:%S%.6f").to_string();
    time.truncate(11);
    time
}

fn scaling_list(values: &[f64]) -> String {
    values
        .iter()
        .map(|&v| format_exponent(v, SCALING_PRECISION, SCALING_EXPONENT_DIGITS))
        .collect::<Vec<_>>()
        .join(",")
}

fn amp_slot(slot: &AmpSlot) -> String {
    format!(
        "{},{},{},{}",
        slot.id_name,
        slot.num_channels,
        pad_version(&slot.pld_version),
        pad_version(&slot.firmware_version)
    )
}

/// Blank versions stay blank so the line ends on the comma.
fn pad_version(version: &str) -> String {
    if version.is_empty() {
        String::new()
    } else {
        format!("{version:<AMP_VERSION_WIDTH$}")
    }
}

/// Accumulates terminated header lines.
#[derive(Default)]
struct HeaderLines {
    text: String,
}

impl HeaderLines {
    fn field(&mut self, key: &str, value: impl std::fmt::Display) {
        self.padded(key, value, 0);
    }

    /// Comma-joined list; the format keeps one space before the terminator.
    fn list(&mut self, key: &str, joined: String) {
        self.padded(key, joined, 1);
    }

    fn padded(&mut self, key: &str, value: impl std::fmt::Display, trailing_spaces: usize) {
        use std::fmt::Write as _;
        // Writing into a String cannot fail.
        let _ = write!(
            self.text,
            "{key} {value}{:trailing_spaces$}{LINE_TERMINATOR}",
            ""
        );
    }

    /// Line consisting of the key alone.
    fn marker(&mut self, key: &str) {
        self.text.push_str(key);
        self.text.push_str(LINE_TERMINATOR);
    }

    fn finish(self) -> String {
        self.text
    }
}
