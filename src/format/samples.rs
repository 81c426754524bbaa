// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! `.dat` sample codec.
//!
//! The data file is a flat run of little-endian signed integers, interleaved
//! sample-major: sample 0 of every series, then sample 1 of every series, and
//! so on. In memory the samples live in a series-major [`SampleMatrix`] of
//! physical values:
//!
//! ```text
//! physical = raw * slope[s] + y_offset[s]
//! raw      = round_half_even((physical - y_offset[s]) / slope[s])
//! ```
//!
//! Decoding accepts 2- and 4-byte samples. Encoding always writes 2-byte
//! samples, the only width the write path of the format defines.

use std::io::Write;
use std::ops::RangeInclusive;

use byteorder::{ByteOrder, LittleEndian, WriteBytesExt};

use super::header::FileType;
use crate::{CaptureError, Result};

/// Physical-unit samples, shape `(series, samples)`, row-major by series.
#[derive(Debug, Clone, PartialEq)]
pub struct SampleMatrix {
    series: usize,
    samples: usize,
    data: Vec<f64>,
}

impl SampleMatrix {
    /// Build from series-major data of length `series * samples`.
    pub fn new(series: usize, samples: usize, data: Vec<f64>) -> Result<Self> {
        if data.len() != series * samples {
            return Err(CaptureError::ShapeMismatch {
                series,
                samples: if series == 0 { 0 } else { data.len() / series },
                expected_series: series,
                expected_samples: samples,
            });
        }
        Ok(Self {
            series,
            samples,
            data,
        })
    }

    /// Build from one row per series. All rows must have the same length.
    pub fn from_rows(rows: Vec<Vec<f64>>) -> Result<Self> {
        let series = rows.len();
        let samples = rows.first().map_or(0, Vec::len);
        if let Some(row) = rows.iter().find(|row| row.len() != samples) {
            return Err(CaptureError::ShapeMismatch {
                series,
                samples: row.len(),
                expected_series: series,
                expected_samples: samples,
            });
        }
        Ok(Self {
            series,
            samples,
            data: rows.into_iter().flatten().collect(),
        })
    }

    /// Number of series (rows).
    pub fn series(&self) -> usize {
        self.series
    }

    /// Number of samples per series (columns).
    pub fn samples(&self) -> usize {
        self.samples
    }

    /// Samples of one series.
    ///
    /// # Panics
    ///
    /// Panics if `series` is out of range.
    pub fn row(&self, series: usize) -> &[f64] {
        let start = series * self.samples;
        &self.data[start..start + self.samples]
    }

    /// Iterate over the series rows in order.
    pub fn rows(&self) -> impl Iterator<Item = &[f64]> + '_ {
        (0..self.series).map(move |s| self.row(s))
    }

    /// Single sample, `None` when out of range.
    pub fn get(&self, series: usize, sample: usize) -> Option<f64> {
        if series < self.series && sample < self.samples {
            Some(self.data[series * self.samples + sample])
        } else {
            None
        }
    }

    /// Series-major backing storage.
    pub fn as_slice(&self) -> &[f64] {
        &self.data
    }

    /// Owned copy of the columns in `range`.
    pub fn columns(&self, range: RangeInclusive<usize>) -> Result<Self> {
        let (start, end) = (*range.start(), *range.end());
        if start > end || end >= self.samples {
            return Err(CaptureError::range(start, end, self.samples));
        }

        let data = self
            .rows()
            .flat_map(|row| row[start..=end].iter().copied())
            .collect();
        Ok(Self {
            series: self.series,
            samples: end - start + 1,
            data,
        })
    }
}

/// Decode a `.dat` payload into physical units.
///
/// `file_type` selects the stored sample width; `slope` and `y_offset` must
/// hold one entry per series.
pub fn decode_samples(
    bytes: &[u8],
    number_of_series: usize,
    file_type: &FileType,
    slope: &[f64],
    y_offset: &[f64],
) -> Result<SampleMatrix> {
    check_scaling(number_of_series, slope, y_offset)?;

    let width = file_type.sample_width();
    let record_size = number_of_series * width;
    if bytes.len() % record_size != 0 {
        return Err(CaptureError::truncated(bytes.len(), record_size));
    }

    let raw: Vec<i32> = match width {
        4 => bytes.chunks_exact(4).map(LittleEndian::read_i32).collect(),
        _ => bytes
            .chunks_exact(2)
            .map(|chunk| i32::from(LittleEndian::read_i16(chunk)))
            .collect(),
    };

    let samples = raw.len() / number_of_series;
    let mut data = Vec::with_capacity(raw.len());
    for s in 0..number_of_series {
        data.extend(
            raw[s..]
                .iter()
                .step_by(number_of_series)
                .map(|&count| f64::from(count) * slope[s] + y_offset[s]),
        );
    }

    SampleMatrix::new(number_of_series, samples, data)
}

/// Encode physical units as an interleaved 2-byte `.dat` payload.
///
/// Values whose count falls outside the `i16` range saturate; the recorder
/// never produces more than about 131% of full scale (±32750 counts).
pub fn encode_samples(matrix: &SampleMatrix, slope: &[f64], y_offset: &[f64]) -> Result<Vec<u8>> {
    let mut bytes = Vec::with_capacity(matrix.series() * matrix.samples() * 2);
    write_samples(&mut bytes, matrix, slope, y_offset)?;
    Ok(bytes)
}

/// Encode physical units straight into a byte sink.
pub fn write_samples<W: Write>(
    writer: &mut W,
    matrix: &SampleMatrix,
    slope: &[f64],
    y_offset: &[f64],
) -> Result<()> {
    check_scaling(matrix.series(), slope, y_offset)?;

    let counts = remove_slope_and_offset(matrix, slope, y_offset);
    for i in 0..matrix.samples() {
        for row in &counts {
            writer.write_i16::<LittleEndian>(row[i])?;
        }
    }
    Ok(())
}

/// Invert the affine scaling of every series, rounding half to even.
pub fn remove_slope_and_offset(
    matrix: &SampleMatrix,
    slope: &[f64],
    y_offset: &[f64],
) -> Vec<Vec<i16>> {
    matrix
        .rows()
        .zip(slope.iter().zip(y_offset))
        .map(|(row, (&slope, &offset))| {
            row.iter()
                .map(|&value| ((value - offset) / slope).round_ties_even() as i16)
                .collect()
        })
        .collect()
}

fn check_scaling(number_of_series: usize, slope: &[f64], y_offset: &[f64]) -> Result<()> {
    if number_of_series == 0 {
        return Err(CaptureError::malformed(
            "num_series",
            "a capture needs at least one series",
        ));
    }
    for (field, len) in [("slope", slope.len()), ("y_offset", y_offset.len())] {
        if len != number_of_series {
            return Err(CaptureError::malformed(
                field,
                format!("expected {number_of_series} entries (num_series), found {len}"),
            ));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const SLOPE: [f64; 2] = [8e-5, 0.0002];
    const Y_OFFSET: [f64; 2] = [0.0, 0.1];

    const COUNTS: [i16; 6] = [-25000, -12500, 0, 1, 12500, 25000];

    fn physical() -> SampleMatrix {
        SampleMatrix::from_rows(vec![
            vec![-2.0, -1.0, 0.0, 0.00008, 1.0, 2.0],
            vec![-4.9, -2.4, 0.1, 0.1002, 2.6, 5.1],
        ])
        .unwrap()
    }

    /// Interleave two identical count rows into little-endian i16 bytes.
    fn interleaved_bytes() -> Vec<u8> {
        let mut bytes = Vec::new();
        for &count in &COUNTS {
            bytes.extend_from_slice(&count.to_le_bytes());
            bytes.extend_from_slice(&count.to_le_bytes());
        }
        bytes
    }

    #[test]
    fn test_decode_applies_slope_and_offset() {
        let decoded =
            decode_samples(&interleaved_bytes(), 2, &FileType::Integer, &SLOPE, &Y_OFFSET)
                .unwrap();
        assert_eq!(decoded.series(), 2);
        assert_eq!(decoded.samples(), 6);
        for (got, want) in decoded.as_slice().iter().zip(physical().as_slice()) {
            assert!((got - want).abs() < 1e-8, "{got} != {want}");
        }
    }

    #[test]
    fn test_remove_slope_and_offset() {
        let counts = remove_slope_and_offset(&physical(), &SLOPE, &Y_OFFSET);
        assert_eq!(counts, vec![COUNTS.to_vec(), COUNTS.to_vec()]);
    }

    #[test]
    fn test_encode_interleaves_little_endian() {
        let bytes = encode_samples(&physical(), &SLOPE, &Y_OFFSET).unwrap();
        assert_eq!(bytes, interleaved_bytes());
    }

    #[test]
    fn test_decode_four_byte_samples() {
        let mut bytes = Vec::new();
        for count in [100_000i32, -3, 7, -100_000] {
            bytes.extend_from_slice(&count.to_le_bytes());
        }
        let decoded = decode_samples(&bytes, 2, &FileType::Long, &[1.0, 2.0], &[0.0, 0.5]).unwrap();
        assert_eq!(decoded.row(0), &[100_000.0, 7.0]);
        assert_eq!(decoded.row(1), &[-5.5, -199_999.5]);
    }

    #[test]
    fn test_unknown_file_type_decodes_two_bytes() {
        let bytes = [1u8, 0, 2, 0];
        let decoded =
            decode_samples(&bytes, 1, &FileType::Other("FLOAT".into()), &[1.0], &[0.0]).unwrap();
        assert_eq!(decoded.row(0), &[1.0, 2.0]);
    }

    #[test]
    fn test_truncated_payload() {
        let err = decode_samples(&[0u8; 6], 2, &FileType::Integer, &SLOPE, &Y_OFFSET).unwrap_err();
        assert!(matches!(
            err,
            CaptureError::TruncatedData {
                len: 6,
                record_size: 4
            }
        ));
    }

    #[test]
    fn test_empty_payload_decodes_to_empty_rows() {
        let decoded = decode_samples(&[], 2, &FileType::Integer, &SLOPE, &Y_OFFSET).unwrap();
        assert_eq!(decoded.samples(), 0);
        assert_eq!(decoded.row(1), &[] as &[f64]);
    }

    #[test]
    fn test_scaling_length_checked() {
        let err = encode_samples(&physical(), &SLOPE[..1], &Y_OFFSET).unwrap_err();
        assert!(matches!(err, CaptureError::MalformedHeader { .. }));
    }

    #[test]
    fn test_affine_inverse_law() {
        let slopes = [2e-5, 4e-5, 8e-5, 2e-4, 4e-4, 8e-4, 2e-3];
        let offsets = [0.0, 0.1, -1.25];
        for &slope in &slopes {
            for &offset in &offsets {
                let row: Vec<f64> = (-32768..=32767i32)
                    .step_by(7)
                    .map(|r| f64::from(r) * slope + offset)
                    .collect();
                let expected: Vec<i16> =
                    (-32768..=32767i32).step_by(7).map(|r| r as i16).collect();
                let matrix = SampleMatrix::from_rows(vec![row]).unwrap();
                let counts = remove_slope_and_offset(&matrix, &[slope], &[offset]);
                assert_eq!(counts[0], expected, "slope {slope}, offset {offset}");
            }
        }
    }

    #[test]
    fn test_rounding_is_half_to_even() {
        let matrix = SampleMatrix::from_rows(vec![vec![0.5, 1.5, 2.5, -0.5]]).unwrap();
        let counts = remove_slope_and_offset(&matrix, &[1.0], &[0.0]);
        assert_eq!(counts[0], vec![0, 2, 2, 0]);
    }

    #[test]
    fn test_columns_copy() {
        let matrix = physical();
        let sub = matrix.columns(1..=3).unwrap();
        assert_eq!(sub.samples(), 3);
        assert_eq!(sub.row(0), &[-1.0, 0.0, 0.00008]);
        assert_eq!(sub.row(1), &[-2.4, 0.1, 0.1002]);
        assert_eq!(matrix.samples(), 6);
    }

    #[test]
    fn test_columns_out_of_range() {
        let matrix = physical();
        assert!(matches!(
            matrix.columns(4..=6),
            Err(CaptureError::Range { .. })
        ));
        #[allow(clippy::reversed_empty_ranges)]
        let reversed = matrix.columns(3..=2);
        assert!(reversed.is_err());
    }

    #[test]
    fn test_from_rows_rejects_ragged() {
        let err = SampleMatrix::from_rows(vec![vec![1.0, 2.0], vec![3.0]]).unwrap_err();
        assert!(matches!(err, CaptureError::ShapeMismatch { .. }));
    }

    #[test]
    fn test_get() {
        let matrix = physical();
        assert_eq!(matrix.get(1, 2), Some(0.1));
        assert_eq!(matrix.get(2, 0), None);
        assert_eq!(matrix.get(0, 6), None);
    }
}
