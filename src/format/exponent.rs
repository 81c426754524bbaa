// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Fixed-width scientific notation.
//!
//! TAFFmat headers store slopes and offsets as `2.000000e-005`: a normalized
//! mantissa with a fixed number of decimals and a signed, zero-padded
//! exponent of fixed width. Rust's `{:e}` renders `2e-5`, so the exponent is
//! re-padded here.

/// Format `value` as `{mantissa}e{sign}{exponent}`.
///
/// The mantissa has exactly `precision` digits after the decimal point. The
/// exponent field is `exponent_digits + 1` characters wide, the sign
/// included.
///
/// ```
/// use taffmat::format::exponent::format_exponent;
///
/// assert_eq!(format_exponent(0.00002, 6, 3), "2.000000e-005");
/// assert_eq!(format_exponent(1.0, 2, 2), "1.00e+00");
/// ```
pub fn format_exponent(value: f64, precision: usize, exponent_digits: usize) -> String {
    let scientific = format!("{value:.precision$e}");
    // `{:e}` always emits exactly one 'e' for finite input.
    let (mantissa, exponent) = scientific
        .split_once('e')
        .unwrap_or((scientific.as_str(), "0"));
    let exponent: i32 = exponent.parse().unwrap_or(0);
    let width = exponent_digits + 1;
    format!("{mantissa}e{exponent:+0width$}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_engineering_slopes() {
        let values = [0.00002, 0.00004, 0.00008, 0.0002, 0.0004, 0.0008, 0.002];
        let formatted: Vec<String> = values.iter().map(|&v| format_exponent(v, 6, 3)).collect();
        assert_eq!(
            formatted,
            vec![
                "2.000000e-005",
                "4.000000e-005",
                "8.000000e-005",
                "2.000000e-004",
                "4.000000e-004",
                "8.000000e-004",
                "2.000000e-003",
            ]
        );
    }

    #[test]
    fn test_zero_and_positive_exponent() {
        assert_eq!(format_exponent(0.0, 6, 3), "0.000000e+000");
        assert_eq!(format_exponent(12345.0, 3, 3), "1.234e+004");
        assert_eq!(format_exponent(0.1, 6, 3), "1.000000e-001");
    }

    #[test]
    fn test_negative_mantissa() {
        assert_eq!(format_exponent(-0.0004, 6, 3), "-4.000000e-004");
    }

    #[test]
    fn test_exponent_width_includes_sign() {
        for &(value, digits) in &[(1e-5, 3), (1e5, 2), (1e-100, 3), (3.5, 1)] {
            let s = format_exponent(value, 6, digits);
            let exponent = s.rsplit('e').next().unwrap();
            assert_eq!(exponent.len(), digits + 1, "{s}");
            assert!(exponent.starts_with('+') || exponent.starts_with('-'));
        }
    }

    #[test]
    fn test_wide_exponent_not_truncated() {
        assert_eq!(format_exponent(1e-100, 1, 2), "1.0e-100");
    }
}
