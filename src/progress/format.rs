//! Human-readable byte sizes using binary (1024-based) units.

const UNITS: [&str; 8] = ["", "Ki", "Mi", "Gi", "Ti", "Pi", "Ei", "Zi"];

/// Unit used once every entry of [`UNITS`] has been exhausted.
const OVERFLOW_UNIT: &str = "Yi";

/// Formats a byte count as `"{value:.1}{unit}B"`, e.g. `1536.0` → `"1.5KiB"`.
///
/// Negative and fractional values go through the same scaling loop.
#[must_use]
pub fn format_size(bytes: f64) -> String {
    let mut value = bytes;
    for unit in UNITS {
        if value.abs() < 1024.0 {
            return format!("{value:.1}{unit}B");
        }
        value /= 1024.0;
    }
    format!("{value:.1}{OVERFLOW_UNIT}B")
}

/// Formats an integral byte count. See [`format_size`].
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn format_bytes(bytes: u64) -> String {
    format_size(bytes as f64)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_bytes_below_one_kib() {
        assert_eq!(format_bytes(0), "0.0B");
        assert_eq!(format_bytes(1), "1.0B");
        assert_eq!(format_bytes(1023), "1023.0B");
    }

    #[test]
    fn test_format_bytes_binary_units() {
        assert_eq!(format_bytes(1024), "1.0KiB");
        assert_eq!(format_bytes(1536), "1.5KiB");
        assert_eq!(format_bytes(1024 * 1024), "1.0MiB");
        assert_eq!(format_bytes(10 * 1024 * 1024), "10.0MiB");
        assert_eq!(format_bytes(1024 * 1024 * 1024), "1.0GiB");
    }

    #[test]
    fn test_format_bytes_rounds_to_one_digit() {
        // 1126 / 1024 = 1.0996...
        assert_eq!(format_bytes(1126), "1.1KiB");
        // Just under the next unit stays in the current one.
        assert_eq!(format_bytes(1024 * 1024 - 1), "1024.0KiB");
    }

    #[test]
    fn test_format_size_negative_values() {
        assert_eq!(format_size(-1.0), "-1.0B");
        assert_eq!(format_size(-2048.0), "-2.0KiB");
    }

    #[test]
    fn test_format_size_exhausted_units_fall_back_to_yi() {
        let yobi = 1024f64.powi(8);
        assert_eq!(format_size(yobi), "1.0YiB");
        assert_eq!(format_size(yobi * 2048.0), "2048.0YiB");
    }

    #[test]
    fn test_format_bytes_u64_max() {
        assert_eq!(format_bytes(u64::MAX), "16.0EiB");
    }
}
