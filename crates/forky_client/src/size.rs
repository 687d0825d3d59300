//! Slider position → file-size mapping.
//!
//! The slider is linear (0..=500) while the size spans 1 KB to 100 MB, so the
//! position is normalized, warped by a power of 1.5 and interpolated in log
//! space. The warp spends more of the track on small sizes.

use forky_constant::defaults::{MAX_SIZE_KB, MIN_SIZE_KB, SIZE_CURVE_EXPONENT, SLIDER_MAX};

/// Size in KB for a slider position. Positions above the maximum are clamped.
pub fn log_slider_to_size(position: u32) -> u64 {
    let position = position.min(SLIDER_MAX);
    let min_v = (MIN_SIZE_KB as f64).ln();
    let max_v = (MAX_SIZE_KB as f64).ln();

    let t = (f64::from(position) / f64::from(SLIDER_MAX)).powf(SIZE_CURVE_EXPONENT);
    (min_v + (max_v - min_v) * t).exp().round() as u64
}

/// Human label for a KB value: whole megabytes from 1024 KB up, whole kilobytes below.
pub fn format_size(size_kb: u64) -> String {
    if size_kb >= 1024 {
        format!("{}mb", (size_kb as f64 / 1024.0).round() as u64)
    } else {
        format!("{size_kb}kb")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoints() {
        assert_eq!(log_slider_to_size(0), 1);
        assert!(log_slider_to_size(500).abs_diff(102_400) <= 1);
    }

    #[test]
    fn non_decreasing_over_whole_track() {
        let mut previous = log_slider_to_size(0);
        for position in 1..=SLIDER_MAX {
            let current = log_slider_to_size(position);
            assert!(
                current >= previous,
                "f({position}) = {current} < f({}) = {previous}",
                position - 1
            );
            previous = current;
        }
    }

    #[test]
    fn favours_small_sizes() {
        // Half the track stays well under the geometric midpoint (320 KB).
        assert!(log_slider_to_size(250) < 320);
    }

    #[test]
    fn clamps_out_of_range_positions() {
        assert_eq!(log_slider_to_size(10_000), log_slider_to_size(500));
    }

    #[test]
    fn default_position_label() {
        // Fresh pages start at position 243.
        let kb = log_slider_to_size(243);
        assert_eq!(kb, 50);
        assert_eq!(format_size(kb), "50kb");
    }

    #[test]
    fn format_size_boundaries() {
        assert_eq!(format_size(1), "1kb");
        assert_eq!(format_size(1023), "1023kb");
        assert_eq!(format_size(1024), "1mb");
        assert_eq!(format_size(1535), "1mb");
        assert_eq!(format_size(1536), "2mb");
        assert_eq!(format_size(2048), "2mb");
        assert_eq!(format_size(102_400), "100mb");
    }
}
