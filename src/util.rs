//! Small numeric and formatting helpers shared by the driver and estimator.

/// Rounds `x` to `n` significant figures.
///
/// Undefined for `x == 0` (the magnitude has no leading figure).
///
/// # Examples
///
/// ```
/// use anneal::round_figures;
///
/// assert_eq!(round_figures(1234.0, 2), 1200.0);
/// assert_eq!(round_figures(0.01234, 3), 0.0123);
/// ```
pub fn round_figures(x: f64, n: i32) -> f64 {
    debug_assert!(x != 0.0, "round_figures is undefined for zero");
    let digits = n - x.abs().log10().ceil() as i32;
    let factor = 10f64.powi(digits);
    (x * factor).round() / factor
}

/// Formats a duration in seconds as `HHHH:MM:SS`.
///
/// Hours are right-aligned in a field of width 4; minutes and seconds are
/// zero-padded to 2. Seconds are rounded to the nearest whole second.
pub fn time_string(seconds: f64) -> String {
    let s = seconds.round() as u64;
    let (h, s) = (s / 3600, s % 3600);
    let (m, s) = (s / 60, s % 60);
    format!("{h:4}:{m:02}:{s:02}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_figures_above_one() {
        assert_eq!(round_figures(1234.0, 2), 1200.0);
        assert_eq!(round_figures(1254.0, 2), 1300.0);
        assert_eq!(round_figures(987_654.0, 3), 988_000.0);
    }

    #[test]
    fn test_round_figures_below_one() {
        assert!((round_figures(0.01234, 3) - 0.0123).abs() < 1e-15);
        assert!((round_figures(0.09876, 2) - 0.099).abs() < 1e-15);
    }

    #[test]
    fn test_round_figures_negative() {
        assert_eq!(round_figures(-1234.0, 2), -1200.0);
    }

    #[test]
    fn test_round_figures_exact_power_of_ten() {
        assert_eq!(round_figures(1000.0, 2), 1000.0);
    }

    #[test]
    fn test_time_string_padding() {
        assert_eq!(time_string(3661.0), "   0:01:01");
        assert_eq!(time_string(0.0), "   0:00:00");
    }

    #[test]
    fn test_time_string_rounds_to_nearest_second() {
        assert_eq!(time_string(59.6), "   0:01:00");
        assert_eq!(time_string(59.4), "   0:00:59");
    }

    #[test]
    fn test_time_string_wide_hours() {
        assert_eq!(time_string(10.0 * 3600.0), "  10:00:00");
        assert_eq!(time_string(1234.0 * 3600.0 + 5.0 * 60.0), "1234:05:00");
    }
}
