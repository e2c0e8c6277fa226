use super::clamp_channel;

/// Channel value above which highlights are compressed.
pub const ROLLOFF_THRESHOLD: f64 = 215.0;
/// Fraction of the excess above the threshold that survives.
pub const ROLLOFF_FACTOR: f64 = 0.35;

/// Two-stage power curve: `shadow` shapes the toe, `highlight` the shoulder.
///
/// `shadow > 1` darkens shadows, `highlight > 1` compresses highlights.
/// The result is rounded to a whole channel value.
pub fn tone_curve(v: f64, shadow: f64, highlight: f64) -> f64 {
    let x = clamp_channel(v) / 255.0;
    let s = x.powf(shadow);
    let h = 1.0 - (1.0 - s).powf(highlight);
    clamp_channel((h * 255.0).round())
}

/// Soft shoulder above [`ROLLOFF_THRESHOLD`]; identity below it.
pub fn rolloff(v: f64) -> f64 {
    if v >= ROLLOFF_THRESHOLD {
        ROLLOFF_THRESHOLD + (v - ROLLOFF_THRESHOLD) * ROLLOFF_FACTOR
    } else {
        v
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoints_are_fixed() {
        for (shadow, highlight) in [(1.4, 1.2), (0.8, 0.9), (2.0, 0.5)] {
            assert_eq!(tone_curve(0.0, shadow, highlight), 0.0);
            assert_eq!(tone_curve(255.0, shadow, highlight), 255.0);
        }
    }

    #[test]
    fn unit_exponents_only_round() {
        assert_eq!(tone_curve(100.0, 1.0, 1.0), 100.0);
        assert_eq!(tone_curve(100.3, 1.0, 1.0), 100.0);
        assert_eq!(tone_curve(100.7, 1.0, 1.0), 101.0);
    }

    #[test]
    fn velvia_curve_midtones() {
        assert_eq!(tone_curve(128.0, 1.4, 1.2), 112.0);
        assert_eq!(tone_curve(64.0, 1.4, 1.2), 44.0);
    }

    #[test]
    fn curve_is_monotonic() {
        let mut prev = 0.0;
        for v in 0..=255 {
            let out = tone_curve(v as f64, 1.3, 1.25);
            assert!(out >= prev, "{v}: {out} < {prev}");
            prev = out;
        }
    }

    #[test]
    fn shadow_exponent_darkens_and_highlight_exponent_lifts() {
        assert!(tone_curve(80.0, 1.5, 1.0) < 80.0);
        assert!(tone_curve(80.0, 1.0, 1.5) > 80.0);
    }

    #[test]
    fn degenerate_exponents_stay_in_range() {
        for v in [0.0, 1.0, 128.0, 254.0, 255.0] {
            let out = tone_curve(v, -2.0, 0.3);
            assert!((0.0..=255.0).contains(&out), "{v} -> {out}");
        }
    }

    #[test]
    fn rolloff_compresses_only_above_threshold() {
        assert_eq!(rolloff(0.0), 0.0);
        assert_eq!(rolloff(214.0), 214.0);
        assert_eq!(rolloff(215.0), 215.0);
        assert_eq!(rolloff(235.0), 222.0);
        assert_eq!(rolloff(255.0), 229.0);
    }
}
