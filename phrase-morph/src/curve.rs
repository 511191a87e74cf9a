/// Layer opacity in percent for morph progress `fraction`.
///
/// A power curve below 1 makes the incoming phrase surface quickly and then
/// settle, instead of a linear fade.
pub fn opacity(fraction: f32, exponent: f32) -> f32 {
    let fraction = fraction.clamp(0.0, 1.0);

    (fraction.powf(exponent) * 100.0).clamp(0.0, 100.0)
}

/// Blur radius for morph progress `fraction`: `scale / fraction - scale`,
/// capped at `max`. Infinite at 0, zero at 1.
pub fn blur(fraction: f32, scale: f32, max: f32) -> f32 {
    if fraction <= 0.0 || fraction.is_nan() {
        return max;
    }

    (scale / fraction.min(1.0) - scale).clamp(0.0, max)
}

/// Share of glyphs a cell renderer smears for a given blur radius.
///
/// `blur / (blur + scale)`, so an uncapped blur at progress `f` dissolves
/// `1 - f` of the glyphs.
pub fn dissolve(blur: f32, scale: f32) -> f32 {
    if blur <= 0.0 {
        return 0.0;
    }

    if scale <= 0.0 {
        return 1.0;
    }

    (blur / (blur + scale)).clamp(0.0, 1.0)
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    fn assert_monotonic(f: impl Fn(f32) -> f32, rising: bool) {
        let mut prev = f(0.0);

        for i in 1..=100 {
            let t = i as f32 / 100.0;
            let val = f(t);

            if rising {
                assert!(val >= prev - 1e-4, "not rising at t={t}: {prev} > {val}");
            } else {
                assert!(val <= prev + 1e-4, "not falling at t={t}: {prev} < {val}");
            }

            prev = val;
        }
    }

    #[rstest]
    #[case(0.0, 0.0)]
    #[case(1.0, 100.0)]
    #[case(0.5, 75.785)]
    fn opacity_reference_points(#[case] fraction: f32, #[case] expected: f32) {
        assert!((opacity(fraction, 0.4) - expected).abs() < 0.01, "{}", opacity(fraction, 0.4));
    }

    #[test]
    fn opacity_is_clamped() {
        assert_eq!(opacity(-3.0, 0.4), 0.0);
        assert_eq!(opacity(7.0, 0.4), 100.0);
    }

    #[test]
    fn opacity_rises_blur_falls() {
        assert_monotonic(|t| opacity(t, 0.4), true);
        assert_monotonic(|t| blur(t, 8.0, 100.0), false);
    }

    #[rstest]
    #[case(0.0, 100.0)]
    #[case(0.05, 100.0)]
    #[case(0.5, 8.0)]
    #[case(1.0, 0.0)]
    fn blur_reference_points(#[case] fraction: f32, #[case] expected: f32) {
        assert!((blur(fraction, 8.0, 100.0) - expected).abs() < 1e-4);
    }

    #[test]
    fn dissolve_tracks_progress() {
        assert_eq!(dissolve(0.0, 8.0), 0.0);
        assert!((dissolve(8.0, 8.0) - 0.5).abs() < 1e-6);
        assert!(dissolve(100.0, 8.0) > 0.9);
    }
}
