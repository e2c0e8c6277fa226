//! Per-frame film simulation kernel.
//!
//! Stages run in a fixed order: colour matrix, tone curve, highlight rolloff and
//! saturation per pixel, then halation over the whole frame, then grain.

pub mod grain;
pub mod halation;
pub mod matrix;
mod parallel;
pub mod saturation;
pub mod tone;

use rand::Rng;

use crate::film::{ActiveSettings, ColorMatrix};
use crate::frame::PixelBuffer;

/// Filter one frame in place.
///
/// Deterministic apart from the grain stage, which draws from `rng`.
pub fn filter<R: Rng>(frame: &mut PixelBuffer, settings: &ActiveSettings, rng: &mut R) {
    if frame.is_empty() {
        return;
    }
    develop(frame, settings);
    // Halation needs the complete developed frame, so it starts after every pixel is done.
    halation::apply_halation(frame, settings.halation);
    grain::apply_grain(frame, settings.grain, rng);
}

/// Stages 1-4 over every pixel. Pixels are independent of each other.
pub fn develop(frame: &mut PixelBuffer, settings: &ActiveSettings) {
    let m = matrix::warm(&settings.color_matrix, settings.warmth);
    let parallel = parallel::worth_parallelizing(frame.width() * frame.height());
    parallel::for_each_pixel(frame.as_raw_mut(), parallel, |px| {
        develop_with(px, &m, settings)
    });
}

/// Stages 1-4 for a single RGBA pixel. Alpha is left alone.
pub fn develop_pixel(px: &mut [u8], settings: &ActiveSettings) {
    develop_with(px, &matrix::warm(&settings.color_matrix, settings.warmth), settings);
}

fn develop_with(px: &mut [u8], m: &ColorMatrix, settings: &ActiveSettings) {
    let rgb = [px[0] as f64, px[1] as f64, px[2] as f64];

    let mixed = matrix::mix(rgb, m);
    let toned = mixed.map(|v| {
        let v = tone::tone_curve(v, settings.shadow_curve, settings.highlight_curve);
        tone::rolloff(v)
    });
    let saturated = saturation::saturate(toned, settings.saturation);

    for (dst, v) in px.iter_mut().zip(saturated) {
        *dst = to_byte(v);
    }
}

/// Clamp to the 8-bit channel range. NaN maps to 0.
pub(crate) fn clamp_channel(v: f64) -> f64 {
    if v.is_nan() { 0.0 } else { v.clamp(0.0, 255.0) }
}

/// Round half away from zero, then clamp.
pub(crate) fn to_byte(v: f64) -> u8 {
    clamp_channel(v.round()) as u8
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::film::{FilmPresetId, Parameter, PresetStore};
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn settings_for(preset: FilmPresetId) -> ActiveSettings {
        let mut store = PresetStore::new(preset);
        store.set(Parameter::Grain, 0.0);
        store.set(Parameter::Halation, 0.0);
        store.active_settings()
    }

    /// Deterministic pseudo-random frame without touching an RNG.
    fn noise_frame(width: usize, height: usize) -> PixelBuffer {
        let data = (0..width * height * 4)
            .map(|i| ((i * 2654435761usize) >> 7) as u8)
            .collect();
        PixelBuffer::from_raw(width, height, data).unwrap()
    }

    #[test]
    fn white_pixel_under_velvia() {
        let settings = settings_for(FilmPresetId::Velvia);
        let mut frame = PixelBuffer::from_pixel(1, 1, [255, 255, 255, 255]);
        filter(&mut frame, &settings, &mut StdRng::seed_from_u64(1));
        assert_eq!(frame.pixel(0, 0), [229, 229, 229, 255]);
    }

    #[test]
    fn default_store_renders_white_deterministically() {
        let settings = PresetStore::default().active_settings();
        for seed in [1, 2, 3] {
            let mut frame = PixelBuffer::from_pixel(1, 1, [255, 255, 255, 255]);
            filter(&mut frame, &settings, &mut StdRng::seed_from_u64(seed));
            assert_eq!(frame.pixel(0, 0), [229, 229, 229, 255], "seed {seed}");
        }
    }

    #[test]
    fn warmth_shifts_grey_towards_red() {
        let mut settings = ActiveSettings::default();
        settings.warmth = 0.2;
        let mut frame = PixelBuffer::from_pixel(2, 1, [100, 100, 100, 255]);
        filter(&mut frame, &settings, &mut StdRng::seed_from_u64(0));
        assert_eq!(frame.pixel(1, 0), [104, 100, 98, 255]);

        settings.warmth = 0.0;
        let mut frame = PixelBuffer::from_pixel(2, 1, [100, 100, 100, 255]);
        filter(&mut frame, &settings, &mut StdRng::seed_from_u64(0));
        assert_eq!(frame.pixel(1, 0), [100, 100, 100, 255]);
    }

    #[test]
    fn black_pixel_stays_black_for_every_preset() {
        for &preset in FilmPresetId::ALL {
            let settings = settings_for(preset);
            let mut frame = PixelBuffer::from_pixel(2, 2, [0, 0, 0, 42]);
            filter(&mut frame, &settings, &mut StdRng::seed_from_u64(7));
            assert_eq!(frame, PixelBuffer::from_pixel(2, 2, [0, 0, 0, 42]), "{preset}");
        }
    }

    #[test]
    fn alpha_is_preserved() {
        let original = noise_frame(17, 9);
        for &preset in FilmPresetId::ALL {
            let mut frame = original.clone();
            let settings: ActiveSettings = preset.config().into();
            filter(&mut frame, &settings, &mut StdRng::seed_from_u64(3));
            for (after, before) in frame
                .as_raw()
                .chunks_exact(4)
                .zip(original.as_raw().chunks_exact(4))
            {
                assert_eq!(after[3], before[3], "{preset}");
            }
        }
    }

    #[test]
    fn filter_without_grain_is_deterministic() {
        let mut settings = settings_for(FilmPresetId::ClassicNeg);
        settings.halation = 0.6;
        let mut a = noise_frame(20, 12);
        let mut b = a.clone();
        filter(&mut a, &settings, &mut StdRng::seed_from_u64(1));
        filter(&mut b, &settings, &mut StdRng::seed_from_u64(99));
        assert_eq!(a, b);
    }

    #[test]
    fn zero_halation_leaves_developed_red_alone() {
        let settings = settings_for(FilmPresetId::Eterna);
        let mut filtered = noise_frame(11, 7);
        let mut developed = filtered.clone();
        filter(&mut filtered, &settings, &mut StdRng::seed_from_u64(5));
        develop(&mut developed, &settings);
        assert_eq!(filtered, developed);
    }

    #[test]
    fn extreme_overrides_stay_in_range() {
        let mut settings = settings_for(FilmPresetId::Velvia);
        settings.saturation = 40.0;
        settings.shadow_curve = -3.0;
        settings.highlight_curve = 0.01;
        settings.color_matrix = [[f64::INFINITY, -9.0, 0.0], [0.0, f64::NAN, 0.0], [5.0, 5.0, 5.0]];
        settings.halation = 7.0;
        settings.grain = 3.0;
        let original = noise_frame(9, 9);
        let mut frame = original.clone();
        filter(&mut frame, &settings, &mut StdRng::seed_from_u64(11));
        // u8 storage bounds every value; the point is that nothing panics and alpha survives.
        for (after, before) in frame
            .as_raw()
            .chunks_exact(4)
            .zip(original.as_raw().chunks_exact(4))
        {
            assert_eq!(after[3], before[3]);
        }
    }

    #[test]
    fn empty_frames_are_a_no_op() {
        let settings: ActiveSettings = FilmPresetId::Velvia.config().into();
        let mut rng = StdRng::seed_from_u64(0);
        for (w, h) in [(0, 0), (0, 8), (8, 0)] {
            let mut frame = PixelBuffer::new(w, h);
            filter(&mut frame, &settings, &mut rng);
            assert_eq!(frame, PixelBuffer::new(w, h));
        }
    }

    #[test]
    fn parallel_develop_matches_per_pixel_path() {
        let settings = settings_for(FilmPresetId::Pro400h);
        let original = noise_frame(400, 300);
        let mut frame = original.clone();
        develop(&mut frame, &settings);

        let mut expected = original.into_raw();
        for px in expected.chunks_exact_mut(4) {
            develop_pixel(px, &settings);
        }
        assert_eq!(frame.as_raw(), &expected[..]);
    }

    #[test]
    fn to_byte_rounds_half_away_from_zero() {
        assert_eq!(to_byte(228.5), 229);
        assert_eq!(to_byte(227.5), 228);
        assert_eq!(to_byte(-0.4), 0);
        assert_eq!(to_byte(300.0), 255);
        assert_eq!(to_byte(f64::NAN), 0);
    }
}
