use rand::Rng;

use super::to_byte;
use crate::frame::{CHANNELS, PixelBuffer};

/// Peak-to-peak noise amplitude, in channel units, at grain strength 1.0.
pub const GRAIN_SCALE: f64 = 40.0;

/// Noise offset for a uniform `sample` in [-0.5, 0.5).
pub fn grain_offset(sample: f64, strength: f64) -> f64 {
    sample * strength * GRAIN_SCALE
}

/// Add luminance grain: one draw per pixel, applied equally to R, G and B.
pub fn apply_grain<R: Rng>(frame: &mut PixelBuffer, strength: f64, rng: &mut R) {
    if !(strength > 0.0) {
        return;
    }
    for px in frame.as_raw_mut().chunks_exact_mut(CHANNELS) {
        let sample: f64 = rng.random_range(-0.5..0.5);
        let noise = grain_offset(sample, strength);
        for c in &mut px[..3] {
            *c = to_byte(*c as f64 + noise);
        }
    }
}
