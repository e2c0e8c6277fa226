use super::clamp_channel;
use crate::film::ColorMatrix;

/// Red gain per unit of warmth, as a fraction of full scale.
pub const WARMTH_RED_GAIN: f64 = 50.0 / 255.0;
/// Blue cut per unit of warmth.
pub const WARMTH_BLUE_CUT: f64 = 30.0 / 255.0;

/// Fold warmth into the matrix by scaling the red and blue output rows.
///
/// Scaling keeps black at black. Zero warmth returns `m` unchanged.
pub fn warm(m: &ColorMatrix, warmth: f64) -> ColorMatrix {
    let [r, g, b] = *m;
    let red_gain = 1.0 + warmth * WARMTH_RED_GAIN;
    let blue_gain = 1.0 - warmth * WARMTH_BLUE_CUT;
    [r.map(|c| c * red_gain), g, b.map(|c| c * blue_gain)]
}

/// Mix (R, G, B) through a row-major matrix. Each output is clamped to [0, 255].
pub fn mix(rgb: [f64; 3], m: &ColorMatrix) -> [f64; 3] {
    m.map(|row| clamp_channel(row[0] * rgb[0] + row[1] * rgb[1] + row[2] * rgb[2]))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::film::IDENTITY_MATRIX;

    #[test]
    fn identity_passes_through() {
        assert_eq!(mix([12.0, 130.0, 250.0], &IDENTITY_MATRIX), [12.0, 130.0, 250.0]);
    }

    #[test]
    fn rows_mix_all_inputs() {
        let m = [[0.5, 0.5, 0.0], [0.0, 0.0, 1.0], [0.25, 0.25, 0.5]];
        assert_eq!(mix([100.0, 200.0, 40.0], &m), [150.0, 40.0, 95.0]);
    }

    #[test]
    fn outputs_clamp_independently() {
        let m = [[1.2, 0.0, 0.0], [-1.0, 0.0, 0.0], [0.0, 1.0, 0.0]];
        assert_eq!(mix([250.0, 60.0, 0.0], &m), [255.0, 0.0, 60.0]);
    }

    #[test]
    fn zero_warmth_is_neutral() {
        let m = [[1.1, -0.05, -0.05], [-0.05, 1.05, 0.0], [-0.05, 0.0, 1.1]];
        assert_eq!(warm(&m, 0.0), m);
    }

    #[test]
    fn warmth_raises_red_and_lowers_blue() {
        let warmed = mix([255.0, 128.0, 255.0], &warm(&IDENTITY_MATRIX, 0.5));
        assert_eq!(warmed[1], 128.0);
        assert_eq!(warmed[0], 255.0);
        assert!((warmed[2] - 240.0).abs() < 1e-9);

        let warmed = mix([100.0; 3], &warm(&IDENTITY_MATRIX, 0.5));
        assert!(warmed[0] > 100.0 && warmed[2] < 100.0);

        let cooled = mix([100.0; 3], &warm(&IDENTITY_MATRIX, -0.5));
        assert!(cooled[0] < 100.0 && cooled[2] > 100.0);
    }

    #[test]
    fn zero_vector_maps_to_zero() {
        let m = [[1.1, -0.05, -0.05], [-0.05, 1.05, 0.0], [-0.05, 0.0, 1.1]];
        assert_eq!(mix([0.0; 3], &m), [0.0; 3]);
    }
}
