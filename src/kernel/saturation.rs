use super::clamp_channel;

/// Scale each channel's distance from the pixel's channel mean by `amount`.
pub fn saturate(rgb: [f64; 3], amount: f64) -> [f64; 3] {
    let avg = (rgb[0] + rgb[1] + rgb[2]) / 3.0;
    rgb.map(|v| clamp_channel(avg + (v - avg) * amount))
}
