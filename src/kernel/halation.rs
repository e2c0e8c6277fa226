use super::{parallel, to_byte};
use crate::frame::{CHANNELS, PixelBuffer};

/// Half-width of the square neighbourhood (5x5).
pub const HALATION_RADIUS: usize = 2;

/// Simulate halation: light from bright red regions bleeds into darker neighbours.
///
/// - `strength`: 0.0 (or less) disables the stage entirely; 1.0 adds the full
///   difference between the neighbourhood red mean and the pixel's own red.
///
/// Neighbourhood means are taken from a snapshot of the red channel made before
/// any pixel is touched. Out-of-bounds neighbours are excluded from both sum and
/// count. Only red is written.
pub fn apply_halation(frame: &mut PixelBuffer, strength: f64) {
    if !(strength > 0.0) || frame.is_empty() {
        return;
    }

    let width = frame.width();
    let height = frame.height();
    let parallel = parallel::worth_parallelizing(width * height);

    let red: Vec<u8> = frame
        .as_raw()
        .chunks_exact(CHANNELS)
        .map(|px| px[0])
        .collect();

    // Horizontal window sums; the vertical pass adds these up per column.
    let mut row_sums = vec![0u32; width * height];
    parallel::for_each_row(&mut row_sums, width, parallel, |y, sums| {
        let row = &red[y * width..(y + 1) * width];
        for (x, sum) in sums.iter_mut().enumerate() {
            let (x0, x1) = window(x, width);
            *sum = row[x0..=x1].iter().map(|&v| v as u32).sum();
        }
    });

    parallel::for_each_row(frame.as_raw_mut(), width * CHANNELS, parallel, |y, row| {
        let (y0, y1) = window(y, height);
        let rows = y1 - y0 + 1;
        for x in 0..width {
            let (x0, x1) = window(x, width);
            let count = rows * (x1 - x0 + 1);
            let sum: u32 = (y0..=y1).map(|ny| row_sums[ny * width + x]).sum();

            let avg = sum as f64 / count as f64;
            let base = red[y * width + x] as f64;
            let glow = (avg - base).max(0.0) * strength;
            row[x * CHANNELS] = to_byte(base + glow);
        }
    });
}

/// Inclusive in-bounds window around `i` for an axis of length `len` (> 0).
fn window(i: usize, len: usize) -> (usize, usize) {
    (
        i.saturating_sub(HALATION_RADIUS),
        (i + HALATION_RADIUS).min(len - 1),
    )
}
