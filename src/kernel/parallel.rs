//! Threshold-based dispatch between rayon and a plain loop.

use crate::frame::CHANNELS;

/// Frames smaller than this are processed on the calling thread.
pub const PARALLEL_THRESHOLD: usize = 64 * 1024;

pub fn worth_parallelizing(pixels: usize) -> bool {
    cfg!(not(target_arch = "wasm32")) && pixels >= PARALLEL_THRESHOLD
}

/// Run `f` on every RGBA pixel of `data`.
pub fn for_each_pixel<F>(data: &mut [u8], parallel: bool, f: F)
where
    F: Fn(&mut [u8]) + Sync + Send,
{
    if parallel {
        par_for_each_chunk(data, CHANNELS, |_, px| f(px));
    } else {
        data.chunks_exact_mut(CHANNELS).for_each(f);
    }
}

/// Run `f(y, row)` on every row of `data`, where a row is `row_len` elements.
pub fn for_each_row<T, F>(data: &mut [T], row_len: usize, parallel: bool, f: F)
where
    T: Send,
    F: Fn(usize, &mut [T]) + Sync + Send,
{
    if row_len == 0 {
        return;
    }
    if parallel {
        par_for_each_chunk(data, row_len, f);
    } else {
        data.chunks_exact_mut(row_len)
            .enumerate()
            .for_each(|(y, row)| f(y, row));
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn par_for_each_chunk<T, F>(data: &mut [T], chunk_len: usize, f: F)
where
    T: Send,
    F: Fn(usize, &mut [T]) + Sync + Send,
{
    use rayon::prelude::*;

    data.par_chunks_exact_mut(chunk_len)
        .enumerate()
        .for_each(|(i, chunk)| f(i, chunk));
}

// No thread pool on the web; fall back to the calling thread.
#[cfg(target_arch = "wasm32")]
fn par_for_each_chunk<T, F>(data: &mut [T], chunk_len: usize, f: F)
where
    T: Send,
    F: Fn(usize, &mut [T]) + Sync + Send,
{
    data.chunks_exact_mut(chunk_len)
        .enumerate()
        .for_each(|(i, chunk)| f(i, chunk));
}
