//! Frame sources: where raw RGBA frames come from before filtering.

use std::path::Path;

use crate::error::{FilmError, Result};
use crate::frame::PixelBuffer;
use crate::image_io;

/// Delivers one raw frame per tick.
pub trait FrameSource {
    fn name(&self) -> &str;

    /// Negotiated (width, height) of delivered frames.
    fn resolution(&self) -> (usize, usize);

    /// Overwrite `frame` with the next raw frame, reshaping it if needed.
    fn next_frame(&mut self, frame: &mut PixelBuffer) -> Result<()>;
}

/// Re-delivers a still image every tick, letterboxed to the frame size.
pub struct StillImageSource {
    name: String,
    frame: PixelBuffer,
}

impl StillImageSource {
    pub fn open(path: &Path, width: usize, height: usize) -> Result<Self> {
        let img = image_io::load_image(path)?;
        let frame = image_io::letterbox_to_frame(&img, width as u32, height as u32);
        log::info!(
            "Opened still source {} ({}x{})",
            path.display(),
            frame.width(),
            frame.height()
        );
        Ok(Self::from_frame(
            path.file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_else(|| path.display().to_string()),
            frame,
        ))
    }

    pub fn from_frame(name: impl Into<String>, frame: PixelBuffer) -> Self {
        Self {
            name: name.into(),
            frame,
        }
    }
}

impl FrameSource for StillImageSource {
    fn name(&self) -> &str {
        &self.name
    }

    fn resolution(&self) -> (usize, usize) {
        (self.frame.width(), self.frame.height())
    }

    fn next_frame(&mut self, frame: &mut PixelBuffer) -> Result<()> {
        frame.clone_from(&self.frame);
        Ok(())
    }
}

// SMPTE-ish bar colours, left to right.
const BARS: [[u8; 3]; 7] = [
    [192, 192, 192],
    [192, 192, 0],
    [0, 192, 192],
    [0, 192, 0],
    [192, 0, 192],
    [192, 0, 0],
    [0, 0, 192],
];

/// Synthetic moving pattern: colour bars on top, a scrolling grey ramp below.
pub struct TestPatternSource {
    width: usize,
    height: usize,
    tick: usize,
}

impl TestPatternSource {
    pub fn new(width: usize, height: usize) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(FilmError::DeviceAccess(format!(
                "test pattern needs a non-empty resolution, got {width}x{height}"
            )));
        }
        Ok(Self {
            width,
            height,
            tick: 0,
        })
    }

    fn pixel_at(&self, x: usize, y: usize) -> [u8; 4] {
        if y < self.height * 2 / 3 {
            let [r, g, b] = BARS[x * BARS.len() / self.width];
            [r, g, b, 255]
        } else {
            let v = ((x + self.tick * 4) * 256 / self.width % 256) as u8;
            [v, v, v, 255]
        }
    }
}

impl FrameSource for TestPatternSource {
    fn name(&self) -> &str {
        "Test Pattern"
    }

    fn resolution(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    fn next_frame(&mut self, frame: &mut PixelBuffer) -> Result<()> {
        frame.reshape(self.width, self.height);
        for y in 0..self.height {
            for x in 0..self.width {
                frame.set_pixel(x, y, self.pixel_at(x, y));
            }
        }
        self.tick = self.tick.wrapping_add(1);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn still_source_repeats_its_frame() {
        let still = PixelBuffer::from_pixel(4, 2, [1, 2, 3, 4]);
        let mut source = StillImageSource::from_frame("still", still.clone());
        let mut frame = PixelBuffer::new(1, 1);

        source.next_frame(&mut frame).unwrap();
        frame.set_pixel(0, 0, [9, 9, 9, 9]);
        source.next_frame(&mut frame).unwrap();
        assert_eq!(frame, still);
        assert_eq!(source.resolution(), (4, 2));
    }

    #[test]
    fn test_pattern_fills_requested_resolution() {
        let mut source = TestPatternSource::new(70, 30).unwrap();
        let mut frame = PixelBuffer::default();
        source.next_frame(&mut frame).unwrap();

        assert_eq!((frame.width(), frame.height()), (70, 30));
        assert_eq!(frame.pixel(0, 0), [192, 192, 192, 255]);
        assert_eq!(frame.pixel(69, 0), [0, 0, 192, 255]);
    }

    #[test]
    fn test_pattern_ramp_scrolls() {
        let mut source = TestPatternSource::new(64, 12).unwrap();
        let mut first = PixelBuffer::default();
        let mut second = PixelBuffer::default();
        source.next_frame(&mut first).unwrap();
        source.next_frame(&mut second).unwrap();
        assert_ne!(first.pixel(10, 11), second.pixel(10, 11));
        assert_eq!(first.pixel(10, 0), second.pixel(10, 0));
    }

    #[test]
    fn empty_test_pattern_is_rejected() {
        assert!(matches!(
            TestPatternSource::new(0, 480),
            Err(FilmError::DeviceAccess(_))
        ));
    }
}
