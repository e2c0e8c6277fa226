use rand::Rng;

use crate::error::{FilmError, Result};
use crate::film::PresetStore;
use crate::frame::PixelBuffer;
use crate::image_io;
use crate::kernel;
use crate::source::FrameSource;

/// Runtime settings for the live feed.
#[derive(Debug, Clone)]
pub struct FeedConfig {
    pub frame_width: usize,
    pub frame_height: usize,
    pub jpeg_quality: u8,
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            frame_width: 1280,
            frame_height: 720,
            jpeg_quality: 95,
        }
    }
}

/// A capture encoded for download.
#[derive(Debug, Clone)]
pub struct ExportedCapture {
    pub filename: String,
    pub bytes: Vec<u8>,
}

/// Drives one frame source through the kernel, one frame per tick.
pub struct FrameLoop {
    config: FeedConfig,
    source: Option<Box<dyn FrameSource>>,
    frame: PixelBuffer,
    capture: Option<PixelBuffer>,
    frames_processed: u64,
    last_frame_ms: f64,
}

impl FrameLoop {
    pub fn new(config: FeedConfig) -> Self {
        Self {
            config,
            source: None,
            frame: PixelBuffer::default(),
            capture: None,
            frames_processed: 0,
            last_frame_ms: 0.0,
        }
    }

    pub fn config(&self) -> &FeedConfig {
        &self.config
    }

    /// Replace the current source. The previous one is dropped.
    pub fn start(&mut self, source: Box<dyn FrameSource>) {
        let (w, h) = source.resolution();
        log::info!("Starting feed from {} at {w}x{h}", source.name());
        self.source = Some(source);
    }

    pub fn stop(&mut self) {
        if let Some(source) = self.source.take() {
            log::info!("Stopped feed from {}", source.name());
        }
    }

    pub fn is_running(&self) -> bool {
        self.source.is_some()
    }

    pub fn source_name(&self) -> Option<&str> {
        self.source.as_deref().map(|s| s.name())
    }

    /// Pull, filter and keep one frame.
    ///
    /// Returns `Ok(false)` when no source is running. A failing source is
    /// stopped and its error returned; it is not retried.
    pub fn tick<R: Rng>(&mut self, store: &PresetStore, rng: &mut R) -> Result<bool> {
        let Some(source) = self.source.as_mut() else {
            return Ok(false);
        };

        if let Err(e) = source.next_frame(&mut self.frame) {
            log::warn!("Frame source failed: {e}");
            self.stop();
            return Err(e);
        }

        let start = web_time::Instant::now();
        let settings = store.active_settings();
        kernel::filter(&mut self.frame, &settings, rng);
        self.last_frame_ms = start.elapsed().as_secs_f64() * 1000.0;
        self.frames_processed += 1;

        log::debug!(
            "Frame {} filtered in {:.1}ms",
            self.frames_processed,
            self.last_frame_ms
        );
        Ok(true)
    }

    /// Most recent filtered frame.
    pub fn frame(&self) -> &PixelBuffer {
        &self.frame
    }

    pub fn frames_processed(&self) -> u64 {
        self.frames_processed
    }

    pub fn last_frame_ms(&self) -> f64 {
        self.last_frame_ms
    }

    /// Freeze the current filtered frame for export.
    pub fn capture(&mut self) -> Result<&PixelBuffer> {
        if self.frames_processed == 0 || self.frame.is_empty() {
            return Err(FilmError::NoCapture);
        }
        log::info!(
            "Captured {}x{} frame",
            self.frame.width(),
            self.frame.height()
        );
        Ok(self.capture.insert(self.frame.clone()))
    }

    pub fn captured(&self) -> Option<&PixelBuffer> {
        self.capture.as_ref()
    }

    /// Encode the last capture as JPEG with a timestamped filename.
    pub fn export_capture(&self) -> Result<ExportedCapture> {
        let capture = self.capture.as_ref().ok_or(FilmError::NoCapture)?;
        let bytes = image_io::encode_jpeg(capture, self.config.jpeg_quality)?;
        let filename = image_io::capture_filename(image_io::unix_millis());
        log::info!("Exported {filename} ({} bytes)", bytes.len());
        Ok(ExportedCapture { filename, bytes })
    }
}
