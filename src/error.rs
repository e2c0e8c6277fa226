use thiserror::Error;

/// Everything that can go wrong outside the filter kernel.
#[derive(Debug, Error)]
pub enum FilmError {
    #[error("Frame source unavailable: {0}")]
    DeviceAccess(String),
    #[error("Unknown preset: {0}")]
    UnknownPreset(String),
    #[error("Unknown parameter: {0}")]
    UnknownParameter(String),
    #[error("No frame has been captured yet")]
    NoCapture,
    #[error("Image encoding failed: {0}")]
    Encode(#[from] image::ImageError),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, FilmError>;
