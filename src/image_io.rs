use image::codecs::jpeg::JpegEncoder;
use image::{DynamicImage, ExtendedColorType, GenericImageView, RgbaImage};
use std::io::Cursor;
use std::path::Path;

use crate::error::{FilmError, Result};
use crate::frame::{CHANNELS, PixelBuffer};

pub const FILENAME_PREFIX: &str = "x100v";

pub fn load_image(path: &Path) -> Result<DynamicImage> {
    image::open(path)
        .map_err(|e| FilmError::DeviceAccess(format!("{}: {e}", path.display())))
}

/// Resize image to fit within the frame, preserving aspect ratio.
/// Letterboxes/pillarboxes remaining area with opaque black.
pub fn letterbox_to_frame(img: &DynamicImage, frame_w: u32, frame_h: u32) -> PixelBuffer {
    let (iw, ih) = img.dimensions();
    if iw == 0 || ih == 0 || frame_w == 0 || frame_h == 0 {
        return PixelBuffer::new(frame_w as usize, frame_h as usize);
    }
    let scale = f64::min(frame_w as f64 / iw as f64, frame_h as f64 / ih as f64);
    let new_w = ((iw as f64 * scale).round() as u32).clamp(1, frame_w);
    let new_h = ((ih as f64 * scale).round() as u32).clamp(1, frame_h);

    let resized = img
        .resize_exact(new_w, new_h, image::imageops::FilterType::Triangle)
        .to_rgba8();

    let mut output = RgbaImage::from_pixel(frame_w, frame_h, image::Rgba([0, 0, 0, 255]));
    let offset_x = (frame_w - new_w) / 2;
    let offset_y = (frame_h - new_h) / 2;
    image::imageops::overlay(&mut output, &resized, offset_x as i64, offset_y as i64);
    output.into()
}

/// Encode a frame as JPEG. Alpha is dropped.
pub fn encode_jpeg(frame: &PixelBuffer, quality: u8) -> Result<Vec<u8>> {
    let rgb: Vec<u8> = frame
        .as_raw()
        .chunks_exact(CHANNELS)
        .flat_map(|px| &px[..3])
        .copied()
        .collect();

    let mut buf = Cursor::new(Vec::new());
    let mut encoder = JpegEncoder::new_with_quality(&mut buf, quality);
    encoder.encode(
        &rgb,
        frame.width() as u32,
        frame.height() as u32,
        ExtendedColorType::Rgb8,
    )?;
    Ok(buf.into_inner())
}

/// `x100v-<unix-millis>.jpg`
pub fn capture_filename(unix_millis: u128) -> String {
    format!("{FILENAME_PREFIX}-{unix_millis}.jpg")
}

pub fn unix_millis() -> u128 {
    web_time::SystemTime::now()
        .duration_since(web_time::UNIX_EPOCH)
        .map(|d| d.as_millis())
        .unwrap_or_default()
}

pub fn save_bytes(bytes: &[u8], path: &Path) -> Result<()> {
    std::fs::write(path, bytes)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn filename_uses_prefix_and_timestamp() {
        assert_eq!(capture_filename(1_700_000_000_123), "x100v-1700000000123.jpg");
    }

    #[test]
    fn jpeg_output_has_soi_marker_and_decodes() {
        let frame = PixelBuffer::from_pixel(16, 8, [200, 40, 90, 255]);
        let bytes = encode_jpeg(&frame, 95).unwrap();
        assert_eq!(&bytes[..2], &[0xFF, 0xD8]);

        let decoded = image::load_from_memory(&bytes).unwrap();
        assert_eq!(decoded.dimensions(), (16, 8));
    }

    #[test]
    fn letterbox_pads_wide_frames() {
        let img = DynamicImage::ImageRgba8(RgbaImage::from_pixel(
            10,
            10,
            image::Rgba([255, 255, 255, 255]),
        ));
        let frame = letterbox_to_frame(&img, 40, 20);
        assert_eq!((frame.width(), frame.height()), (40, 20));
        assert_eq!(frame.pixel(0, 10), [0, 0, 0, 255]);
        let centre = frame.pixel(20, 10);
        assert!(centre[..3].iter().all(|&c| c >= 250), "{centre:?}");
    }

    #[test]
    fn missing_file_is_a_device_error() {
        let err = load_image(Path::new("/definitely/not/here.png")).unwrap_err();
        assert!(matches!(err, FilmError::DeviceAccess(_)));
    }
}
