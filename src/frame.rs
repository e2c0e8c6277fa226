use image::RgbaImage;

pub const CHANNELS: usize = 4;

/// Row-major RGBA8 frame, channels interleaved.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PixelBuffer {
    width: usize,
    height: usize,
    data: Vec<u8>,
}

impl PixelBuffer {
    /// Opaque black frame.
    pub fn new(width: usize, height: usize) -> Self {
        Self::from_pixel(width, height, [0, 0, 0, 255])
    }

    pub fn from_pixel(width: usize, height: usize, pixel: [u8; 4]) -> Self {
        let data = pixel
            .iter()
            .copied()
            .cycle()
            .take(width * height * CHANNELS)
            .collect();
        Self {
            width,
            height,
            data,
        }
    }

    /// Wrap raw RGBA bytes. Returns `None` if the length does not match the dimensions.
    pub fn from_raw(width: usize, height: usize, data: Vec<u8>) -> Option<Self> {
        (data.len() == width * height * CHANNELS).then_some(Self {
            width,
            height,
            data,
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    pub fn as_raw(&self) -> &[u8] {
        &self.data
    }

    pub fn as_raw_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }

    pub fn into_raw(self) -> Vec<u8> {
        self.data
    }

    pub fn pixel(&self, x: usize, y: usize) -> [u8; 4] {
        let idx = (y * self.width + x) * CHANNELS;
        [
            self.data[idx],
            self.data[idx + 1],
            self.data[idx + 2],
            self.data[idx + 3],
        ]
    }

    pub fn set_pixel(&mut self, x: usize, y: usize, pixel: [u8; 4]) {
        let idx = (y * self.width + x) * CHANNELS;
        self.data[idx..idx + CHANNELS].copy_from_slice(&pixel);
    }

    /// Change dimensions, reusing the allocation. New pixels are opaque black.
    pub fn reshape(&mut self, width: usize, height: usize) {
        if self.width == width && self.height == height {
            return;
        }
        self.width = width;
        self.height = height;
        self.data.clear();
        self.data
            .extend([0u8, 0, 0, 255].iter().copied().cycle().take(width * height * CHANNELS));
    }

    pub fn to_rgba_image(&self) -> Option<RgbaImage> {
        RgbaImage::from_raw(self.width as u32, self.height as u32, self.data.clone())
    }
}

impl From<RgbaImage> for PixelBuffer {
    fn from(img: RgbaImage) -> Self {
        let width = img.width() as usize;
        let height = img.height() as usize;
        Self {
            width,
            height,
            data: img.into_raw(),
        }
    }
}
