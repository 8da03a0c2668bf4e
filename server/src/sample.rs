use hueprobe::Rgb;
use image::{ImageError, ImageFormat, RgbImage};
use thiserror::Error;

/// Upload formats accepted for pixel picking
pub const SUPPORTED_FORMATS: [ImageFormat; 2] = [ImageFormat::Png, ImageFormat::Jpeg];

#[derive(Debug, Error)]
pub enum SampleError {
    #[error("Not a readable image: {0}")]
    Decode(#[from] ImageError),
    #[error("Unsupported image format {0:?}, expected PNG or JPEG")]
    UnsupportedFormat(ImageFormat),
}

/// A decoded image, converted to 8-bit RGB.
pub struct DecodedImage {
    pixels: RgbImage,
}

impl DecodedImage {
    /// Decode a PNG or JPEG upload, detected from its leading bytes.
    /// Alpha is dropped and gray is replicated into all three channels.
    pub fn decode(bytes: &[u8]) -> Result<Self, SampleError> {
        let format = image::guess_format(bytes)?;
        if !SUPPORTED_FORMATS.contains(&format) {
            return Err(SampleError::UnsupportedFormat(format));
        }
        let image = image::load_from_memory_with_format(bytes, format)?;
        Ok(Self {
            pixels: image.to_rgb8(),
        })
    }

    pub fn width(&self) -> u32 {
        self.pixels.width()
    }

    pub fn height(&self) -> u32 {
        self.pixels.height()
    }

    /// Clamp a requested coordinate into the image. Missing coordinates
    /// default to the center.
    pub fn clamp(&self, x: Option<u32>, y: Option<u32>) -> (u32, u32) {
        let x = x.unwrap_or(self.width() / 2).min(self.width() - 1);
        let y = y.unwrap_or(self.height() / 2).min(self.height() - 1);
        (x, y)
    }

    /// Color of the pixel at `(x, y)`. Coordinates must be inside the
    /// image, see [`DecodedImage::clamp`].
    pub fn pixel(&self, x: u32, y: u32) -> Rgb {
        let [r, g, b] = self.pixels.get_pixel(x, y).0;
        Rgb::new(r, g, b)
    }
}
