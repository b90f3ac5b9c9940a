use image::codecs::jpeg::JpegEncoder;
use image::{DynamicImage, ExtendedColorType, RgbaImage};

use super::errors::CaptureError;
use crate::frame::Frame;

/// Encodes captured pixels as JPEG at a fixed quality.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameEncoder {
    quality: u8,
}

impl FrameEncoder {
    /// `quality` is clamped to 1-100.
    pub fn new(quality: u8) -> Self {
        Self {
            quality: quality.clamp(1, 100),
        }
    }

    pub fn quality(&self) -> u8 {
        self.quality
    }

    /// Encode an RGBA capture. JPEG has no alpha channel, so it is dropped.
    ///
    /// An encoder that succeeds without producing any bytes is reported as
    /// [`CaptureError::EmptyEncoding`] so an empty frame is never published.
    pub fn encode(&self, image: RgbaImage) -> Result<Frame, CaptureError> {
        let rgb = DynamicImage::ImageRgba8(image).into_rgb8();
        let (width, height) = rgb.dimensions();

        let mut bytes = Vec::new();
        JpegEncoder::new_with_quality(&mut bytes, self.quality)
            .encode(rgb.as_raw(), width, height, ExtendedColorType::Rgb8)
            .map_err(|e| CaptureError::EncodeFailed {
                message: e.to_string(),
            })?;

        if bytes.is_empty() {
            return Err(CaptureError::EmptyEncoding);
        }

        Ok(Frame::new(bytes, width, height))
    }
}
