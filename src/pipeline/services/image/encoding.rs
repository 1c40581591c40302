use image::codecs::jpeg::JpegEncoder;
use image::RgbImage;

use crate::common::{ChannelOrder, Frame};
use crate::error::AppError;

pub const DEFAULT_JPEG_QUALITY: u8 = 95;

/// Converts host frames into the byte payload sent to the annotation service.
#[derive(Debug, Clone, Copy)]
pub struct ImageEncoder {
    quality: u8,
}

impl Default for ImageEncoder {
    fn default() -> Self {
        Self::new(DEFAULT_JPEG_QUALITY)
    }
}

impl ImageEncoder {
    pub fn new(quality: u8) -> Self {
        Self {
            quality: quality.clamp(1, 100),
        }
    }

    pub fn quality(&self) -> u8 {
        self.quality
    }

    /// Bring the frame into RGB channel order regardless of how the host laid it out.
    pub fn normalize_channels(&self, frame: &Frame) -> RgbImage {
        let mut rgb = frame.image().to_rgb8();
        if frame.channel_order() == ChannelOrder::Bgr {
            for pixel in rgb.pixels_mut() {
                pixel.0.swap(0, 2);
            }
        }
        rgb
    }

    pub fn encode(&self, frame: &Frame) -> Result<Vec<u8>, AppError> {
        let rgb = self.normalize_channels(frame);
        if rgb.width() == 0 || rgb.height() == 0 {
            return Err(AppError::Encoding(format!(
                "cannot encode an empty {}x{} image",
                rgb.width(),
                rgb.height()
            )));
        }

        let mut buffer = Vec::new();
        JpegEncoder::new_with_quality(&mut buffer, self.quality)
            .encode_image(&rgb)
            .map_err(|e| AppError::Encoding(e.to_string()))?;

        tracing::debug!(
            "Encoded {}x{} frame {} to {} JPEG bytes",
            rgb.width(),
            rgb.height(),
            frame.frame_id(),
            buffer.len()
        );
        Ok(buffer)
    }
}
