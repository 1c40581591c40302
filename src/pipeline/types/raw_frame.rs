use image::{DynamicImage, RgbImage};

use crate::common::{ChannelOrder, Frame};
use crate::error::AppError;

/// Interleaved 8-bit, 3-channel buffer as the host hands it over.
#[derive(Debug, Clone)]
pub struct RawFrame {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<u8>,
    pub channel_order: ChannelOrder,
}

impl RawFrame {
    pub fn new(width: u32, height: u32, pixels: Vec<u8>, channel_order: ChannelOrder) -> Self {
        Self {
            width,
            height,
            pixels,
            channel_order,
        }
    }
}

impl TryFrom<RawFrame> for Frame {
    type Error = AppError;

    fn try_from(raw: RawFrame) -> Result<Self, Self::Error> {
        let expected = raw.width as usize * raw.height as usize * 3;
        let actual = raw.pixels.len();
        let image = RgbImage::from_raw(raw.width, raw.height, raw.pixels).ok_or_else(|| {
            AppError::Encoding(format!(
                "buffer of {} bytes does not hold a {}x{} 3-channel image ({} bytes)",
                actual, raw.width, raw.height, expected
            ))
        })?;
        Ok(Frame::new(DynamicImage::ImageRgb8(image), raw.channel_order))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_raw_frame_keeps_channel_order() {
        let raw = RawFrame::new(2, 1, vec![1, 2, 3, 4, 5, 6], ChannelOrder::Bgr);
        let frame = Frame::try_from(raw).unwrap();
        assert_eq!(frame.channel_order(), ChannelOrder::Bgr);
        assert_eq!(frame.image().width(), 2);
    }

    #[test]
    fn test_raw_frame_with_short_buffer() {
        let raw = RawFrame::new(2, 2, vec![0; 5], ChannelOrder::Rgb);
        assert!(matches!(Frame::try_from(raw), Err(AppError::Encoding(_))));
    }
}
