use image::{Rgb, RgbImage};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::common::Palette;
use crate::error::AppError;

pub const DEFAULT_STRIP_WIDTH: u32 = 1200;
pub const DEFAULT_STRIP_HEIGHT: u32 = 800;

/// What happens to the columns left over after each block width is floored.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RemainderPolicy {
    /// Leave the trailing columns black.
    #[default]
    Background,
    /// Widen the last block so the strip is fully covered.
    ExtendLast,
}

impl RemainderPolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            RemainderPolicy::Background => "background",
            RemainderPolicy::ExtendLast => "extend_last",
        }
    }
}

impl FromStr for RemainderPolicy {
    type Err = AppError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "background" => Ok(RemainderPolicy::Background),
            "extend_last" => Ok(RemainderPolicy::ExtendLast),
            _ => Err(AppError::invalid_parameter("remainder_policy", value)),
        }
    }
}

/// Draws a palette as contiguous vertical bands whose widths follow the normalized weights.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColorStripRenderer {
    width: u32,
    height: u32,
    policy: RemainderPolicy,
}

impl Default for ColorStripRenderer {
    fn default() -> Self {
        Self::new(DEFAULT_STRIP_WIDTH, DEFAULT_STRIP_HEIGHT)
    }
}

impl ColorStripRenderer {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            policy: RemainderPolicy::default(),
        }
    }

    pub fn with_policy(mut self, policy: RemainderPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    pub fn render(&self, palette: &Palette) -> Result<RgbImage, AppError> {
        if self.width == 0 {
            return Err(AppError::invalid_parameter("strip_width", self.width));
        }
        if self.height == 0 {
            return Err(AppError::invalid_parameter("strip_height", self.height));
        }
        let total = Self::normalization_total(palette)?;

        let mut strip = RgbImage::new(self.width, self.height);
        let last = palette.len() - 1;
        let mut x0: u32 = 0;

        for (index, entry) in palette.iter().enumerate() {
            let remaining = self.width - x0;
            let mut block_width = ((entry.weight / total) * self.width as f64).floor() as u32;
            block_width = block_width.min(remaining);
            if index == last && self.policy == RemainderPolicy::ExtendLast {
                block_width = remaining;
            }

            tracing::debug!(
                "Color block {:?} weight={:.4} x0={} width={}",
                entry.color,
                entry.weight,
                x0,
                block_width
            );
            self.fill_block(&mut strip, x0, block_width, entry.rgb());
            x0 += block_width;
        }

        if x0 < self.width {
            tracing::debug!("{} trailing columns left as background", self.width - x0);
        }

        Ok(strip)
    }

    fn normalization_total(palette: &Palette) -> Result<f64, AppError> {
        if palette.is_empty() {
            return Err(AppError::DegenerateInput("palette is empty".to_string()));
        }
        if let Some(entry) = palette
            .iter()
            .find(|entry| !entry.weight.is_finite() || entry.weight < 0.0)
        {
            return Err(AppError::DegenerateInput(format!(
                "invalid weight {} for color {:?}",
                entry.weight, entry.color
            )));
        }

        let total = palette.total_weight();
        if total <= 0.0 {
            return Err(AppError::DegenerateInput(
                "palette weights sum to zero".to_string(),
            ));
        }
        if !total.is_finite() {
            return Err(AppError::DegenerateInput(
                "palette weights overflow when summed".to_string(),
            ));
        }
        Ok(total)
    }

    fn fill_block(&self, strip: &mut RgbImage, x0: u32, block_width: u32, color: Rgb<u8>) {
        for x in x0..x0 + block_width {
            for y in 0..self.height {
                strip.put_pixel(x, y, color);
            }
        }
    }
}

/// Render with the given dimensions and the default remainder policy.
pub fn render(palette: &Palette, width: u32, height: u32) -> Result<RgbImage, AppError> {
    ColorStripRenderer::new(width, height).render(palette)
}
