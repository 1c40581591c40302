use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::error::AppError;
use crate::network::Feature;

/// Which outputs the task produces.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskVariant {
    /// Color strip and raw annotation.
    #[default]
    ImageProperties,
    /// Everything above plus the crop hint as a detected object.
    CropHints,
}

impl TaskVariant {
    pub fn features(&self) -> &'static [Feature] {
        match self {
            TaskVariant::ImageProperties => &[Feature::ImageProperties],
            TaskVariant::CropHints => &[Feature::ImageProperties, Feature::CropHints],
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TaskVariant::ImageProperties => "image_properties",
            TaskVariant::CropHints => "crop_hints",
        }
    }
}

impl FromStr for TaskVariant {
    type Err = AppError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "image_properties" => Ok(TaskVariant::ImageProperties),
            "crop_hints" => Ok(TaskVariant::CropHints),
            _ => Err(AppError::invalid_parameter("variant", value)),
        }
    }
}
