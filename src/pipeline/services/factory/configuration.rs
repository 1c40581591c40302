use indexmap::IndexMap;
use std::path::PathBuf;
use std::str::FromStr;

use crate::config::Configuration;
use crate::error::AppError;
use crate::pipeline::services::image::RemainderPolicy;
use crate::pipeline::types::TaskVariant;

pub const CREDENTIALS_PARAM: &str = "google_application_credentials";
pub const STRIP_WIDTH_PARAM: &str = "strip_width";
pub const STRIP_HEIGHT_PARAM: &str = "strip_height";
pub const REMAINDER_POLICY_PARAM: &str = "remainder_policy";
pub const VARIANT_PARAM: &str = "variant";
pub const JPEG_QUALITY_PARAM: &str = "jpeg_quality";

/// Per-task parameters, exchanged with the host as a string dictionary
#[derive(Debug, Clone, PartialEq)]
pub struct TaskParams {
    /// Service-account file; empty means fall back to the environment
    pub google_application_credentials: String,
    pub strip_width: u32,
    pub strip_height: u32,
    pub remainder_policy: RemainderPolicy,
    pub variant: TaskVariant,
    pub jpeg_quality: u8,
}

impl Default for TaskParams {
    fn default() -> Self {
        Self::from(&Configuration::default())
    }
}

impl From<&Configuration> for TaskParams {
    fn from(configuration: &Configuration) -> Self {
        Self {
            google_application_credentials: configuration
                .google_application_credentials
                .as_ref()
                .map(|path| path.display().to_string())
                .unwrap_or_default(),
            strip_width: configuration.strip_width,
            strip_height: configuration.strip_height,
            remainder_policy: configuration.remainder_policy,
            variant: configuration.variant,
            jpeg_quality: configuration.jpeg_quality,
        }
    }
}

impl TaskParams {
    /// Apply values coming from the host. Unknown keys are ignored and absent
    /// keys keep their current value. On error nothing is changed.
    pub fn set_values<'a, I>(&mut self, params: I) -> Result<(), AppError>
    where
        I: IntoIterator<Item = (&'a String, &'a String)>,
    {
        let mut updated = self.clone();
        for (key, value) in params {
            match key.as_str() {
                CREDENTIALS_PARAM => {
                    updated.google_application_credentials = value.trim().to_string()
                }
                STRIP_WIDTH_PARAM => updated.strip_width = parse_number(key, value)?,
                STRIP_HEIGHT_PARAM => updated.strip_height = parse_number(key, value)?,
                JPEG_QUALITY_PARAM => updated.jpeg_quality = parse_number(key, value)?,
                REMAINDER_POLICY_PARAM => updated.remainder_policy = value.parse()?,
                VARIANT_PARAM => updated.variant = value.parse()?,
                other => tracing::debug!("Ignoring unknown parameter {}", other),
            }
        }
        *self = updated;
        Ok(())
    }

    /// Inverse of [`TaskParams::set_values`].
    pub fn get_values(&self) -> IndexMap<String, String> {
        IndexMap::from([
            (
                CREDENTIALS_PARAM.to_string(),
                self.google_application_credentials.clone(),
            ),
            (STRIP_WIDTH_PARAM.to_string(), self.strip_width.to_string()),
            (STRIP_HEIGHT_PARAM.to_string(), self.strip_height.to_string()),
            (
                REMAINDER_POLICY_PARAM.to_string(),
                self.remainder_policy.as_str().to_string(),
            ),
            (VARIANT_PARAM.to_string(), self.variant.as_str().to_string()),
            (JPEG_QUALITY_PARAM.to_string(), self.jpeg_quality.to_string()),
        ])
    }

    pub fn credentials_path(&self) -> Option<PathBuf> {
        if self.google_application_credentials.is_empty() {
            None
        } else {
            Some(PathBuf::from(&self.google_application_credentials))
        }
    }

    /// Validate parameter values
    pub fn validate(&self) -> Result<(), String> {
        if self.strip_width == 0 {
            return Err("Strip width must be greater than 0".to_string());
        }

        if self.strip_height == 0 {
            return Err("Strip height must be greater than 0".to_string());
        }

        if !(1..=100).contains(&self.jpeg_quality) {
            return Err("JPEG quality must be between 1 and 100".to_string());
        }

        Ok(())
    }
}

fn parse_number<T: FromStr>(key: &str, value: &str) -> Result<T, AppError> {
    value
        .trim()
        .parse()
        .map_err(|_| AppError::invalid_parameter(key, value))
}
