use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::error::AppError;
use crate::network::client::{DEFAULT_ENDPOINT, DEFAULT_TIMEOUT_SECS};
use crate::network::ServiceSettings;
use crate::pipeline::services::image::{
    RemainderPolicy, DEFAULT_JPEG_QUALITY, DEFAULT_STRIP_HEIGHT, DEFAULT_STRIP_WIDTH,
};
use crate::pipeline::types::TaskVariant;

const DEFAULT_CONFIG_NAME: &str = "vision";
const ENV_PREFIX: &str = "VISION";

/// Process-level settings, read from `vision.toml` and `VISION_*` variables.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Configuration {
    pub google_application_credentials: Option<PathBuf>,
    pub endpoint: String,
    pub request_timeout_secs: u64,
    pub strip_width: u32,
    pub strip_height: u32,
    pub remainder_policy: RemainderPolicy,
    pub jpeg_quality: u8,
    pub variant: TaskVariant,
    pub log_level: String,
}

impl Default for Configuration {
    fn default() -> Self {
        Self {
            google_application_credentials: None,
            endpoint: DEFAULT_ENDPOINT.to_string(),
            request_timeout_secs: DEFAULT_TIMEOUT_SECS,
            strip_width: DEFAULT_STRIP_WIDTH,
            strip_height: DEFAULT_STRIP_HEIGHT,
            remainder_policy: RemainderPolicy::default(),
            jpeg_quality: DEFAULT_JPEG_QUALITY,
            variant: TaskVariant::default(),
            log_level: "info".to_string(),
        }
    }
}

impl Configuration {
    /// Load from an explicit file, or from an optional `vision.*` in the working
    /// directory, with environment variables layered on top.
    pub fn load(file: Option<&Path>) -> Result<Self, AppError> {
        let file_source = match file {
            Some(path) => ::config::File::from(path).required(true),
            None => ::config::File::with_name(DEFAULT_CONFIG_NAME).required(false),
        };

        let configuration: Self = ::config::Config::builder()
            .add_source(file_source)
            .add_source(::config::Environment::with_prefix(ENV_PREFIX).try_parsing(true))
            .build()?
            .try_deserialize()?;
        configuration.validate()?;
        Ok(configuration)
    }

    pub fn validate(&self) -> Result<(), AppError> {
        if self.strip_width == 0 {
            return Err(AppError::invalid_parameter("strip_width", self.strip_width));
        }
        if self.strip_height == 0 {
            return Err(AppError::invalid_parameter("strip_height", self.strip_height));
        }
        if self.request_timeout_secs == 0 {
            return Err(AppError::invalid_parameter(
                "request_timeout_secs",
                self.request_timeout_secs,
            ));
        }
        if !(1..=100).contains(&self.jpeg_quality) {
            return Err(AppError::invalid_parameter("jpeg_quality", self.jpeg_quality));
        }
        if self.endpoint.trim().is_empty() {
            return Err(AppError::invalid_parameter("endpoint", &self.endpoint));
        }
        Ok(())
    }

    pub fn service_settings(&self) -> ServiceSettings {
        ServiceSettings {
            endpoint: self.endpoint.clone(),
            timeout: Duration::from_secs(self.request_timeout_secs),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_reference_strip() {
        let configuration = Configuration::default();
        assert_eq!(
            (configuration.strip_width, configuration.strip_height),
            (1200, 800)
        );
        assert_eq!(configuration.remainder_policy, RemainderPolicy::Background);
        assert!(configuration.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let configuration = Configuration {
            strip_width: 0,
            ..Configuration::default()
        };
        assert!(configuration.validate().is_err());

        let configuration = Configuration {
            jpeg_quality: 0,
            ..Configuration::default()
        };
        assert!(configuration.validate().is_err());

        let configuration = Configuration {
            request_timeout_secs: 0,
            ..Configuration::default()
        };
        assert!(configuration.validate().is_err());
    }

    #[test]
    fn test_load_from_toml_file() {
        let path = std::env::temp_dir().join(format!("vision-{}.toml", uuid::Uuid::new_v4()));
        std::fs::write(
            &path,
            "strip_width = 300\nstrip_height = 20\nremainder_policy = \"extend_last\"\nvariant = \"crop_hints\"\n",
        )
        .unwrap();

        let configuration = Configuration::load(Some(&path)).unwrap();
        std::fs::remove_file(&path).unwrap();

        assert_eq!(configuration.strip_width, 300);
        assert_eq!(configuration.strip_height, 20);
        assert_eq!(configuration.remainder_policy, RemainderPolicy::ExtendLast);
        assert_eq!(configuration.variant, TaskVariant::CropHints);
        assert_eq!(configuration.endpoint, DEFAULT_ENDPOINT);
    }

    #[test]
    fn test_environment_overrides_file() {
        // No other test asserts these two keys.
        const TIMEOUT_VAR: &str = "VISION_REQUEST_TIMEOUT_SECS";
        const LOG_LEVEL_VAR: &str = "VISION_LOG_LEVEL";
        let saved: Vec<_> = [TIMEOUT_VAR, LOG_LEVEL_VAR]
            .into_iter()
            .map(|name| (name, std::env::var_os(name)))
            .collect();

        let path = std::env::temp_dir().join(format!("vision-{}.toml", uuid::Uuid::new_v4()));
        std::fs::write(&path, "request_timeout_secs = 5\nlog_level = \"warn\"\n").unwrap();
        std::env::set_var(TIMEOUT_VAR, "7");
        std::env::set_var(LOG_LEVEL_VAR, "debug");

        let result = Configuration::load(Some(&path));

        std::fs::remove_file(&path).unwrap();
        for (name, value) in saved {
            match value {
                Some(value) => std::env::set_var(name, value),
                None => std::env::remove_var(name),
            }
        }

        let configuration = result.unwrap();
        assert_eq!(configuration.request_timeout_secs, 7);
        assert_eq!(configuration.log_level, "debug");
        assert_eq!(
            configuration.service_settings().timeout,
            Duration::from_secs(7)
        );
    }

    #[test]
    fn test_load_missing_explicit_file_fails() {
        let result = Configuration::load(Some(Path::new("/nonexistent/vision.toml")));
        assert!(matches!(result, Err(AppError::Config(_))));
    }
}
