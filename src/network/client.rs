use async_trait::async_trait;
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use std::path::Path;
use std::time::Duration;
use tracing::{debug, error};

use crate::error::{AppError, ServiceError};
use crate::network::annotator::ImageAnnotator;
use crate::network::credentials::{ServiceAccountCredentials, TokenProvider};
use crate::network::types::{
    AnnotateImageRequest, AnnotateImageResponse, BatchAnnotateImagesRequest,
    BatchAnnotateImagesResponse, Feature, FeatureRequest, RequestImage,
};

pub const DEFAULT_ENDPOINT: &str = "https://vision.googleapis.com";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Where and how long to talk to the annotation service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceSettings {
    pub endpoint: String,
    pub timeout: Duration,
}

impl Default for ServiceSettings {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

/// HTTP client for the `images:annotate` endpoint.
#[derive(Debug)]
pub struct VisionClient {
    http: reqwest::Client,
    annotate_url: String,
    tokens: TokenProvider,
}

impl VisionClient {
    pub fn new(
        credentials: ServiceAccountCredentials,
        settings: &ServiceSettings,
    ) -> Result<Self, AppError> {
        let http = reqwest::Client::builder()
            .timeout(settings.timeout)
            .build()
            .map_err(ServiceError::from)?;
        Ok(Self {
            http,
            annotate_url: format!(
                "{}/v1/images:annotate",
                settings.endpoint.trim_end_matches('/')
            ),
            tokens: TokenProvider::new(credentials),
        })
    }

    pub fn from_credentials_file(path: &Path, settings: &ServiceSettings) -> Result<Self, AppError> {
        let credentials = ServiceAccountCredentials::from_file(path)?;
        debug!(
            "Loaded service account {} from {}",
            credentials.client_email,
            path.display()
        );
        Self::new(credentials, settings)
    }

    pub fn annotate_url(&self) -> &str {
        &self.annotate_url
    }

    fn build_request(content: &[u8], features: &[Feature]) -> BatchAnnotateImagesRequest {
        BatchAnnotateImagesRequest {
            requests: vec![AnnotateImageRequest {
                image: RequestImage {
                    content: STANDARD.encode(content),
                },
                features: features
                    .iter()
                    .map(|&kind| FeatureRequest { kind })
                    .collect(),
            }],
        }
    }
}

#[async_trait]
impl ImageAnnotator for VisionClient {
    async fn annotate(
        &self,
        content: &[u8],
        features: &[Feature],
    ) -> Result<AnnotateImageResponse, AppError> {
        let token = self.tokens.access_token(&self.http).await?;
        let body = Self::build_request(content, features);

        debug!(
            "Sending {} bytes to {} for {:?}",
            content.len(),
            self.annotate_url,
            features
        );
        let response = self
            .http
            .post(&self.annotate_url)
            .bearer_auth(token)
            .json(&body)
            .send()
            .await
            .map_err(ServiceError::from)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            error!("Annotation request failed with HTTP {}", status);
            return Err(ServiceError::HttpStatus {
                status: status.as_u16(),
                body,
            }
            .into());
        }

        let batch: BatchAnnotateImagesResponse =
            response.json().await.map_err(ServiceError::from)?;
        let response = batch
            .responses
            .into_iter()
            .next()
            .ok_or(ServiceError::EmptyResponse)?;

        if let Some(status) = response.error.as_ref().filter(|status| status.code != 0) {
            error!("Annotation failed with code {}", status.code);
            return Err(ServiceError::AnnotationFailed {
                code: status.code,
                message: status.message.clone(),
            }
            .into());
        }
        Ok(response)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_body_is_base64_content() {
        let request = VisionClient::build_request(b"jpeg", &[Feature::ImageProperties]);
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["requests"][0]["image"]["content"], "anBlZw==");
        assert_eq!(json["requests"][0]["features"][0]["type"], "IMAGE_PROPERTIES");
    }

    #[test]
    fn test_annotate_url_joins_endpoint() {
        let credentials = ServiceAccountCredentials {
            kind: "service_account".to_string(),
            client_email: "bot@demo".to_string(),
            private_key: String::new(),
            token_uri: "http://localhost/token".to_string(),
            project_id: None,
        };
        let settings = ServiceSettings {
            endpoint: "http://localhost:8080/".to_string(),
            timeout: Duration::from_secs(1),
        };
        let client = VisionClient::new(credentials, &settings).unwrap();
        assert_eq!(client.annotate_url(), "http://localhost:8080/v1/images:annotate");
    }
}
