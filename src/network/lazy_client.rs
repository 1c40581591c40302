use async_trait::async_trait;
use std::path::PathBuf;
use tokio::sync::OnceCell;
use tracing::info;

use crate::error::AppError;
use crate::network::annotator::ImageAnnotator;
use crate::network::client::{ServiceSettings, VisionClient};
use crate::network::credentials::resolve_credentials_path;
use crate::network::types::{AnnotateImageResponse, Feature};

/// Builds the [`VisionClient`] on first use and reuses it afterwards.
///
/// Concurrent first calls wait on the same initialization, so exactly one client
/// is constructed. A failed construction is not cached and is retried on the
/// next call.
#[derive(Debug)]
pub struct LazyAnnotator {
    credentials_path: Option<PathBuf>,
    settings: ServiceSettings,
    client: OnceCell<VisionClient>,
}

impl LazyAnnotator {
    pub fn new(credentials_path: Option<PathBuf>, settings: ServiceSettings) -> Self {
        Self {
            credentials_path,
            settings,
            client: OnceCell::new(),
        }
    }

    pub fn is_initialized(&self) -> bool {
        self.client.initialized()
    }

    fn build_client(&self) -> Result<VisionClient, AppError> {
        let path = resolve_credentials_path(self.credentials_path.as_deref())?;
        info!("Creating annotation client from {}", path.display());
        VisionClient::from_credentials_file(&path, &self.settings)
    }

    async fn client(&self) -> Result<&VisionClient, AppError> {
        self.client
            .get_or_try_init(|| async { self.build_client() })
            .await
    }
}

#[async_trait]
impl ImageAnnotator for LazyAnnotator {
    async fn annotate(
        &self,
        content: &[u8],
        features: &[Feature],
    ) -> Result<AnnotateImageResponse, AppError> {
        self.client().await?.annotate(content, features).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AuthError;

    #[tokio::test]
    async fn test_unreadable_credentials_fail_without_caching() {
        let annotator = LazyAnnotator::new(
            Some(PathBuf::from("/nonexistent/service-account.json")),
            ServiceSettings::default(),
        );

        let result = annotator.annotate(b"jpeg", &[Feature::ImageProperties]).await;
        assert!(matches!(
            result,
            Err(AppError::Authentication(AuthError::ReadError(_, _)))
        ));
        assert!(!annotator.is_initialized());
    }
}
