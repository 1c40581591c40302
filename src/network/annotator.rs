use async_trait::async_trait;

use crate::error::AppError;
use crate::network::types::{AnnotateImageResponse, Feature};

/// Remote image annotation, one request per call.
#[async_trait]
pub trait ImageAnnotator: Send + Sync {
    async fn annotate(
        &self,
        content: &[u8],
        features: &[Feature],
    ) -> Result<AnnotateImageResponse, AppError>;
}
