use crate::error::AppError;
use crate::network::ImageAnnotator;
use crate::pipeline::orchestration::{ProcessingStep, TaskContext};
use async_trait::async_trait;
use std::sync::Arc;
use tracing::info;

/// Sends the encoded frame to the annotation service, once, without retrying
pub struct AnnotateStep {
    annotator: Arc<dyn ImageAnnotator>,
}

impl AnnotateStep {
    pub fn new(annotator: Arc<dyn ImageAnnotator>) -> Self {
        Self { annotator }
    }
}

#[async_trait]
impl ProcessingStep for AnnotateStep {
    async fn process(&self, context: &mut TaskContext) -> Result<(), AppError> {
        let encoded = context
            .encoded
            .as_deref()
            .ok_or_else(|| AppError::Encoding("frame was not encoded".to_string()))?;
        let features = context.variant.features();
        let response = self.annotator.annotate(encoded, features).await?;

        let palette = response
            .image_properties_annotation
            .as_ref()
            .map(|properties| properties.palette())
            .unwrap_or_default();
        info!(
            "Task {} received {} dominant colors",
            context.task_id,
            palette.len()
        );

        context.palette = Some(palette);
        context.response = Some(response);

        Ok(())
    }

    fn name(&self) -> &'static str {
        "AnnotateStep"
    }
}
