use crate::error::AppError;
use crate::pipeline::orchestration::{ProcessingStep, TaskContext};
use crate::pipeline::services::image::ImageEncoder;
use async_trait::async_trait;

/// Normalizes the input frame to RGB and encodes it for transport
pub struct EncodeImageStep {
    encoder: ImageEncoder,
}

impl EncodeImageStep {
    pub fn new(encoder: ImageEncoder) -> Self {
        Self { encoder }
    }
}

#[async_trait]
impl ProcessingStep for EncodeImageStep {
    async fn process(&self, context: &mut TaskContext) -> Result<(), AppError> {
        context.encoded = Some(self.encoder.encode(&context.frame)?);
        Ok(())
    }

    fn name(&self) -> &'static str {
        "EncodeImageStep"
    }
}
