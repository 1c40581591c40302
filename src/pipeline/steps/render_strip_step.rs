use crate::error::AppError;
use crate::pipeline::orchestration::{ProcessingStep, TaskContext};
use crate::pipeline::services::image::ColorStripRenderer;
use async_trait::async_trait;

/// Draws the dominant-color palette as a proportional strip
pub struct RenderStripStep {
    renderer: ColorStripRenderer,
}

impl RenderStripStep {
    pub fn new(renderer: ColorStripRenderer) -> Self {
        Self { renderer }
    }
}

#[async_trait]
impl ProcessingStep for RenderStripStep {
    async fn process(&self, context: &mut TaskContext) -> Result<(), AppError> {
        let palette = context.palette.as_ref().ok_or_else(|| {
            AppError::DegenerateInput("no palette available to render".to_string())
        })?;
        context.strip = Some(self.renderer.render(palette)?);

        Ok(())
    }

    fn name(&self) -> &'static str {
        "RenderStripStep"
    }
}
