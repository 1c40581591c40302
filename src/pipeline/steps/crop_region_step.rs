use crate::common::DetectedObject;
use crate::error::AppError;
use crate::pipeline::orchestration::{ProcessingStep, TaskContext};
use crate::pipeline::services::image::extract_bounding_box;
use async_trait::async_trait;
use tracing::debug;

pub const DEFAULT_DISPLAY_COLOR: [u8; 3] = [255, 0, 0];

/// Maps the first crop hint to a "selected area" detection
pub struct CropRegionStep;

#[async_trait]
impl ProcessingStep for CropRegionStep {
    async fn process(&self, context: &mut TaskContext) -> Result<(), AppError> {
        let response = context.response()?;
        let corners = response
            .crop_hints_annotation
            .as_ref()
            .and_then(|annotation| annotation.crop_hints.first())
            .map(|hint| hint.bounding_poly.vertices.as_slice())
            .unwrap_or_default();
        let bbox = extract_bounding_box(corners)?;

        let display_color = context
            .palette
            .as_ref()
            .and_then(|palette| palette.entries().first())
            .map_or(DEFAULT_DISPLAY_COLOR, |entry| entry.color);
        debug!("Selected area {:?} drawn in {:?}", bbox, display_color);
        context.detected = Some(DetectedObject::selected_area(bbox, display_color));

        Ok(())
    }

    fn name(&self) -> &'static str {
        "CropRegionStep"
    }
}
