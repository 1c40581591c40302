use crate::error::AppError;
use crate::pipeline::orchestration::{ProcessingStep, TaskContext};
use async_trait::async_trait;
use serde::Serialize;

pub const IMAGE_PROPERTIES_KEY: &str = "image_properties_annotation";
pub const CROP_HINTS_KEY: &str = "crop_hints_annotation";

/// Copies the raw annotations into the string-keyed diagnostic output
pub struct DataDictStep;

impl DataDictStep {
    fn to_text<T: Serialize>(value: &T) -> String {
        // Serializing plain derive types into a String can't fail.
        serde_json::to_string_pretty(value).unwrap_or_default()
    }
}

#[async_trait]
impl ProcessingStep for DataDictStep {
    async fn process(&self, context: &mut TaskContext) -> Result<(), AppError> {
        let response = context.response()?;

        let properties = response
            .image_properties_annotation
            .clone()
            .unwrap_or_default();
        let mut entries = vec![(IMAGE_PROPERTIES_KEY.to_string(), Self::to_text(&properties))];
        if let Some(crop_hints) = &response.crop_hints_annotation {
            entries.push((CROP_HINTS_KEY.to_string(), Self::to_text(crop_hints)));
        }

        context.data.extend(entries);
        Ok(())
    }

    fn name(&self) -> &'static str {
        "DataDictStep"
    }
}
