use super::configuration::TaskParams;
use crate::config::Configuration;
use crate::error::AppError;
use crate::network::{ImageAnnotator, LazyAnnotator};
use crate::pipeline::orchestration::{
    ProcessingPipeline, ProcessingStepType, StepInstrumentation,
};
use crate::pipeline::services::image::{ColorStripRenderer, ImageEncoder};
use crate::pipeline::services::image_properties_task::ImagePropertiesTask;
use crate::pipeline::steps::{
    AnnotateStep, CropRegionStep, DataDictStep, EncodeImageStep, RenderStripStep,
};
use crate::pipeline::types::TaskVariant;
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlgoType {
    Infer,
}

/// Metadata the host shows for the task in its algorithm tree
#[derive(Debug, Clone, PartialEq)]
pub struct TaskInfo {
    pub name: String,
    pub short_description: String,
    pub icon_path: String,
    pub path: String,
    pub version: String,
    pub authors: String,
    pub year: u16,
    pub license: String,
    pub documentation_link: String,
    pub repository: String,
    pub keywords: Vec<String>,
    pub algo_type: AlgoType,
    pub algo_tasks: String,
}

impl Default for TaskInfo {
    fn default() -> Self {
        Self {
            name: "infer_google_vision_image_properties".to_string(),
            short_description: "Image Properties feature detects general attributes of the image, such as dominant color.".to_string(),
            icon_path: "images/cloud.png".to_string(),
            path: "Plugins/Rust/Detection".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            authors: "Google".to_string(),
            year: 2023,
            license: "Apache License 2.0".to_string(),
            documentation_link: "https://cloud.google.com/vision/docs/detecting-properties"
                .to_string(),
            repository: "https://github.com/googleapis/google-cloud-rust".to_string(),
            keywords: ["Image properties", "Dominant color", "Cloud", "Vision AI"]
                .into_iter()
                .map(String::from)
                .collect(),
            algo_type: AlgoType::Infer,
            algo_tasks: "OTHER".to_string(),
        }
    }
}

/// Capability descriptor: task metadata plus a way to build task instances
pub trait TaskFactory {
    type Task;

    fn info(&self) -> &TaskInfo;

    fn create(&self, params: Option<TaskParams>) -> Result<Self::Task, AppError>;
}

/// Factory for configured image-properties tasks
/// This implements the Factory pattern to encapsulate the pipeline assembly
pub struct ImagePropertiesFactory {
    info: TaskInfo,
    configuration: Configuration,
    annotator: Option<Arc<dyn ImageAnnotator>>,
}

impl ImagePropertiesFactory {
    pub fn new(configuration: Configuration) -> Self {
        Self {
            info: TaskInfo::default(),
            configuration,
            annotator: None,
        }
    }

    /// Use this annotator instead of lazily building a client from credentials.
    pub fn with_annotator(mut self, annotator: Arc<dyn ImageAnnotator>) -> Self {
        self.annotator = Some(annotator);
        self
    }

    fn credentials_path(&self, params: &TaskParams) -> Option<PathBuf> {
        params
            .credentials_path()
            .or_else(|| self.configuration.google_application_credentials.clone())
    }

    /// Create the complete processing pipeline
    fn create_processing_pipeline(
        params: &TaskParams,
        annotator: Arc<dyn ImageAnnotator>,
    ) -> ProcessingPipeline {
        let renderer = ColorStripRenderer::new(params.strip_width, params.strip_height)
            .with_policy(params.remainder_policy);

        let pipeline = ProcessingPipeline::new()
            // Step 1: Channel normalization and JPEG encoding
            .add_step(Box::new(
                EncodeImageStep::new(ImageEncoder::new(params.jpeg_quality))
                    .instrumented(ProcessingStepType::Encode),
            ))
            // Step 2: Single annotation request
            .add_step(Box::new(
                AnnotateStep::new(annotator).instrumented(ProcessingStepType::Annotate),
            ))
            // Step 3: Dominant-color strip
            .add_step(Box::new(
                RenderStripStep::new(renderer).instrumented(ProcessingStepType::RenderStrip),
            ))
            // Step 4: Raw response text for the host
            .add_step(Box::new(
                DataDictStep.instrumented(ProcessingStepType::DataDict),
            ));

        match params.variant {
            TaskVariant::ImageProperties => pipeline,
            // Step 5: Crop hint as a detected object
            TaskVariant::CropHints => pipeline.add_step(Box::new(
                CropRegionStep.instrumented(ProcessingStepType::CropRegion),
            )),
        }
    }
}

impl TaskFactory for ImagePropertiesFactory {
    type Task = ImagePropertiesTask;

    fn info(&self) -> &TaskInfo {
        &self.info
    }

    fn create(&self, params: Option<TaskParams>) -> Result<ImagePropertiesTask, AppError> {
        let params = params.unwrap_or_else(|| TaskParams::from(&self.configuration));
        params
            .validate()
            .map_err(|e| AppError::invalid_parameter("params", e))?;

        let annotator: Arc<dyn ImageAnnotator> = match &self.annotator {
            Some(annotator) => Arc::clone(annotator),
            None => Arc::new(LazyAnnotator::new(
                self.credentials_path(&params),
                self.configuration.service_settings(),
            )),
        };

        let pipeline = Self::create_processing_pipeline(&params, annotator);
        Ok(ImagePropertiesTask::new(
            self.info.name.clone(),
            params,
            pipeline,
        ))
    }
}
