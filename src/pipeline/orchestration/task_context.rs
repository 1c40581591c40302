use image::RgbImage;
use indexmap::IndexMap;
use std::time::Instant;
use uuid::Uuid;

use crate::common::{DetectedObject, Frame, Palette};
use crate::error::{AppError, ServiceError};
use crate::network::AnnotateImageResponse;
use crate::pipeline::types::{TaskOutput, TaskVariant};

/// Context object that flows through the processing pipeline.
/// Holds everything produced while handling a single invocation.
pub struct TaskContext {
    pub task_id: Uuid,
    pub frame: Frame,
    pub variant: TaskVariant,
    pub encoded: Option<Vec<u8>>,
    pub response: Option<AnnotateImageResponse>,
    pub palette: Option<Palette>,
    pub strip: Option<RgbImage>,
    pub data: IndexMap<String, String>,
    pub detected: Option<DetectedObject>,
    pub metrics: TaskMetrics,
    pub processing_start: Instant,
}

impl TaskContext {
    pub fn new(frame: Frame, variant: TaskVariant) -> Self {
        Self {
            task_id: Uuid::new_v4(),
            frame,
            variant,
            encoded: None,
            response: None,
            palette: None,
            strip: None,
            data: IndexMap::new(),
            detected: None,
            metrics: TaskMetrics::new(),
            processing_start: Instant::now(),
        }
    }

    /// Response from the annotate step; later steps can't run without it.
    pub fn response(&self) -> Result<&AnnotateImageResponse, AppError> {
        self.response
            .as_ref()
            .ok_or(AppError::Service(ServiceError::EmptyResponse))
    }

    pub fn into_output(mut self) -> Result<TaskOutput, AppError> {
        self.metrics.finalize(self.processing_start);
        let strip = self
            .strip
            .ok_or_else(|| AppError::DegenerateInput("no color strip was rendered".to_string()))?;
        let detection = self
            .detected
            .map(|object| (self.frame.shared_image(), object));

        Ok(TaskOutput {
            task_id: self.task_id,
            strip,
            data: self.data,
            detection,
            metrics: self.metrics,
        })
    }
}

/// Timings collected while the task runs.
#[derive(Debug, Clone, Default)]
pub struct TaskMetrics {
    pub encode_duration_us: u64,
    pub annotate_duration_us: u64,
    pub render_duration_us: u64,
    pub data_dict_duration_us: u64,
    pub region_duration_us: u64,
    pub total_processing_duration_us: u64,
}

impl TaskMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_duration(&mut self, step: ProcessingStepType, duration_us: u64) {
        match step {
            ProcessingStepType::Encode => self.encode_duration_us = duration_us,
            ProcessingStepType::Annotate => self.annotate_duration_us = duration_us,
            ProcessingStepType::RenderStrip => self.render_duration_us = duration_us,
            ProcessingStepType::CropRegion => self.region_duration_us = duration_us,
            ProcessingStepType::DataDict => self.data_dict_duration_us = duration_us,
        }
    }

    pub fn finalize(&mut self, start_time: Instant) {
        self.total_processing_duration_us = start_time.elapsed().as_micros() as u64;
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProcessingStepType {
    Encode,
    Annotate,
    RenderStrip,
    DataDict,
    CropRegion,
}

impl ProcessingStepType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProcessingStepType::Encode => "encode",
            ProcessingStepType::Annotate => "annotate",
            ProcessingStepType::RenderStrip => "render_strip",
            ProcessingStepType::DataDict => "data_dict",
            ProcessingStepType::CropRegion => "crop_region",
        }
    }
}
