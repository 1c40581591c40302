use image::{DynamicImage, RgbImage};
use indexmap::IndexMap;
use std::sync::Arc;
use uuid::Uuid;

use crate::common::DetectedObject;
use crate::pipeline::orchestration::TaskMetrics;

/// Everything one invocation hands back to the host.
#[derive(Debug, Clone)]
pub struct TaskOutput {
    pub task_id: Uuid,
    /// Rendered dominant-color strip.
    pub strip: RgbImage,
    /// Raw annotation text keyed by annotation name.
    pub data: IndexMap<String, String>,
    /// Original image with the selected area, crop-hint variant only.
    pub detection: Option<(Arc<DynamicImage>, DetectedObject)>,
    pub metrics: TaskMetrics,
}
