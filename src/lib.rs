//! Dominant-color analysis through the cloud Vision `images:annotate` API,
//! packaged as a task a visual-workflow host can create and run.
//!
//! The task encodes the input frame, asks the service for image properties
//! (and, optionally, crop hints), renders the dominant colors as a strip whose
//! band widths follow each color's pixel fraction, and returns the raw
//! annotation text alongside.

pub mod common;
pub mod config;
pub mod error;
pub mod network;
pub mod pipeline;

pub use common::{BoundingBox, ChannelOrder, ColorEntry, DetectedObject, Frame, Palette, Vertex};
pub use crate::config::Configuration;
pub use error::{AppError, AuthError, ServiceError};
pub use network::{ImageAnnotator, LazyAnnotator, VisionClient};
pub use pipeline::services::image::{render, ColorStripRenderer, RemainderPolicy};
pub use pipeline::{
    ImagePropertiesFactory, ImagePropertiesTask, TaskFactory, TaskInfo, TaskOutput, TaskParams,
    TaskVariant,
};
