pub mod orchestration;
pub mod services;
pub mod steps;
pub mod types;

pub use services::{ImagePropertiesFactory, ImagePropertiesTask, TaskFactory, TaskInfo, TaskParams};
pub use types::{RawFrame, TaskOutput, TaskVariant};
