pub mod factory;
pub mod image;
pub mod image_properties_task;

pub use factory::{ImagePropertiesFactory, TaskFactory, TaskInfo, TaskParams};
pub use image_properties_task::ImagePropertiesTask;
