pub mod configuration;
pub mod pipeline_factory;

pub use configuration::TaskParams;
pub use pipeline_factory::{AlgoType, ImagePropertiesFactory, TaskFactory, TaskInfo};
