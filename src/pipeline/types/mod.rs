mod raw_frame;
mod task_output;
mod task_variant;

pub use raw_frame::RawFrame;
pub use task_output::TaskOutput;
pub use task_variant::TaskVariant;
