pub mod instrumented_step;
pub mod processing_step;
pub mod task_context;

pub use instrumented_step::{InstrumentedStep, StepInstrumentation};
pub use processing_step::{ProcessingPipeline, ProcessingStep};
pub use task_context::{ProcessingStepType, TaskContext, TaskMetrics};
