use super::task_context::TaskContext;
use crate::error::AppError;
use async_trait::async_trait;

/// Chain of Responsibility pattern for the task pipeline
#[async_trait]
pub trait ProcessingStep: Send + Sync {
    async fn process(&self, context: &mut TaskContext) -> Result<(), AppError>;
    fn name(&self) -> &'static str;
}

/// Runs a context through its steps in insertion order, stopping at the first error.
#[derive(Default)]
pub struct ProcessingPipeline {
    steps: Vec<Box<dyn ProcessingStep>>,
}

impl ProcessingPipeline {
    pub fn new() -> Self {
        Self { steps: Vec::new() }
    }

    pub fn add_step(mut self, step: Box<dyn ProcessingStep>) -> Self {
        self.steps.push(step);
        self
    }

    pub fn step_names(&self) -> Vec<&'static str> {
        self.steps.iter().map(|step| step.name()).collect()
    }

    pub async fn process(&self, mut context: TaskContext) -> Result<TaskContext, AppError> {
        for step in &self.steps {
            tracing::debug!("Processing step: {}", step.name());
            step.process(&mut context).await?;
        }
        Ok(context)
    }
}
