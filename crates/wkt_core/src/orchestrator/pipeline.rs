//! Pipeline runner that executes steps in sequence.

use super::errors::{PipelineError, PipelineResult, StepError};
use super::step::PipelineStep;
use super::types::{Context, RunPhase, RunState};
use crate::project::ProjectHost;

/// Pipeline that runs a sequence of steps.
///
/// The pipeline executes steps in order, running validation before
/// and after each step. The first failure is terminal: the run is
/// marked failed and nothing created so far is undone.
pub struct Pipeline {
    /// Steps to execute in order.
    steps: Vec<Box<dyn PipelineStep>>,
}

impl Pipeline {
    /// Create a new empty pipeline.
    pub fn new() -> Self {
        Self { steps: Vec::new() }
    }

    /// Add a step to the pipeline.
    pub fn add_step<S: PipelineStep + 'static>(&mut self, step: S) -> &mut Self {
        self.steps.push(Box::new(step));
        self
    }

    /// Add a step (builder pattern).
    pub fn with_step<S: PipelineStep + 'static>(mut self, step: S) -> Self {
        self.add_step(step);
        self
    }

    /// Run the pipeline against `host`.
    ///
    /// Executes each step in order:
    /// 1. Run `validate_input`
    /// 2. Run `execute`
    /// 3. Run `validate_output`
    /// 4. Advance `state.phase` to the step's phase
    ///
    /// On failure `state.phase` becomes [`RunPhase::Failed`], the logger's
    /// tail is replayed, and the error is returned.
    pub fn run(
        &self,
        ctx: &Context,
        host: &mut dyn ProjectHost,
        state: &mut RunState,
    ) -> PipelineResult<PipelineRunResult> {
        let mut result = PipelineRunResult {
            steps_completed: Vec::new(),
        };

        let total_steps = self.steps.len().max(1);

        for (i, step) in self.steps.iter().enumerate() {
            let step_name = step.name();
            ctx.logger.phase(step_name);

            let percent = ((i as f64 / total_steps as f64) * 100.0) as u32;
            ctx.report_progress(step_name, percent, step.description());

            if let Err(e) = self.run_step(step.as_ref(), ctx, host, state) {
                return Err(self.fail(ctx, state, step_name, e));
            }

            state.phase = step.reaches();
            ctx.logger.success(&format!("{} completed", step_name));
            result.steps_completed.push(step_name.to_string());
        }

        state.phase = RunPhase::Done;
        ctx.report_progress("Complete", 100, "Run finished");
        ctx.logger.success("Run completed successfully");

        Ok(result)
    }

    fn run_step(
        &self,
        step: &dyn PipelineStep,
        ctx: &Context,
        host: &mut dyn ProjectHost,
        state: &mut RunState,
    ) -> Result<(), StepError> {
        ctx.logger
            .debug(&format!("Validating input for '{}'", step.name()));
        step.validate_input(ctx, state)?;

        ctx.logger.debug(&format!("Executing '{}'", step.name()));
        step.execute(ctx, host, state)?;

        ctx.logger
            .debug(&format!("Validating output for '{}'", step.name()));
        step.validate_output(ctx, state)
    }

    fn fail(
        &self,
        ctx: &Context,
        state: &mut RunState,
        step_name: &str,
        error: StepError,
    ) -> PipelineError {
        ctx.logger.error(&format!("{} failed: {}", step_name, error));
        state.phase = RunPhase::Failed {
            step: step_name.to_string(),
            reason: error.to_string(),
        };
        ctx.logger.show_tail("Run log tail");
        PipelineError::step_failed(&ctx.run_name, step_name, error)
    }

    /// Get the number of steps in the pipeline.
    pub fn step_count(&self) -> usize {
        self.steps.len()
    }

    /// Get step names in order.
    pub fn step_names(&self) -> Vec<&str> {
        self.steps.iter().map(|s| s.name()).collect()
    }
}

impl Default for Pipeline {
    fn default() -> Self {
        Self::new()
    }
}

/// Result of a pipeline run.
#[derive(Debug, Clone)]
pub struct PipelineRunResult {
    /// Steps that completed successfully.
    pub steps_completed: Vec<String>,
}

impl PipelineRunResult {
    /// Total number of steps that ran.
    pub fn total_steps(&self) -> usize {
        self.steps_completed.len()
    }
}
