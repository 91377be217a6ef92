//! Pipeline step trait definition.
//!
//! All pipeline steps implement this trait, providing a consistent
//! interface for validation and execution.

use super::errors::StepResult;
use super::types::{Context, RunPhase, RunState};
use crate::project::ProjectHost;

/// Trait for pipeline steps.
///
/// Each step in the pipeline implements this trait. The pipeline runner
/// calls these methods in order:
///
/// 1. `validate_input` - Check preconditions before execution
/// 2. `execute` - Perform the step's work against the host
/// 3. `validate_output` - Verify the step recorded its result
///
/// After all three pass, the run moves to [`PipelineStep::reaches`].
///
/// # Example
///
/// ```ignore
/// struct ModalityStep;
///
/// impl PipelineStep for ModalityStep {
///     fn name(&self) -> &str { "Modality" }
///
///     fn reaches(&self) -> RunPhase { RunPhase::ModalityResolved }
///
///     fn validate_input(&self, ctx: &Context, _state: &RunState) -> StepResult<()> {
///         ctx.folder_name().map(|_| ())
///     }
///
///     fn execute(&self, ctx: &Context, _host: &mut dyn ProjectHost, state: &mut RunState) -> StepResult<()> {
///         state.modality = classify_modality(ctx.folder_name()?);
///         Ok(())
///     }
///
///     fn validate_output(&self, _ctx: &Context, state: &RunState) -> StepResult<()> {
///         state.require_modality().map(|_| ())
///     }
/// }
/// ```
pub trait PipelineStep: Send + Sync {
    /// Get the step name (for logging and error context).
    fn name(&self) -> &str;

    /// Phase the run is in once this step has completed.
    fn reaches(&self) -> RunPhase;

    /// Validate inputs before execution.
    ///
    /// Should check that the request carries what the step needs and that
    /// earlier steps recorded their results in `state`.
    fn validate_input(&self, ctx: &Context, state: &RunState) -> StepResult<()>;

    /// Execute the step's main work.
    ///
    /// Should perform the step's host calls and record results in `state`.
    /// Use `ctx.logger` for logging.
    fn execute(
        &self,
        ctx: &Context,
        host: &mut dyn ProjectHost,
        state: &mut RunState,
    ) -> StepResult<()>;

    /// Validate outputs after execution.
    fn validate_output(&self, ctx: &Context, state: &RunState) -> StepResult<()>;

    /// Human-readable description of what this step does.
    fn description(&self) -> &str {
        self.name()
    }
}
