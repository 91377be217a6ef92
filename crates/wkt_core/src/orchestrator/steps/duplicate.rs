//! Duplicate step - clones the template and identifies the clone.
//!
//! The host's clone call returns nothing, so the registry is captured
//! right before the call and the clone is the one handle that was not in
//! the capture.

use crate::orchestrator::errors::{StepError, StepResult};
use crate::orchestrator::step::PipelineStep;
use crate::orchestrator::types::{Context, RunPhase, RunState};
use crate::project::{ProjectHost, SequenceEntry};
use crate::resolve::RegistrySnapshot;

/// Clones the resolved template sequence.
pub struct DuplicateStep;

impl DuplicateStep {
    pub fn new() -> Self {
        Self
    }
}

impl Default for DuplicateStep {
    fn default() -> Self {
        Self::new()
    }
}

impl PipelineStep for DuplicateStep {
    fn name(&self) -> &str {
        "Duplicate"
    }

    fn description(&self) -> &str {
        "Clone the template sequence"
    }

    fn reaches(&self) -> RunPhase {
        RunPhase::Duplicated
    }

    fn validate_input(&self, _ctx: &Context, state: &RunState) -> StepResult<()> {
        state.require_template().map(|_| ())
    }

    fn execute(
        &self,
        ctx: &Context,
        host: &mut dyn ProjectHost,
        state: &mut RunState,
    ) -> StepResult<()> {
        let template = state.require_template()?.clone();

        let before = host.list_all_sequences()?;
        let snapshot =
            RegistrySnapshot::capture("duplicated sequence", before.iter(), |e: &SequenceEntry| {
                e.handle
            });

        host.clone_sequence(template.handle)?;

        let after = host.list_all_sequences()?;
        let duplicate = snapshot
            .identify_new(&after, |e: &SequenceEntry| e.handle)?
            .clone();

        ctx.logger.info(&format!(
            "Duplicated '{}' as '{}' ({})",
            template.name, duplicate.name, duplicate.handle
        ));
        state.duplicate = Some(duplicate);
        Ok(())
    }

    fn validate_output(&self, _ctx: &Context, state: &RunState) -> StepResult<()> {
        match (&state.duplicate, &state.template) {
            (Some(dup), Some(template)) if dup.handle == template.handle => Err(
                StepError::invalid_output("Duplicate is the template itself"),
            ),
            (Some(_), _) => Ok(()),
            (None, _) => Err(StepError::invalid_output("Duplicate not recorded")),
        }
    }
}
