//! Modality step - derives the workout modality from the folder name.

use crate::classify::classify_modality;
use crate::error::ResolveError;
use crate::orchestrator::errors::{StepError, StepResult};
use crate::orchestrator::step::PipelineStep;
use crate::orchestrator::types::{Context, RunPhase, RunState};
use crate::project::ProjectHost;

/// Resolves the modality keyword contained in the selected folder's name.
pub struct ModalityStep;

impl ModalityStep {
    pub fn new() -> Self {
        Self
    }
}

impl Default for ModalityStep {
    fn default() -> Self {
        Self::new()
    }
}

impl PipelineStep for ModalityStep {
    fn name(&self) -> &str {
        "Modality"
    }

    fn description(&self) -> &str {
        "Determine modality from folder name"
    }

    fn reaches(&self) -> RunPhase {
        RunPhase::ModalityResolved
    }

    fn validate_input(&self, ctx: &Context, _state: &RunState) -> StepResult<()> {
        ctx.folder_name().map(|_| ())
    }

    fn execute(
        &self,
        ctx: &Context,
        _host: &mut dyn ProjectHost,
        state: &mut RunState,
    ) -> StepResult<()> {
        let folder = ctx.folder_name()?;
        let modality = classify_modality(folder)
            .ok_or_else(|| ResolveError::modality_undetermined(folder))?;

        ctx.logger
            .info(&format!("Folder '{}' is a {} workout", folder, modality));
        state.modality = Some(modality);
        Ok(())
    }

    fn validate_output(&self, _ctx: &Context, state: &RunState) -> StepResult<()> {
        if state.modality.is_none() {
            return Err(StepError::invalid_output("Modality not recorded"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classify::Modality;
    use crate::orchestrator::steps::test_support::context;
    use crate::project::MemoryProject;

    #[test]
    fn records_modality() {
        let ctx = context("Cardio_Blast", &[]);
        let mut host = MemoryProject::new("Root");
        let mut state = RunState::new("t");

        ModalityStep::new()
            .execute(&ctx, &mut host, &mut state)
            .unwrap();
        assert_eq!(state.modality, Some(Modality::Cardio));
    }

    #[test]
    fn unknown_folder_is_undetermined() {
        let ctx = context("Leg_Day", &[]);
        let mut host = MemoryProject::new("Root");
        let mut state = RunState::new("t");

        let err = ModalityStep::new()
            .execute(&ctx, &mut host, &mut state)
            .unwrap_err();
        assert_eq!(
            err,
            StepError::Resolve(ResolveError::modality_undetermined("Leg_Day"))
        );
        assert!(state.modality.is_none());
    }
}
