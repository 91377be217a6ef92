//! Bin step - finds or creates the bin the assets are imported into.

use crate::orchestrator::errors::{StepError, StepResult};
use crate::orchestrator::step::PipelineStep;
use crate::orchestrator::types::{Context, RunPhase, RunState};
use crate::project::ProjectHost;
use crate::resolve::resolve_or_create_bin;

/// Reuses a bin matching the folder name, or creates one at the top level.
///
/// Re-running on the same folder reuses the bin created by the first run.
pub struct ResolveBinStep;

impl ResolveBinStep {
    pub fn new() -> Self {
        Self
    }
}

impl Default for ResolveBinStep {
    fn default() -> Self {
        Self::new()
    }
}

impl PipelineStep for ResolveBinStep {
    fn name(&self) -> &str {
        "ResolveBin"
    }

    fn description(&self) -> &str {
        "Find or create the destination bin"
    }

    fn reaches(&self) -> RunPhase {
        RunPhase::BinResolved
    }

    fn validate_input(&self, _ctx: &Context, state: &RunState) -> StepResult<()> {
        state.require_modality()?;
        state.require_assets().map(|_| ())
    }

    fn execute(
        &self,
        ctx: &Context,
        host: &mut dyn ProjectHost,
        state: &mut RunState,
    ) -> StepResult<()> {
        let name = ctx.bin_name(state.require_modality()?)?;
        let root = host.root()?;
        let root_id = root.id();

        let bin = resolve_or_create_bin(&root, &name, |bin_name| {
            host.create_container(root_id, bin_name)
        })?;

        if bin.created {
            ctx.logger.info(&format!("Created bin '{}'", bin.name));
        } else {
            ctx.logger.info(&format!("Using existing bin '{}'", bin.name));
        }

        state.bin = Some(bin);
        Ok(())
    }

    fn validate_output(&self, _ctx: &Context, state: &RunState) -> StepResult<()> {
        if state.bin.is_none() {
            return Err(StepError::invalid_output("Bin not recorded"));
        }
        Ok(())
    }
}
