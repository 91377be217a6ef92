//! Classify step - assigns discovered files to their roles.

use crate::classify::classify_files;
use crate::orchestrator::errors::{StepError, StepResult};
use crate::orchestrator::step::PipelineStep;
use crate::orchestrator::types::{Context, RunPhase, RunState};
use crate::project::ProjectHost;

/// Picks the primary video, secondary video, and playlist audio.
pub struct ClassifyAssetsStep;

impl ClassifyAssetsStep {
    pub fn new() -> Self {
        Self
    }
}

impl Default for ClassifyAssetsStep {
    fn default() -> Self {
        Self::new()
    }
}

impl PipelineStep for ClassifyAssetsStep {
    fn name(&self) -> &str {
        "ClassifyAssets"
    }

    fn description(&self) -> &str {
        "Assign folder files to video and playlist roles"
    }

    fn reaches(&self) -> RunPhase {
        RunPhase::FilesClassified
    }

    fn validate_input(&self, _ctx: &Context, state: &RunState) -> StepResult<()> {
        state.require_modality().map(|_| ())
    }

    fn execute(
        &self,
        ctx: &Context,
        _host: &mut dyn ProjectHost,
        state: &mut RunState,
    ) -> StepResult<()> {
        ctx.logger
            .debug(&format!("Classifying {} file(s)", ctx.request.files.len()));

        let assets = classify_files(&ctx.request.files, &ctx.settings.media.asset_patterns())?;

        ctx.logger
            .info(&format!("Primary video: {}", assets.video_primary.display()));
        ctx.logger
            .info(&format!("Secondary video: {}", assets.video_secondary.display()));
        ctx.logger
            .info(&format!("Playlist: {}", assets.playlist.display()));

        state.assets = Some(assets);
        Ok(())
    }

    fn validate_output(&self, _ctx: &Context, state: &RunState) -> StepResult<()> {
        if state.assets.is_none() {
            return Err(StepError::invalid_output("Assets not recorded"));
        }
        Ok(())
    }
}
