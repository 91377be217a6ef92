//! Pipeline orchestrator for template duplication runs.
//!
//! A run takes a selected workout folder through a fixed sequence of
//! steps. Each step validates, executes against the host, and records its
//! result in [`RunState`].
//!
//! # Architecture
//!
//! ```text
//! Pipeline
//!     ├── Step: Modality         -> ModalityResolved
//!     ├── Step: ClassifyAssets   -> FilesClassified
//!     ├── Step: ResolveBin       -> BinResolved
//!     ├── Step: Import           -> ItemsImported
//!     ├── Step: ResolveTemplate  -> TemplateResolved
//!     ├── Step: Duplicate        -> Duplicated
//!     └── Step: Rename           -> Renamed
//! ```
//!
//! The run then ends in `Done`, or in `Failed` at the first failing step.
//!
//! # Example
//!
//! ```ignore
//! use wkt_core::orchestrator::{run_workflow, RunRequest};
//!
//! let request = RunRequest::from_folder(folder)?;
//! let report = run_workflow(request, settings, &mut project, logger);
//! for warning in &report.state.warnings {
//!     println!("{}", warning);
//! }
//! ```

mod errors;
mod pipeline;
mod step;
pub mod steps;
mod types;

use std::sync::Arc;

pub use errors::{PipelineError, PipelineResult, StepError, StepResult};
pub use pipeline::{Pipeline, PipelineRunResult};
pub use step::PipelineStep;
pub use steps::{
    ClassifyAssetsStep, DuplicateStep, ImportStep, ModalityStep, RenameStep, ResolveBinStep,
    ResolveTemplateStep,
};
pub use types::{
    Context, ImportedItem, ProgressCallback, RenameOutput, RunPhase, RunRequest, RunState,
};

use crate::config::Settings;
use crate::logging::RunLogger;
use crate::project::ProjectHost;

/// Create a standard pipeline with all steps in the correct order.
pub fn create_standard_pipeline() -> Pipeline {
    Pipeline::new()
        .with_step(ModalityStep::new())
        .with_step(ClassifyAssetsStep::new())
        .with_step(ResolveBinStep::new())
        .with_step(ImportStep::new())
        .with_step(ResolveTemplateStep::new())
        .with_step(DuplicateStep::new())
        .with_step(RenameStep::new())
}

/// Final state of a run together with its outcome.
#[derive(Debug)]
pub struct RunReport {
    /// Everything the run recorded, including warnings.
    pub state: RunState,
    pub result: PipelineResult<PipelineRunResult>,
}

impl RunReport {
    pub fn is_success(&self) -> bool {
        self.result.is_ok()
    }
}

/// Run the standard pipeline for one request.
///
/// Failures are reported in the returned [`RunReport`]; nothing created
/// before the failure is rolled back.
pub fn run_workflow(
    request: RunRequest,
    settings: Settings,
    host: &mut dyn ProjectHost,
    logger: Arc<RunLogger>,
) -> RunReport {
    run_with(Context::new(request, settings, logger.run_name().to_string(), logger), host)
}

/// Run the standard pipeline with a prepared context.
///
/// Use this to attach a progress callback.
pub fn run_with(ctx: Context, host: &mut dyn ProjectHost) -> RunReport {
    let mut state = RunState::new(ctx.run_name.clone());
    let result = create_standard_pipeline().run(&ctx, host, &mut state);
    ctx.logger.flush();
    RunReport { state, result }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_pipeline_order() {
        let pipeline = create_standard_pipeline();
        assert_eq!(
            pipeline.step_names(),
            vec![
                "Modality",
                "ClassifyAssets",
                "ResolveBin",
                "Import",
                "ResolveTemplate",
                "Duplicate",
                "Rename",
            ]
        );
    }
}
