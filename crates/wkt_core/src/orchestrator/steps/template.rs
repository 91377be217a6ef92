//! Template step - locates the modality's template sequence.

use crate::orchestrator::errors::{StepError, StepResult};
use crate::orchestrator::step::PipelineStep;
use crate::orchestrator::types::{Context, RunPhase, RunState};
use crate::project::ProjectHost;
use crate::resolve::{resolve_template, TemplateSource};

/// Looks the template up in the project tree, then in the sequence registry.
pub struct ResolveTemplateStep;

impl ResolveTemplateStep {
    pub fn new() -> Self {
        Self
    }
}

impl Default for ResolveTemplateStep {
    fn default() -> Self {
        Self::new()
    }
}

impl PipelineStep for ResolveTemplateStep {
    fn name(&self) -> &str {
        "ResolveTemplate"
    }

    fn description(&self) -> &str {
        "Locate the template sequence"
    }

    fn reaches(&self) -> RunPhase {
        RunPhase::TemplateResolved
    }

    fn validate_input(&self, _ctx: &Context, state: &RunState) -> StepResult<()> {
        state.require_modality().map(|_| ())
    }

    fn execute(
        &self,
        ctx: &Context,
        host: &mut dyn ProjectHost,
        state: &mut RunState,
    ) -> StepResult<()> {
        let name = ctx.template_name(state.require_modality()?)?;
        let root = host.root()?;
        let registry = host.list_all_sequences()?;

        let template = resolve_template(&root, &name, &registry)?;
        match template.source {
            TemplateSource::Tree => ctx
                .logger
                .info(&format!("Template '{}' found in project", template.name)),
            TemplateSource::RegistryFallback | TemplateSource::RegistryScan => {
                ctx.logger.info(&format!(
                    "Template '{}' found among loaded sequences",
                    template.name
                ))
            }
        }

        state.template = Some(template);
        Ok(())
    }

    fn validate_output(&self, _ctx: &Context, state: &RunState) -> StepResult<()> {
        if state.template.is_none() {
            return Err(StepError::invalid_output("Template not recorded"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classify::Modality;
    use crate::error::ResolveError;
    use crate::orchestrator::steps::test_support::context;
    use crate::project::MemoryProject;

    fn state() -> RunState {
        let mut state = RunState::new("t");
        state.modality = Some(Modality::Cardio);
        state
    }

    #[test]
    fn finds_template_in_tree() {
        let ctx = context("Cardio_Blast", &[]);
        let mut host = MemoryProject::new("Root");
        let templates = host.add_bin(host.root_id(), "Templates").unwrap();
        let (_, handle) = host
            .add_sequence(templates, "MASTER_b3_Cardio_Template")
            .unwrap();
        let mut state = state();

        ResolveTemplateStep::new()
            .execute(&ctx, &mut host, &mut state)
            .unwrap();
        let template = state.template.unwrap();
        assert_eq!(template.handle, handle);
        assert_eq!(template.source, TemplateSource::Tree);
    }

    #[test]
    fn missing_template_lists_known_sequences() {
        let ctx = context("Cardio_Blast", &[]);
        let mut host = MemoryProject::new("Root");
        host.add_sequence(host.root_id(), "MASTER_b3_Flow_Template")
            .unwrap();
        let mut state = state();

        let err = ResolveTemplateStep::new()
            .execute(&ctx, &mut host, &mut state)
            .unwrap_err();
        match err {
            StepError::Resolve(ResolveError::TemplateNotFound { name, known }) => {
                assert_eq!(name, "MASTER_b3_Cardio_Template");
                assert_eq!(known, vec!["MASTER_b3_Flow_Template".to_string()]);
            }
            other => panic!("unexpected error {:?}", other),
        }
    }
}
