//! Rename step - gives the duplicate the folder's name.
//!
//! Rename failures never fail the run. Each rejected rename is recorded as
//! a [`RunWarning`] and the duplicate keeps its previous name.

use crate::error::{RenameTarget, RunWarning};
use crate::orchestrator::errors::{StepError, StepResult};
use crate::orchestrator::step::PipelineStep;
use crate::orchestrator::types::{Context, RenameOutput, RunPhase, RunState};
use crate::project::{HostResult, ItemId, ProjectHost, SequenceEntry};
use crate::search::find;

/// Renames the duplicated sequence and its project item.
pub struct RenameStep;

impl RenameStep {
    pub fn new() -> Self {
        Self
    }
}

impl Default for RenameStep {
    fn default() -> Self {
        Self::new()
    }
}

impl PipelineStep for RenameStep {
    fn name(&self) -> &str {
        "Rename"
    }

    fn description(&self) -> &str {
        "Rename the duplicated sequence"
    }

    fn reaches(&self) -> RunPhase {
        RunPhase::Renamed
    }

    fn validate_input(&self, _ctx: &Context, state: &RunState) -> StepResult<()> {
        state.require_modality()?;
        state.require_duplicate().map(|_| ())
    }

    fn execute(
        &self,
        ctx: &Context,
        host: &mut dyn ProjectHost,
        state: &mut RunState,
    ) -> StepResult<()> {
        let name = ctx.duplicate_name(state.require_modality()?)?;
        let duplicate = state.require_duplicate()?.clone();

        let sequence_renamed = record(
            ctx,
            state,
            RenameTarget::Sequence,
            &name,
            host.rename_sequence(duplicate.handle, &name),
        );

        let item_renamed = match item_for(host, &duplicate) {
            Ok(Some(item)) => record(
                ctx,
                state,
                RenameTarget::ProjectItem,
                &name,
                host.rename_item(item, &name),
            ),
            Ok(None) => {
                ctx.logger.debug(&format!(
                    "No project item references {}; only the sequence was renamed",
                    duplicate.handle
                ));
                false
            }
            Err(e) => record(ctx, state, RenameTarget::ProjectItem, &name, Err(e)),
        };

        if sequence_renamed || item_renamed {
            ctx.logger.info(&format!("Renamed duplicate to '{}'", name));
        }
        state.rename = Some(RenameOutput {
            name,
            sequence_renamed,
            item_renamed,
        });
        Ok(())
    }

    fn validate_output(&self, _ctx: &Context, state: &RunState) -> StepResult<()> {
        if state.rename.is_none() {
            return Err(StepError::invalid_output("Rename outcome not recorded"));
        }
        Ok(())
    }
}

/// Project item referencing the duplicate.
///
/// Uses the registry's reference when present, otherwise searches the tree.
fn item_for(host: &dyn ProjectHost, duplicate: &SequenceEntry) -> HostResult<Option<ItemId>> {
    if duplicate.item.is_some() {
        return Ok(duplicate.item);
    }
    let root = host.root()?;
    Ok(find(&root, |node| node.sequence_handle() == Some(duplicate.handle)).map(|node| node.id()))
}

fn record(
    ctx: &Context,
    state: &mut RunState,
    target: RenameTarget,
    name: &str,
    result: HostResult<()>,
) -> bool {
    match result {
        Ok(()) => true,
        Err(e) => {
            let warning = RunWarning::RenameFailed {
                target,
                name: name.to_string(),
                reason: e.to_string(),
            };
            ctx.logger.warn(&warning.to_string());
            state.warnings.push(warning);
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classify::Modality;
    use crate::orchestrator::steps::test_support::context;
    use crate::project::{HostError, MemoryProject, Node, SequenceHandle};
    use std::path::PathBuf;

    fn state_for(host: &mut MemoryProject, locked: bool) -> (RunState, SequenceEntry) {
        let (item, handle) = host
            .add_sequence(host.root_id(), "MASTER_b3_Cardio_Template Copy")
            .unwrap();
        if locked {
            host.lock_sequence(handle).unwrap();
        }
        let entry = SequenceEntry {
            name: "MASTER_b3_Cardio_Template Copy".to_string(),
            handle,
            item: Some(item),
        };
        let mut state = RunState::new("t");
        state.modality = Some(Modality::Cardio);
        state.duplicate = Some(entry.clone());
        (state, entry)
    }

    #[test]
    fn renames_sequence_and_item() {
        let ctx = context("Cardio_Blast", &[]);
        let mut host = MemoryProject::new("Root");
        let (mut state, entry) = state_for(&mut host, false);

        RenameStep::new()
            .execute(&ctx, &mut host, &mut state)
            .unwrap();

        assert_eq!(host.sequence_name(entry.handle), Some("Cardio_Blast"));
        assert_eq!(host.item_name(entry.item.unwrap()), Some("Cardio_Blast"));
        assert!(state.warnings.is_empty());
        let rename = state.rename.unwrap();
        assert!(rename.sequence_renamed && rename.item_renamed);
    }

    #[test]
    fn rejected_rename_is_a_warning() {
        let ctx = context("Cardio_Blast", &[]);
        let mut host = MemoryProject::new("Root");
        let (mut state, entry) = state_for(&mut host, true);

        RenameStep::new()
            .execute(&ctx, &mut host, &mut state)
            .unwrap();

        assert_eq!(
            host.sequence_name(entry.handle),
            Some("MASTER_b3_Cardio_Template Copy")
        );
        assert_eq!(state.warnings.len(), 1);
        assert!(matches!(
            &state.warnings[0],
            RunWarning::RenameFailed { target: RenameTarget::Sequence, name, .. } if name == "Cardio_Blast"
        ));
        assert!(!state.rename.unwrap().sequence_renamed);
    }

    #[test]
    fn finds_item_through_tree_when_registry_has_none() {
        let ctx = context("Cardio_Blast", &[]);
        let mut host = MemoryProject::new("Root");
        let (mut state, entry) = state_for(&mut host, false);
        state.duplicate = Some(SequenceEntry {
            item: None,
            ..entry.clone()
        });

        RenameStep::new()
            .execute(&ctx, &mut host, &mut state)
            .unwrap();
        assert_eq!(host.item_name(entry.item.unwrap()), Some("Cardio_Blast"));
    }

    /// Host whose tree snapshot is unavailable.
    struct NoTree(MemoryProject);

    impl ProjectHost for NoTree {
        fn root(&self) -> HostResult<Node> {
            Err(HostError::rejected("root", "project tree unavailable"))
        }

        fn list_children(&self, container: ItemId) -> HostResult<Vec<Node>> {
            self.0.list_children(container)
        }

        fn create_container(&mut self, parent: ItemId, name: &str) -> HostResult<Node> {
            self.0.create_container(parent, name)
        }

        fn import_files(&mut self, paths: &[PathBuf], destination: ItemId) -> HostResult<()> {
            self.0.import_files(paths, destination)
        }

        fn clone_sequence(&mut self, sequence: SequenceHandle) -> HostResult<()> {
            self.0.clone_sequence(sequence)
        }

        fn rename_sequence(&mut self, sequence: SequenceHandle, new_name: &str) -> HostResult<()> {
            self.0.rename_sequence(sequence, new_name)
        }

        fn rename_item(&mut self, item: ItemId, new_name: &str) -> HostResult<()> {
            self.0.rename_item(item, new_name)
        }

        fn list_all_sequences(&self) -> HostResult<Vec<SequenceEntry>> {
            self.0.list_all_sequences()
        }
    }

    #[test]
    fn failed_item_lookup_is_a_warning() {
        let ctx = context("Cardio_Blast", &[]);
        let mut project = MemoryProject::new("Root");
        let (mut state, entry) = state_for(&mut project, false);
        state.duplicate = Some(SequenceEntry {
            item: None,
            ..entry.clone()
        });
        let mut host = NoTree(project);

        RenameStep::new()
            .execute(&ctx, &mut host, &mut state)
            .unwrap();

        assert_eq!(host.0.sequence_name(entry.handle), Some("Cardio_Blast"));
        assert_eq!(
            host.0.item_name(entry.item.unwrap()),
            Some("MASTER_b3_Cardio_Template Copy")
        );
        assert_eq!(state.warnings.len(), 1);
        assert!(matches!(
            &state.warnings[0],
            RunWarning::RenameFailed { target: RenameTarget::ProjectItem, reason, .. }
                if reason.contains("project tree unavailable")
        ));
        let rename = state.rename.unwrap();
        assert!(rename.sequence_renamed);
        assert!(!rename.item_renamed);
    }
}
