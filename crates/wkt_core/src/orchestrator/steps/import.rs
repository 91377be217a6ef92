//! Import step - imports the classified assets into the resolved bin.
//!
//! The host does not report what an import created, so the bin's children
//! are captured immediately before the import and compared afterwards.

use crate::orchestrator::errors::{StepError, StepResult};
use crate::orchestrator::step::PipelineStep;
use crate::orchestrator::types::{Context, ImportedItem, RunPhase, RunState};
use crate::project::{Container, Node, ProjectHost};
use crate::resolve::RegistrySnapshot;
use crate::search::find_all_direct_children;

/// Imports primary video, secondary video, and playlist, in that order.
///
/// A re-run imports the assets again into the reused bin, so the bin then
/// holds a second copy of each.
pub struct ImportStep;

impl ImportStep {
    pub fn new() -> Self {
        Self
    }
}

impl Default for ImportStep {
    fn default() -> Self {
        Self::new()
    }
}

impl PipelineStep for ImportStep {
    fn name(&self) -> &str {
        "Import"
    }

    fn description(&self) -> &str {
        "Import assets into the destination bin"
    }

    fn reaches(&self) -> RunPhase {
        RunPhase::ItemsImported
    }

    fn validate_input(&self, _ctx: &Context, state: &RunState) -> StepResult<()> {
        state.require_assets()?;
        state.require_bin().map(|_| ())
    }

    fn execute(
        &self,
        ctx: &Context,
        host: &mut dyn ProjectHost,
        state: &mut RunState,
    ) -> StepResult<()> {
        let bin = state.require_bin()?.clone();
        let paths = state.require_assets()?.import_order();

        let before = host.list_children(bin.id)?;
        let snapshot = RegistrySnapshot::capture("imported item", before.iter(), Node::id);

        host.import_files(&paths, bin.id)?;

        let listing = Node::Container(Container {
            id: bin.id,
            name: bin.name.clone(),
            children: host.list_children(bin.id)?,
        });
        let media: Vec<Node> = find_all_direct_children(&listing, |n| !n.is_container())
            .into_iter()
            .cloned()
            .collect();
        let fresh = snapshot.identify_all_new(&media, Node::id)?;

        state.imported = fresh
            .into_iter()
            .map(|node| ImportedItem {
                id: node.id(),
                name: node.name().to_string(),
            })
            .collect();

        ctx.logger.info(&format!(
            "Imported {} item(s) into '{}'",
            state.imported.len(),
            bin.name
        ));
        for item in &state.imported {
            ctx.logger.debug(&format!("  {} ({})", item.name, item.id));
        }
        Ok(())
    }

    fn validate_output(&self, _ctx: &Context, state: &RunState) -> StepResult<()> {
        if state.imported.is_empty() {
            return Err(StepError::invalid_output("No imported items recorded"));
        }
        Ok(())
    }
}
