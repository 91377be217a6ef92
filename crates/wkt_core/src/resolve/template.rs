//! Template sequence lookup.
//!
//! Strategies, in order:
//! 1. Search the project tree for a sequence item matching the name. This
//!    covers templates stored at any bin depth.
//! 2. If that item has no loaded sequence, scan the flat registry of loaded
//!    sequences with the same matching rule.
//! 3. If the tree has no matching item at all, scan the registry as well.
//!
//! Partial matching can pick an unintended sequence when several names
//! share a substring; the first one found is used.

use serde::{Deserialize, Serialize};

use crate::error::ResolveError;
use crate::naming::{match_normalized, normalize, MatchKind};
use crate::project::{ItemId, Node, SequenceEntry, SequenceHandle};
use crate::search::{find_by_name, walk};

/// Which strategy produced the template.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TemplateSource {
    /// Sequence item found in the project tree.
    Tree,
    /// Tree item was found but not loaded; registry entry used instead.
    RegistryFallback,
    /// No tree item; registry entry used.
    RegistryScan,
}

/// A template sequence ready to be cloned.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedSequence {
    pub name: String,
    pub handle: SequenceHandle,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub item: Option<ItemId>,
    pub source: TemplateSource,
    pub matched: MatchKind,
}

/// Find the registry entry matching `name`, exact matches first.
pub fn find_in_registry<'a>(
    registry: &'a [SequenceEntry],
    name: &str,
) -> Option<(&'a SequenceEntry, MatchKind)> {
    let query = normalize(name);
    let mut partial = None;
    for entry in registry {
        match match_normalized(&entry.name, &query) {
            Some(MatchKind::Exact) => return Some((entry, MatchKind::Exact)),
            Some(MatchKind::Partial) if partial.is_none() => partial = Some(entry),
            _ => {}
        }
    }
    partial.map(|entry| (entry, MatchKind::Partial))
}

/// Resolve `template_name` against a tree snapshot and the sequence registry.
pub fn resolve_template(
    root: &Node,
    template_name: &str,
    registry: &[SequenceEntry],
) -> Result<ResolvedSequence, ResolveError> {
    let source = match find_by_name(root, template_name, Node::is_sequence) {
        Some(found) => match found.node.sequence_handle() {
            Some(handle) => {
                tracing::debug!(
                    "Template '{}' found in tree as '{}'",
                    template_name,
                    found.node.name()
                );
                return Ok(ResolvedSequence {
                    name: found.node.name().to_string(),
                    handle,
                    item: Some(found.node.id()),
                    source: TemplateSource::Tree,
                    matched: found.kind,
                });
            }
            None => {
                tracing::debug!(
                    "Template item '{}' has no loaded sequence, scanning registry",
                    found.node.name()
                );
                TemplateSource::RegistryFallback
            }
        },
        None => TemplateSource::RegistryScan,
    };

    match find_in_registry(registry, template_name) {
        Some((entry, matched)) => Ok(ResolvedSequence {
            name: entry.name.clone(),
            handle: entry.handle,
            item: entry.item,
            source,
            matched,
        }),
        None => Err(ResolveError::template_not_found(
            template_name,
            known_sequences(root, registry),
        )),
    }
}

/// Registry names, then tree sequence items the registry does not list.
fn known_sequences(root: &Node, registry: &[SequenceEntry]) -> Vec<String> {
    let mut known: Vec<String> = Vec::new();
    let tree_names = walk(root)
        .into_iter()
        .filter(|node| node.is_sequence())
        .map(|node| node.name());
    for name in registry.iter().map(|e| e.name.as_str()).chain(tree_names) {
        if !known.iter().any(|k| k == name) {
            known.push(name.to_string());
        }
    }
    known
}
