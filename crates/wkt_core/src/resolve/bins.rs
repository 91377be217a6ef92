//! Find-or-create of the destination bin.

use serde::{Deserialize, Serialize};

use crate::naming::MatchKind;
use crate::project::{ItemId, Node};
use crate::search::find_by_name;

/// The bin a run imports into.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedBin {
    pub id: ItemId,
    pub name: String,
    /// Whether the bin was created by this resolution.
    pub created: bool,
    /// Quality of the name match for an existing bin.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub matched: Option<MatchKind>,
}

/// Find a bin matching `name` anywhere below `root`, or create one.
///
/// The root bin itself is never a candidate. `create` is only called when
/// no bin matches; it should create a top-level bin and return it.
pub fn resolve_or_create_bin<F, E>(root: &Node, name: &str, create: F) -> Result<ResolvedBin, E>
where
    F: FnOnce(&str) -> Result<Node, E>,
{
    let root_id = root.id();
    let found = find_by_name(root, name, |node| {
        node.is_container() && node.id() != root_id
    });

    if let Some(found) = found {
        tracing::debug!(
            "Bin '{}' matched existing '{}' ({:?})",
            name,
            found.node.name(),
            found.kind
        );
        return Ok(ResolvedBin {
            id: found.node.id(),
            name: found.node.name().to_string(),
            created: false,
            matched: Some(found.kind),
        });
    }

    let node = create(name)?;
    tracing::debug!("Bin '{}' created as {}", name, node.id());
    Ok(ResolvedBin {
        id: node.id(),
        name: node.name().to_string(),
        created: true,
        matched: None,
    })
}
