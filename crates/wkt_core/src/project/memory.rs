//! In-memory project host.
//!
//! Holds a project as a flat arena of items plus a sequence registry and
//! implements [`ProjectHost`] over it. Used by the tests and by the CLI to
//! rehearse a run against a project snapshot saved as JSON.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::{
    Container, HostError, HostResult, ItemId, ItemKind, Leaf, Node, ProjectHost, SequenceEntry,
    SequenceHandle,
};

#[derive(Debug, Clone, Serialize, Deserialize)]
struct MemoryItem {
    id: ItemId,
    name: String,
    parent: Option<ItemId>,
    kind: ItemKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    sequence: Option<SequenceHandle>,
    #[serde(default)]
    locked: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct MemorySequence {
    handle: SequenceHandle,
    name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    item: Option<ItemId>,
    #[serde(default)]
    locked: bool,
}

/// A project held entirely in memory.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MemoryProject {
    root: ItemId,
    next_id: u64,
    items: Vec<MemoryItem>,
    #[serde(default)]
    sequences: Vec<MemorySequence>,
}

impl MemoryProject {
    /// Create an empty project with a root bin.
    pub fn new(root_name: impl Into<String>) -> Self {
        let root = ItemId(1);
        Self {
            root,
            next_id: 2,
            items: vec![MemoryItem {
                id: root,
                name: root_name.into(),
                parent: None,
                kind: ItemKind::Bin,
                sequence: None,
                locked: false,
            }],
            sequences: Vec::new(),
        }
    }

    /// Load a project snapshot from JSON.
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }

    /// Serialize the project to pretty JSON.
    pub fn to_json_pretty(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    /// Identifier of the root bin.
    pub fn root_id(&self) -> ItemId {
        self.root
    }

    /// Add a bin under `parent`.
    pub fn add_bin(&mut self, parent: ItemId, name: &str) -> HostResult<ItemId> {
        self.insert_item(parent, name, ItemKind::Bin, None)
    }

    /// Add a media clip under `parent`.
    pub fn add_clip(&mut self, parent: ItemId, name: &str) -> HostResult<ItemId> {
        self.insert_item(parent, name, ItemKind::Clip, None)
    }

    /// Add a loaded sequence with a project item under `parent`.
    pub fn add_sequence(
        &mut self,
        parent: ItemId,
        name: &str,
    ) -> HostResult<(ItemId, SequenceHandle)> {
        let handle = self.allocate_sequence();
        let item = self.insert_item(parent, name, ItemKind::Sequence, Some(handle))?;
        self.sequences.push(MemorySequence {
            handle,
            name: name.to_string(),
            item: Some(item),
            locked: false,
        });
        Ok((item, handle))
    }

    /// Add a sequence item whose sequence is not loaded.
    pub fn add_offline_sequence(&mut self, parent: ItemId, name: &str) -> HostResult<ItemId> {
        self.insert_item(parent, name, ItemKind::Sequence, None)
    }

    /// Register a loaded sequence that has no item in the tree.
    pub fn open_sequence(&mut self, name: &str) -> SequenceHandle {
        let handle = self.allocate_sequence();
        self.sequences.push(MemorySequence {
            handle,
            name: name.to_string(),
            item: None,
            locked: false,
        });
        handle
    }

    /// Lock a project item so renames are rejected.
    pub fn lock_item(&mut self, id: ItemId) -> HostResult<()> {
        self.item_mut(id)?.locked = true;
        Ok(())
    }

    /// Lock a sequence so renames are rejected.
    pub fn lock_sequence(&mut self, handle: SequenceHandle) -> HostResult<()> {
        self.sequence_mut(handle)?.locked = true;
        Ok(())
    }

    /// Current name of a project item.
    pub fn item_name(&self, id: ItemId) -> Option<&str> {
        self.items
            .iter()
            .find(|i| i.id == id)
            .map(|i| i.name.as_str())
    }

    /// Current name of a sequence.
    pub fn sequence_name(&self, handle: SequenceHandle) -> Option<&str> {
        self.sequences
            .iter()
            .find(|s| s.handle == handle)
            .map(|s| s.name.as_str())
    }

    /// Parent bin of a project item.
    pub fn parent_of(&self, id: ItemId) -> Option<ItemId> {
        self.items.iter().find(|i| i.id == id).and_then(|i| i.parent)
    }

    /// Total number of project items, root included.
    pub fn item_count(&self) -> usize {
        self.items.len()
    }

    fn allocate_id(&mut self) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    fn allocate_sequence(&mut self) -> SequenceHandle {
        SequenceHandle(self.allocate_id())
    }

    fn insert_item(
        &mut self,
        parent: ItemId,
        name: &str,
        kind: ItemKind,
        sequence: Option<SequenceHandle>,
    ) -> HostResult<ItemId> {
        self.require_bin(parent)?;
        let id = ItemId(self.allocate_id());
        self.items.push(MemoryItem {
            id,
            name: name.to_string(),
            parent: Some(parent),
            kind,
            sequence,
            locked: false,
        });
        Ok(id)
    }

    fn item(&self, id: ItemId) -> HostResult<&MemoryItem> {
        self.items
            .iter()
            .find(|i| i.id == id)
            .ok_or(HostError::UnknownItem(id))
    }

    fn item_mut(&mut self, id: ItemId) -> HostResult<&mut MemoryItem> {
        self.items
            .iter_mut()
            .find(|i| i.id == id)
            .ok_or(HostError::UnknownItem(id))
    }

    fn sequence_mut(&mut self, handle: SequenceHandle) -> HostResult<&mut MemorySequence> {
        self.sequences
            .iter_mut()
            .find(|s| s.handle == handle)
            .ok_or(HostError::UnknownSequence(handle))
    }

    fn require_bin(&self, id: ItemId) -> HostResult<()> {
        match self.item(id)?.kind {
            ItemKind::Bin => Ok(()),
            _ => Err(HostError::NotAContainer(id)),
        }
    }

    fn build_node(&self, item: &MemoryItem) -> Node {
        match item.kind {
            ItemKind::Bin => Node::Container(Container {
                id: item.id,
                name: item.name.clone(),
                children: self.child_nodes(item.id),
            }),
            _ => Node::Leaf(Leaf {
                id: item.id,
                name: item.name.clone(),
                kind: item.kind.clone(),
                sequence: item.sequence,
            }),
        }
    }

    fn child_nodes(&self, parent: ItemId) -> Vec<Node> {
        self.items
            .iter()
            .filter(|i| i.parent == Some(parent))
            .map(|i| self.build_node(i))
            .collect()
    }
}

fn import_name(path: &Path) -> HostResult<String> {
    path.file_name()
        .map(|n| n.to_string_lossy().to_string())
        .ok_or_else(|| HostError::rejected("import", format!("'{}' has no file name", path.display())))
}

impl ProjectHost for MemoryProject {
    fn root(&self) -> HostResult<Node> {
        let root = self.item(self.root)?;
        Ok(self.build_node(root))
    }

    fn list_children(&self, container: ItemId) -> HostResult<Vec<Node>> {
        self.require_bin(container)?;
        Ok(self.child_nodes(container))
    }

    fn create_container(&mut self, parent: ItemId, name: &str) -> HostResult<Node> {
        let id = self.add_bin(parent, name)?;
        let item = self.item(id)?;
        Ok(self.build_node(item))
    }

    fn import_files(&mut self, paths: &[PathBuf], destination: ItemId) -> HostResult<()> {
        self.require_bin(destination)?;
        let names = paths
            .iter()
            .map(|p| import_name(p))
            .collect::<HostResult<Vec<_>>>()?;
        for name in names {
            self.add_clip(destination, &name)?;
        }
        Ok(())
    }

    fn clone_sequence(&mut self, sequence: SequenceHandle) -> HostResult<()> {
        let original = self
            .sequences
            .iter()
            .find(|s| s.handle == sequence)
            .cloned()
            .ok_or(HostError::UnknownSequence(sequence))?;

        let name = format!("{} Copy", original.name);
        let handle = self.allocate_sequence();

        // The clone's item lands beside the original's, or in the root bin.
        let parent = original
            .item
            .and_then(|id| self.parent_of(id))
            .unwrap_or(self.root);
        let item = self.insert_item(parent, &name, ItemKind::Sequence, Some(handle))?;

        self.sequences.push(MemorySequence {
            handle,
            name,
            item: Some(item),
            locked: false,
        });
        Ok(())
    }

    fn rename_sequence(&mut self, sequence: SequenceHandle, new_name: &str) -> HostResult<()> {
        let seq = self.sequence_mut(sequence)?;
        if seq.locked {
            return Err(HostError::rejected("rename", format!("{} is locked", sequence)));
        }
        seq.name = new_name.to_string();
        Ok(())
    }

    fn rename_item(&mut self, item: ItemId, new_name: &str) -> HostResult<()> {
        let entry = self.item_mut(item)?;
        if entry.locked {
            return Err(HostError::rejected("rename", format!("{} is locked", item)));
        }
        entry.name = new_name.to_string();
        Ok(())
    }

    fn list_all_sequences(&self) -> HostResult<Vec<SequenceEntry>> {
        Ok(self
            .sequences
            .iter()
            .map(|s| SequenceEntry {
                name: s.name.clone(),
                handle: s.handle,
                item: s.item,
            })
            .collect())
    }
}
