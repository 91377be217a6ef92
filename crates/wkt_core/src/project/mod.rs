//! Project tree model and the host collaborator interface.
//!
//! The host application owns the project: bins, clips, sequences and the
//! flat registry of loaded sequences. The core only ever sees fresh
//! snapshots of that state ([`Node`] trees, [`SequenceEntry`] lists) and
//! asks the host to mutate it through [`ProjectHost`].
//!
//! # Tree shape
//!
//! ```text
//! Container "Root"
//!     ├── Container "Templates"
//!     │       └── Leaf "MASTER_b3_Cardio_Template" (Sequence)
//!     ├── Container "Cardio_Blast"
//!     │       ├── Leaf "w1.mp4" (Clip)
//!     │       └── Leaf "playlist.mp3" (Clip)
//!     └── Leaf "Notes" (Other)
//! ```

mod memory;

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use memory::MemoryProject;

/// Host-assigned identifier of a project item (bin, clip, sequence item).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemId(pub u64);

impl std::fmt::Display for ItemId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "item#{}", self.0)
    }
}

/// Host handle to a loaded sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SequenceHandle(pub u64);

impl std::fmt::Display for SequenceHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "seq#{}", self.0)
    }
}

/// Kind tag of a leaf item.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemKind {
    /// A bin reported without its contents.
    Bin,
    /// A sequence (timeline).
    Sequence,
    /// A media clip.
    Clip,
    /// Any other media kind the host reports.
    Other(String),
}

impl std::fmt::Display for ItemKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ItemKind::Bin => write!(f, "bin"),
            ItemKind::Sequence => write!(f, "sequence"),
            ItemKind::Clip => write!(f, "clip"),
            ItemKind::Other(kind) => write!(f, "{}", kind),
        }
    }
}

/// A bin and its children.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Container {
    pub id: ItemId,
    pub name: String,
    /// Children in host display order.
    #[serde(default)]
    pub children: Vec<Node>,
}

/// A non-container item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Leaf {
    pub id: ItemId,
    pub name: String,
    pub kind: ItemKind,
    /// Loaded sequence behind a `Sequence` leaf. `None` when the host
    /// cannot resolve it (e.g. the sequence is not open).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sequence: Option<SequenceHandle>,
}

/// Node of a project tree snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Node {
    Container(Container),
    Leaf(Leaf),
}

impl Node {
    /// Item identifier of this node.
    pub fn id(&self) -> ItemId {
        match self {
            Node::Container(c) => c.id,
            Node::Leaf(l) => l.id,
        }
    }

    /// Display name of this node.
    pub fn name(&self) -> &str {
        match self {
            Node::Container(c) => &c.name,
            Node::Leaf(l) => &l.name,
        }
    }

    /// Children of a container; leaves have none.
    pub fn children(&self) -> &[Node] {
        match self {
            Node::Container(c) => &c.children,
            Node::Leaf(_) => &[],
        }
    }

    pub fn is_container(&self) -> bool {
        matches!(self, Node::Container(_))
    }

    /// Whether this is a leaf tagged as a sequence.
    pub fn is_sequence(&self) -> bool {
        matches!(
            self,
            Node::Leaf(Leaf {
                kind: ItemKind::Sequence,
                ..
            })
        )
    }

    /// Loaded sequence handle, if this is a resolvable sequence leaf.
    pub fn sequence_handle(&self) -> Option<SequenceHandle> {
        match self {
            Node::Leaf(l) if l.kind == ItemKind::Sequence => l.sequence,
            _ => None,
        }
    }
}

/// One entry of the host's flat registry of loaded sequences.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SequenceEntry {
    pub name: String,
    pub handle: SequenceHandle,
    /// Project item referencing this sequence, when the host exposes one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub item: Option<ItemId>,
}

/// Errors reported by the host for a single call.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum HostError {
    #[error("Unknown project item: {0}")]
    UnknownItem(ItemId),

    #[error("Unknown sequence: {0}")]
    UnknownSequence(SequenceHandle),

    #[error("{0} is not a bin")]
    NotAContainer(ItemId),

    /// The host refused the operation.
    #[error("Host rejected {operation}: {reason}")]
    Rejected { operation: String, reason: String },
}

impl HostError {
    /// Create a rejected-operation error.
    pub fn rejected(operation: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Rejected {
            operation: operation.into(),
            reason: reason.into(),
        }
    }
}

/// Result type for host calls.
pub type HostResult<T> = Result<T, HostError>;

/// Operations the host project exposes to the core.
///
/// Every call blocks until the host has applied it. Mutating calls do not
/// return the entities they create; callers identify them with
/// [`crate::resolve::RegistrySnapshot`].
pub trait ProjectHost {
    /// Fresh snapshot of the whole project tree, rooted at the root bin.
    fn root(&self) -> HostResult<Node>;

    /// Immediate children of a bin, in host order.
    fn list_children(&self, container: ItemId) -> HostResult<Vec<Node>>;

    /// Create a bin under `parent` and return it. Append-only.
    fn create_container(&mut self, parent: ItemId, name: &str) -> HostResult<Node>;

    /// Import files into `destination`. Created items are not reported.
    fn import_files(&mut self, paths: &[PathBuf], destination: ItemId) -> HostResult<()>;

    /// Clone a sequence. The clone is appended to the sequence registry.
    fn clone_sequence(&mut self, sequence: SequenceHandle) -> HostResult<()>;

    /// Rename a sequence.
    fn rename_sequence(&mut self, sequence: SequenceHandle, new_name: &str) -> HostResult<()>;

    /// Rename a project item.
    fn rename_item(&mut self, item: ItemId, new_name: &str) -> HostResult<()>;

    /// Flat registry of loaded sequences, in host order.
    fn list_all_sequences(&self) -> HostResult<Vec<SequenceEntry>>;
}
