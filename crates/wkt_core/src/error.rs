//! Failure kinds shared by the resolution components.
//!
//! Every variant of [`ResolveError`] reflects a precondition the user has to
//! fix outside the tool. Nothing here is retried. Rename failures are not
//! errors; they are carried as [`RunWarning`] values.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Fatal failure of a resolution step.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ResolveError {
    /// No input folder was provided.
    #[error("No input folder selected")]
    NoInputSelected,

    /// The discovered files do not cover every required role.
    #[error("Insufficient assets: {}", format_missing(.missing))]
    InsufficientAssets { missing: Vec<MissingAsset> },

    /// The folder name does not contain any known modality label.
    #[error("Could not determine modality from folder '{folder}'")]
    ModalityUndetermined { folder: String },

    /// No sequence matched the template name.
    #[error("Template '{name}' not found (known sequences: {})", format_known(.known))]
    TemplateNotFound { name: String, known: Vec<String> },

    /// A before/after comparison found no new entity.
    #[error("Could not identify new {what}")]
    AmbiguousOrMissing { what: String },
}

impl ResolveError {
    /// Create a template-not-found error.
    pub fn template_not_found(name: impl Into<String>, known: Vec<String>) -> Self {
        Self::TemplateNotFound {
            name: name.into(),
            known,
        }
    }

    /// Create an ambiguous-or-missing error.
    pub fn ambiguous_or_missing(what: impl Into<String>) -> Self {
        Self::AmbiguousOrMissing { what: what.into() }
    }

    /// Create a modality-undetermined error.
    pub fn modality_undetermined(folder: impl Into<String>) -> Self {
        Self::ModalityUndetermined {
            folder: folder.into(),
        }
    }
}

/// A file-role requirement that was not met.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MissingAsset {
    /// Role that could not be filled.
    pub role: String,
    /// How many files of this role are required.
    pub required: usize,
    /// How many were found.
    pub found: usize,
}

impl std::fmt::Display for MissingAsset {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "need {} {} file(s), found {}",
            self.required, self.role, self.found
        )
    }
}

fn format_missing(missing: &[MissingAsset]) -> String {
    missing
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

fn format_known(known: &[String]) -> String {
    if known.is_empty() {
        "none".to_string()
    } else {
        known.join(", ")
    }
}

/// Which entity a rename targeted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RenameTarget {
    /// The sequence itself.
    Sequence,
    /// The project item that references the sequence.
    ProjectItem,
}

impl std::fmt::Display for RenameTarget {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RenameTarget::Sequence => write!(f, "sequence"),
            RenameTarget::ProjectItem => write!(f, "project item"),
        }
    }
}

/// Non-fatal problem recorded during a run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RunWarning {
    /// A rename was rejected; the duplicate keeps its previous name.
    RenameFailed {
        target: RenameTarget,
        name: String,
        reason: String,
    },
}

impl std::fmt::Display for RunWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RunWarning::RenameFailed {
                target,
                name,
                reason,
            } => write!(f, "Rename of {} to '{}' failed: {}", target, name, reason),
        }
    }
}
