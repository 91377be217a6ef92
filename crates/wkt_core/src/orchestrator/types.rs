//! Core types for the orchestrator pipeline.

use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use super::errors::{StepError, StepResult};
use crate::classify::{ClassifiedAssets, Modality};
use crate::config::Settings;
use crate::discovery::{discover_files, folder_label};
use crate::error::{ResolveError, RunWarning};
use crate::logging::RunLogger;
use crate::naming::expand_pattern;
use crate::project::{ItemId, SequenceEntry};
use crate::resolve::{ResolvedBin, ResolvedSequence};

/// Progress callback type for reporting pipeline progress.
///
/// Arguments: (step_name, percent_complete, message)
pub type ProgressCallback = Box<dyn Fn(&str, u32, &str) + Send + Sync>;

/// What the user selected for a run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunRequest {
    /// Name of the selected workout folder. `None` when nothing was selected.
    pub folder_name: Option<String>,
    /// Discovered files, in filesystem listing order.
    pub files: Vec<PathBuf>,
}

impl RunRequest {
    pub fn new(folder_name: impl Into<String>, files: Vec<PathBuf>) -> Self {
        Self {
            folder_name: Some(folder_name.into()),
            files,
        }
    }

    /// Build a request from a folder on disk.
    ///
    /// A folder without a usable name leaves `folder_name` unset, which the
    /// run reports as no input selected.
    pub fn from_folder(folder: &Path) -> io::Result<Self> {
        Ok(Self {
            folder_name: folder_label(folder).ok(),
            files: discover_files(folder)?,
        })
    }
}

/// Read-only context passed to pipeline steps.
pub struct Context {
    /// User selection.
    pub request: RunRequest,
    /// Application settings.
    pub settings: Settings,
    /// Run name/identifier.
    pub run_name: String,
    /// Per-run logger.
    pub logger: Arc<RunLogger>,
    progress_callback: Option<ProgressCallback>,
}

impl Context {
    pub fn new(
        request: RunRequest,
        settings: Settings,
        run_name: impl Into<String>,
        logger: Arc<RunLogger>,
    ) -> Self {
        Self {
            request,
            settings,
            run_name: run_name.into(),
            logger,
            progress_callback: None,
        }
    }

    /// Set the progress callback.
    pub fn with_progress_callback(mut self, callback: ProgressCallback) -> Self {
        self.progress_callback = Some(callback);
        self
    }

    /// Report progress to callback (if set).
    pub fn report_progress(&self, step_name: &str, percent: u32, message: &str) {
        if let Some(ref callback) = self.progress_callback {
            callback(step_name, percent, message);
        }
    }

    /// Selected folder name.
    pub fn folder_name(&self) -> StepResult<&str> {
        self.request
            .folder_name
            .as_deref()
            .ok_or(StepError::Resolve(ResolveError::NoInputSelected))
    }

    /// Name of the bin assets are imported into.
    pub fn bin_name(&self, modality: Modality) -> StepResult<String> {
        self.expand(&self.settings.naming.bin_pattern, modality)
    }

    /// Name of the template sequence for `modality`.
    pub fn template_name(&self, modality: Modality) -> StepResult<String> {
        self.expand(&self.settings.naming.template_pattern, modality)
    }

    /// Name given to the duplicated sequence.
    pub fn duplicate_name(&self, modality: Modality) -> StepResult<String> {
        self.expand(&self.settings.naming.duplicate_pattern, modality)
    }

    fn expand(&self, pattern: &str, modality: Modality) -> StepResult<String> {
        Ok(expand_pattern(pattern, modality.label(), self.folder_name()?))
    }
}

/// Position of a run in its linear state machine.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "phase", rename_all = "snake_case")]
pub enum RunPhase {
    #[default]
    Idle,
    ModalityResolved,
    FilesClassified,
    BinResolved,
    ItemsImported,
    TemplateResolved,
    Duplicated,
    Renamed,
    Done,
    /// Terminal failure. Nothing created so far is rolled back.
    Failed { step: String, reason: String },
}

impl RunPhase {
    pub fn is_terminal(&self) -> bool {
        matches!(self, RunPhase::Done | RunPhase::Failed { .. })
    }
}

/// An item the import added to the bin.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportedItem {
    pub id: ItemId,
    pub name: String,
}

/// Outcome of renaming the duplicate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenameOutput {
    /// Name the duplicate was given.
    pub name: String,
    pub sequence_renamed: bool,
    pub item_renamed: bool,
}

/// Mutable run state that accumulates results from pipeline steps.
///
/// Steps add their own section and never overwrite another step's.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RunState {
    /// Run identifier.
    pub run_id: String,
    /// When the run started.
    pub started_at: Option<String>,
    pub phase: RunPhase,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub modality: Option<Modality>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assets: Option<ClassifiedAssets>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bin: Option<ResolvedBin>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub imported: Vec<ImportedItem>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub template: Option<ResolvedSequence>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duplicate: Option<SequenceEntry>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rename: Option<RenameOutput>,
    /// Non-fatal problems, in the order they occurred.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<RunWarning>,
}

impl RunState {
    pub fn new(run_id: impl Into<String>) -> Self {
        Self {
            run_id: run_id.into(),
            started_at: Some(chrono::Local::now().to_rfc3339()),
            ..Default::default()
        }
    }

    /// Modality recorded by the modality step.
    pub fn require_modality(&self) -> StepResult<Modality> {
        self.modality
            .ok_or_else(|| StepError::precondition_failed("modality not resolved"))
    }

    /// Assets recorded by the classification step.
    pub fn require_assets(&self) -> StepResult<&ClassifiedAssets> {
        self.assets
            .as_ref()
            .ok_or_else(|| StepError::precondition_failed("files not classified"))
    }

    /// Bin recorded by the bin step.
    pub fn require_bin(&self) -> StepResult<&ResolvedBin> {
        self.bin
            .as_ref()
            .ok_or_else(|| StepError::precondition_failed("bin not resolved"))
    }

    /// Template recorded by the template step.
    pub fn require_template(&self) -> StepResult<&ResolvedSequence> {
        self.template
            .as_ref()
            .ok_or_else(|| StepError::precondition_failed("template not resolved"))
    }

    /// Duplicate recorded by the duplicate step.
    pub fn require_duplicate(&self) -> StepResult<&SequenceEntry> {
        self.duplicate
            .as_ref()
            .ok_or_else(|| StepError::precondition_failed("duplicate not identified"))
    }

    pub fn is_done(&self) -> bool {
        self.phase == RunPhase::Done
    }
}
