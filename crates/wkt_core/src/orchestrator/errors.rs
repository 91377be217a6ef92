//! Error types for the orchestrator pipeline.
//!
//! Errors carry context that chains through layers:
//! Run → Step → Resolution or host call → Detail

use thiserror::Error;

use crate::error::ResolveError;
use crate::project::HostError;

/// Top-level pipeline error with run context.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PipelineError {
    /// A step failed; the run halted there.
    #[error("Run '{run_name}' failed at step '{step_name}': {source}")]
    StepFailed {
        run_name: String,
        step_name: String,
        #[source]
        source: StepError,
    },
}

impl PipelineError {
    /// Create a step failed error.
    pub fn step_failed(
        run_name: impl Into<String>,
        step_name: impl Into<String>,
        source: StepError,
    ) -> Self {
        Self::StepFailed {
            run_name: run_name.into(),
            step_name: step_name.into(),
            source,
        }
    }

    /// Name of the step that failed.
    pub fn step_name(&self) -> &str {
        match self {
            Self::StepFailed { step_name, .. } => step_name,
        }
    }

    /// The step error behind this failure.
    pub fn step_error(&self) -> &StepError {
        match self {
            Self::StepFailed { source, .. } => source,
        }
    }

    /// The resolution failure behind this error, if it was one.
    pub fn resolve_error(&self) -> Option<&ResolveError> {
        match self.step_error() {
            StepError::Resolve(err) => Some(err),
            _ => None,
        }
    }
}

/// Error from a pipeline step.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StepError {
    /// A resolution precondition was not met.
    #[error(transparent)]
    Resolve(#[from] ResolveError),

    /// The host rejected a call.
    #[error("Host call failed: {0}")]
    Host(#[from] HostError),

    /// Input validation failed.
    #[error("Input validation failed: {0}")]
    InvalidInput(String),

    /// Output validation failed.
    #[error("Output validation failed: {0}")]
    InvalidOutput(String),

    /// An earlier step did not record what this step needs.
    #[error("Precondition not met: {0}")]
    PreconditionFailed(String),
}

impl StepError {
    /// Create an invalid input error.
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput(message.into())
    }

    /// Create an invalid output error.
    pub fn invalid_output(message: impl Into<String>) -> Self {
        Self::InvalidOutput(message.into())
    }

    /// Create a precondition failed error.
    pub fn precondition_failed(message: impl Into<String>) -> Self {
        Self::PreconditionFailed(message.into())
    }
}

/// Result type for step operations.
pub type StepResult<T> = Result<T, StepError>;

/// Result type for pipeline operations.
pub type PipelineResult<T> = Result<T, PipelineError>;
