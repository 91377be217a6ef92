//! Pipeline step implementations.
//!
//! Each step moves the run one phase forward.

mod bin;
mod classify;
mod duplicate;
mod import;
mod modality;
mod rename;
mod template;

pub use bin::ResolveBinStep;
pub use classify::ClassifyAssetsStep;
pub use duplicate::DuplicateStep;
pub use import::ImportStep;
pub use modality::ModalityStep;
pub use rename::RenameStep;
pub use template::ResolveTemplateStep;

#[cfg(test)]
pub(crate) mod test_support {
    use std::path::PathBuf;
    use std::sync::Arc;

    use crate::config::Settings;
    use crate::logging::{LogConfig, RunLogger};
    use crate::orchestrator::types::{Context, RunRequest};

    pub fn context(folder: &str, files: &[&str]) -> Context {
        let request = RunRequest::new(folder, files.iter().map(PathBuf::from).collect());
        let logger = Arc::new(RunLogger::detached("step-test", LogConfig::default(), None));
        Context::new(request, Settings::default(), "step-test", logger)
    }
}
