//! Resolution of the entities a run works on.
//!
//! - `bins`: find-or-create the destination bin
//! - `template`: multi-strategy lookup of the template sequence
//! - `diff`: identify what a mutating host call just created

mod bins;
mod diff;
mod template;

pub use bins::{resolve_or_create_bin, ResolvedBin};
pub use diff::RegistrySnapshot;
pub use template::{find_in_registry, resolve_template, ResolvedSequence, TemplateSource};
