//! Asset discovery from the selected workout folder.
//!
//! Files are returned in the order the filesystem lists them, with
//! subfolders descended as they are met. That order differs between
//! platforms, and it decides which video becomes the primary one.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::error::ResolveError;

/// Name of the selected folder, used for modality and bin naming.
pub fn folder_label(folder: &Path) -> Result<String, ResolveError> {
    folder
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .filter(|n| !n.trim().is_empty())
        .ok_or(ResolveError::NoInputSelected)
}

/// Every regular file below `folder`, in listing order.
///
/// Hidden entries (leading `.`) are skipped, which also drops the `._name`
/// resource-fork files some copies leave next to media.
pub fn discover_files(folder: &Path) -> io::Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    collect_files(folder, &mut files)?;
    tracing::debug!("Discovered {} files in {}", files.len(), folder.display());
    Ok(files)
}

fn collect_files(dir: &Path, files: &mut Vec<PathBuf>) -> io::Result<()> {
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        if entry.file_name().to_string_lossy().starts_with('.') {
            continue;
        }

        let path = entry.path();
        let file_type = entry.file_type()?;
        if file_type.is_dir() {
            collect_files(&path, files)?;
        } else if file_type.is_file() {
            files.push(path);
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn folder_label_uses_last_component() {
        assert_eq!(
            folder_label(Path::new("/media/2024_Cardio_Blast")).unwrap(),
            "2024_Cardio_Blast"
        );
        assert_eq!(folder_label(Path::new("/")), Err(ResolveError::NoInputSelected));
    }

    #[test]
    fn discovers_nested_files_and_skips_hidden() {
        let dir = tempdir().unwrap();
        let sub = dir.path().join("Cardio_Blast");
        fs::create_dir(&sub).unwrap();
        fs::write(dir.path().join("playlist.mp3"), b"").unwrap();
        fs::write(sub.join("w1.mp4"), b"").unwrap();
        fs::write(sub.join("w2.mov"), b"").unwrap();
        fs::write(sub.join("._w1.mp4"), b"").unwrap();
        fs::create_dir(dir.path().join(".cache")).unwrap();
        fs::write(dir.path().join(".cache").join("x.mp4"), b"").unwrap();

        let mut names: Vec<String> = discover_files(dir.path())
            .unwrap()
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().to_string())
            .collect();
        // Listing order is platform dependent.
        names.sort();
        assert_eq!(names, vec!["playlist.mp3", "w1.mp4", "w2.mov"]);
    }

    #[test]
    fn missing_folder_is_an_error() {
        let dir = tempdir().unwrap();
        assert!(discover_files(&dir.path().join("nope")).is_err());
    }
}
