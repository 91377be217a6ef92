//! Modality and file-role classification.
//!
//! The modality comes from the workout folder's name; file roles come from
//! extensions, taken in the order the files were discovered.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{MissingAsset, ResolveError};
use crate::naming::normalize;

/// Workout category. Declaration order is the tie-break order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Modality {
    Signature,
    Cardio,
    Strength,
    Flow,
}

impl Modality {
    /// All modalities, in tie-break order.
    pub fn all() -> &'static [Modality] {
        &[
            Modality::Signature,
            Modality::Cardio,
            Modality::Strength,
            Modality::Flow,
        ]
    }

    /// Label used in folder names and template names.
    pub fn label(&self) -> &'static str {
        match self {
            Modality::Signature => "Signature",
            Modality::Cardio => "Cardio",
            Modality::Strength => "Strength",
            Modality::Flow => "Flow",
        }
    }
}

impl std::fmt::Display for Modality {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Determine the modality a folder name refers to.
///
/// The first modality whose normalized label occurs in the normalized
/// folder name wins.
pub fn classify_modality(folder_name: &str) -> Option<Modality> {
    let folder = normalize(folder_name);
    Modality::all()
        .iter()
        .copied()
        .find(|m| folder.contains(&normalize(m.label())))
}

/// Extension sets used to assign file roles.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetPatterns {
    /// Video extensions, without the dot.
    pub video_extensions: Vec<String>,
    /// Playlist audio extensions, without the dot.
    pub audio_extensions: Vec<String>,
}

impl Default for AssetPatterns {
    fn default() -> Self {
        Self {
            video_extensions: vec!["mov".to_string(), "mp4".to_string()],
            audio_extensions: vec!["mp3".to_string()],
        }
    }
}

impl AssetPatterns {
    pub fn is_video(&self, path: &Path) -> bool {
        has_extension(path, &self.video_extensions)
    }

    pub fn is_audio(&self, path: &Path) -> bool {
        has_extension(path, &self.audio_extensions)
    }
}

fn has_extension(path: &Path, extensions: &[String]) -> bool {
    path.extension()
        .map(|ext| ext.to_string_lossy())
        .is_some_and(|ext| extensions.iter().any(|e| e.eq_ignore_ascii_case(&ext)))
}

/// Files assigned to their roles.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassifiedAssets {
    pub video_primary: PathBuf,
    pub video_secondary: PathBuf,
    pub playlist: PathBuf,
}

impl ClassifiedAssets {
    /// Files in import order: primary video, secondary video, playlist.
    pub fn import_order(&self) -> Vec<PathBuf> {
        vec![
            self.video_primary.clone(),
            self.video_secondary.clone(),
            self.playlist.clone(),
        ]
    }
}

/// Assign discovered files to roles.
///
/// The first two video files become primary and secondary, the first audio
/// file becomes the playlist. "First" is the order of `files` as listed by
/// the filesystem; no sorting is applied.
pub fn classify_files(
    files: &[PathBuf],
    patterns: &AssetPatterns,
) -> Result<ClassifiedAssets, ResolveError> {
    let videos: Vec<&PathBuf> = files.iter().filter(|f| patterns.is_video(f)).collect();
    let playlist = files.iter().find(|f| patterns.is_audio(f));

    let mut missing = Vec::new();
    if videos.len() < 2 {
        missing.push(MissingAsset {
            role: "video".to_string(),
            required: 2,
            found: videos.len(),
        });
    }
    if playlist.is_none() {
        missing.push(MissingAsset {
            role: "playlist audio".to_string(),
            required: 1,
            found: 0,
        });
    }

    match (videos.as_slice(), playlist) {
        ([primary, secondary, ..], Some(playlist)) => Ok(ClassifiedAssets {
            video_primary: (*primary).clone(),
            video_secondary: (*secondary).clone(),
            playlist: playlist.clone(),
        }),
        _ => Err(ResolveError::InsufficientAssets { missing }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn paths(names: &[&str]) -> Vec<PathBuf> {
        names.iter().map(PathBuf::from).collect()
    }

    #[test]
    fn modality_from_folder_name() {
        assert_eq!(classify_modality("2024_Cardio_Blast"), Some(Modality::Cardio));
        assert_eq!(classify_modality("strength week"), Some(Modality::Strength));
        assert_eq!(classify_modality("FLOW-session"), Some(Modality::Flow));
        assert_eq!(classify_modality("random"), None);
        assert_eq!(classify_modality(""), None);
    }

    #[test]
    fn modality_ties_follow_declaration_order() {
        assert_eq!(
            classify_modality("Flow into Cardio Signature"),
            Some(Modality::Signature)
        );
        assert_eq!(classify_modality("Flow Cardio"), Some(Modality::Cardio));
    }

    #[test]
    fn classifies_files_in_listing_order() {
        let files = paths(&["a.mov", "b.mp4", "c.mp3"]);
        let assets = classify_files(&files, &AssetPatterns::default()).unwrap();
        assert_eq!(assets.video_primary, PathBuf::from("a.mov"));
        assert_eq!(assets.video_secondary, PathBuf::from("b.mp4"));
        assert_eq!(assets.playlist, PathBuf::from("c.mp3"));
    }

    #[test]
    fn extra_files_are_ignored_and_case_is_folded() {
        let files = paths(&["notes.txt", "c.MP3", "b.MOV", "a.mp4", "z.mov", "d.mp3"]);
        let assets = classify_files(&files, &AssetPatterns::default()).unwrap();
        assert_eq!(assets.video_primary, PathBuf::from("b.MOV"));
        assert_eq!(assets.video_secondary, PathBuf::from("a.mp4"));
        assert_eq!(assets.playlist, PathBuf::from("c.MP3"));
    }

    #[test]
    fn one_video_is_insufficient() {
        let files = paths(&["a.mov", "c.mp3"]);
        let err = classify_files(&files, &AssetPatterns::default()).unwrap_err();
        match err {
            ResolveError::InsufficientAssets { missing } => {
                assert_eq!(missing.len(), 1);
                assert_eq!(missing[0].role, "video");
                assert_eq!(missing[0].found, 1);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn reports_every_unmet_requirement() {
        let err = classify_files(&paths(&["readme.md"]), &AssetPatterns::default()).unwrap_err();
        match err {
            ResolveError::InsufficientAssets { missing } => {
                let roles: Vec<_> = missing.iter().map(|m| m.role.as_str()).collect();
                assert_eq!(roles, vec!["video", "playlist audio"]);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn custom_patterns_are_honoured() {
        let patterns = AssetPatterns {
            video_extensions: vec!["mkv".to_string()],
            audio_extensions: vec!["wav".to_string()],
        };
        let files = paths(&["a.mkv", "b.mkv", "p.wav"]);
        assert!(classify_files(&files, &patterns).is_ok());
        assert!(classify_files(&paths(&["a.mov", "b.mp4", "c.mp3"]), &patterns).is_err());
    }
}
