//! Settings struct with TOML-based sections.
//!
//! Settings are organized into logical sections that map to TOML tables.
//! Each section can be updated independently for atomic section-level updates.

use serde::{Deserialize, Serialize};

use crate::classify::AssetPatterns;
use crate::logging::{LogConfig, LogLevel};

/// Root settings structure containing all configuration sections.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Settings {
    /// Path-related settings.
    #[serde(default)]
    pub paths: PathSettings,

    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingSettings,

    /// Bin, template and duplicate naming.
    #[serde(default)]
    pub naming: NamingSettings,

    /// File extensions for each asset role.
    #[serde(default)]
    pub media: MediaSettings,
}

/// Path configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PathSettings {
    /// Folder for run log files.
    #[serde(default = "default_logs_folder")]
    pub logs_folder: String,

    /// Last workout folder a run was started from.
    #[serde(default)]
    pub last_input_folder: String,
}

fn default_logs_folder() -> String {
    ".logs".to_string()
}

impl Default for PathSettings {
    fn default() -> Self {
        Self {
            logs_folder: default_logs_folder(),
            last_input_folder: String::new(),
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingSettings {
    /// Minimum level written to the run log.
    #[serde(default)]
    pub level: LogLevel,

    /// Prefix log lines with a timestamp.
    #[serde(default = "default_true")]
    pub show_timestamps: bool,

    /// Number of recent lines replayed when a run fails.
    #[serde(default = "default_error_tail")]
    pub error_tail: u32,
}

fn default_true() -> bool {
    true
}

fn default_error_tail() -> u32 {
    20
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: LogLevel::default(),
            show_timestamps: true,
            error_tail: default_error_tail(),
        }
    }
}

impl LoggingSettings {
    /// Logger configuration for a run.
    pub fn to_log_config(&self) -> LogConfig {
        LogConfig {
            level: self.level,
            error_tail: self.error_tail as usize,
            show_timestamps: self.show_timestamps,
        }
    }
}

/// Naming patterns. `{modality}` and `{folder}` are substituted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NamingSettings {
    /// Name of the template sequence to duplicate.
    #[serde(default = "default_template_pattern")]
    pub template_pattern: String,

    /// Name given to the duplicated sequence.
    #[serde(default = "default_folder_pattern")]
    pub duplicate_pattern: String,

    /// Name of the bin assets are imported into.
    #[serde(default = "default_folder_pattern")]
    pub bin_pattern: String,
}

fn default_template_pattern() -> String {
    "MASTER_b3_{modality}_Template".to_string()
}

fn default_folder_pattern() -> String {
    "{folder}".to_string()
}

impl Default for NamingSettings {
    fn default() -> Self {
        Self {
            template_pattern: default_template_pattern(),
            duplicate_pattern: default_folder_pattern(),
            bin_pattern: default_folder_pattern(),
        }
    }
}

/// Extensions used to assign file roles, without the dot.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MediaSettings {
    #[serde(default = "default_video_extensions")]
    pub video_extensions: Vec<String>,

    #[serde(default = "default_audio_extensions")]
    pub audio_extensions: Vec<String>,
}

fn default_video_extensions() -> Vec<String> {
    AssetPatterns::default().video_extensions
}

fn default_audio_extensions() -> Vec<String> {
    AssetPatterns::default().audio_extensions
}

impl Default for MediaSettings {
    fn default() -> Self {
        Self {
            video_extensions: default_video_extensions(),
            audio_extensions: default_audio_extensions(),
        }
    }
}

impl MediaSettings {
    pub fn asset_patterns(&self) -> AssetPatterns {
        AssetPatterns {
            video_extensions: self.video_extensions.clone(),
            audio_extensions: self.audio_extensions.clone(),
        }
    }
}

/// Names of config sections for targeted updates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConfigSection {
    Paths,
    Logging,
    Naming,
    Media,
}

impl ConfigSection {
    /// All sections, in file order.
    pub fn all() -> &'static [ConfigSection] {
        &[
            ConfigSection::Paths,
            ConfigSection::Logging,
            ConfigSection::Naming,
            ConfigSection::Media,
        ]
    }

    /// Get the TOML table name for this section.
    pub fn table_name(&self) -> &'static str {
        match self {
            ConfigSection::Paths => "paths",
            ConfigSection::Logging => "logging",
            ConfigSection::Naming => "naming",
            ConfigSection::Media => "media",
        }
    }

    /// Comment written above the section.
    pub fn comment(&self) -> &'static str {
        match self {
            ConfigSection::Paths => "# Log and input locations",
            ConfigSection::Logging => "# Run logging",
            ConfigSection::Naming => {
                "# Bin, template and duplicate names ({modality} and {folder} are substituted)"
            }
            ConfigSection::Media => "# File extensions per asset role",
        }
    }
}
