//! Config manager for loading, saving, and atomic updates.
//!
//! Key features:
//! - Atomic writes (write to temp file, then rename)
//! - Section-level updates (only modified section is changed)
//! - Validation on load (rewrites files with unknown keys or missing defaults)
//! - Preserves comments in untouched sections with toml_edit

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use thiserror::Error;
use toml_edit::{DocumentMut, Item};

use super::settings::{ConfigSection, Settings};

/// Config load and save failures.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Config I/O failed: {0}")]
    Io(#[from] io::Error),

    #[error("Invalid config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Could not serialize settings: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("Could not edit config document: {0}")]
    Edit(#[from] toml_edit::TomlError),

    #[error("No config file at {0}")]
    NotFound(PathBuf),
}

/// Result of a config operation.
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Owns the settings and the TOML file they live in.
pub struct ConfigManager {
    config_path: PathBuf,
    settings: Settings,
}

impl ConfigManager {
    /// Manager for the file at `config_path`, holding default settings
    /// until one of the load methods runs.
    pub fn new(config_path: impl Into<PathBuf>) -> Self {
        Self {
            config_path: config_path.into(),
            settings: Settings::default(),
        }
    }

    /// Path of the backing file.
    pub fn path(&self) -> &Path {
        &self.config_path
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// In-memory settings; persisted by `save` or `update_section`.
    pub fn settings_mut(&mut self) -> &mut Settings {
        &mut self.settings
    }

    /// Read settings from the backing file, which must exist.
    pub fn load(&mut self) -> ConfigResult<()> {
        if !self.config_path.exists() {
            return Err(ConfigError::NotFound(self.config_path.clone()));
        }

        let content = fs::read_to_string(&self.config_path)?;
        self.settings = toml::from_str(&content)?;
        Ok(())
    }

    /// Read settings, writing a commented default file when none exists.
    ///
    /// A file with stray sections or keys missing from a section is
    /// rewritten in canonical form.
    pub fn load_or_create(&mut self) -> ConfigResult<()> {
        if self.config_path.exists() {
            let content = fs::read_to_string(&self.config_path)?;
            let (settings, was_modified) = parse_validate_and_clean(&content)?;
            self.settings = settings;

            if was_modified {
                tracing::info!(
                    "Config {} had unknown or missing keys, rewriting",
                    self.config_path.display()
                );
                self.save()?;
            }
        } else {
            self.settings = Settings::default();
            self.save()?;
        }
        Ok(())
    }

    /// Folder run logs are written to.
    pub fn logs_folder(&self) -> PathBuf {
        PathBuf::from(&self.settings.paths.logs_folder)
    }

    /// Write every section, replacing the file atomically.
    pub fn save(&self) -> ConfigResult<()> {
        let content = self.generate_config_with_comments()?;
        self.atomic_write(&content)?;
        Ok(())
    }

    /// Update a specific section atomically.
    ///
    /// Re-reads the file from disk, replaces only the specified table, and
    /// writes back atomically. Other sections keep their on-disk content.
    pub fn update_section(&mut self, section: ConfigSection) -> ConfigResult<()> {
        let current_content = if self.config_path.exists() {
            fs::read_to_string(&self.config_path)?
        } else {
            String::new()
        };

        let mut doc: DocumentMut = if current_content.is_empty() {
            DocumentMut::new()
        } else {
            current_content.parse()?
        };

        let section_doc: DocumentMut = section_toml(&self.settings, section)?.parse()?;
        doc[section.table_name()] = Item::Table(section_doc.as_table().clone());

        self.atomic_write(&doc.to_string())?;
        Ok(())
    }

    /// Generate config content with a comment above each section.
    fn generate_config_with_comments(&self) -> ConfigResult<String> {
        let mut output = String::new();

        output.push_str("# Workout Template Kit Configuration\n");
        output.push_str(
            "# This file is auto-generated. Comments may be preserved on section updates.\n",
        );

        for section in ConfigSection::all() {
            output.push('\n');
            output.push_str(section.comment());
            output.push('\n');
            output.push_str(&format!("[{}]\n", section.table_name()));
            for line in section_toml(&self.settings, *section)?.lines() {
                output.push_str(line);
                output.push('\n');
            }
        }

        Ok(output)
    }

    /// Write to a sibling temp file, then rename over the config.
    fn atomic_write(&self, content: &str) -> io::Result<()> {
        if let Some(parent) = self.config_path.parent() {
            fs::create_dir_all(parent)?;
        }

        let temp_path = self.config_path.with_extension("toml.tmp");

        {
            let mut file = fs::File::create(&temp_path)?;
            file.write_all(content.as_bytes())?;
            file.sync_all()?;
        }

        fs::rename(&temp_path, &self.config_path)?;

        Ok(())
    }
}

/// Serialize just one section's table body.
fn section_toml(settings: &Settings, section: ConfigSection) -> ConfigResult<String> {
    let content = match section {
        ConfigSection::Paths => toml::to_string_pretty(&settings.paths)?,
        ConfigSection::Logging => toml::to_string_pretty(&settings.logging)?,
        ConfigSection::Naming => toml::to_string_pretty(&settings.naming)?,
        ConfigSection::Media => toml::to_string_pretty(&settings.media)?,
    };
    Ok(content)
}

/// Parse config content and report whether it needs rewriting.
///
/// A rewrite is needed when the file has unknown top-level keys or when a
/// section lacks keys that defaults filled in.
fn parse_validate_and_clean(content: &str) -> ConfigResult<(Settings, bool)> {
    let doc: DocumentMut = content.parse()?;
    let settings: Settings = toml::from_str(content)?;

    let valid_sections: Vec<&str> = ConfigSection::all()
        .iter()
        .map(|s| s.table_name())
        .collect();
    let has_unknown = doc.iter().any(|(key, _)| !valid_sections.contains(&key));

    let mut missing_defaults = false;
    for section in ConfigSection::all() {
        let expected: DocumentMut = section_toml(&settings, *section)?.parse()?;

        let present = doc.get(section.table_name()).and_then(Item::as_table_like);
        let complete = present
            .is_some_and(|table| expected.iter().all(|(key, _)| table.contains_key(key)));
        if !complete {
            missing_defaults = true;
        }
    }

    Ok((settings, has_unknown || missing_defaults))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn load_or_create_creates_default() {
        let dir = tempdir().unwrap();
        let config_path = dir.path().join(".config").join("settings.toml");

        let mut manager = ConfigManager::new(&config_path);
        manager.load_or_create().unwrap();

        assert!(config_path.exists());
        let content = fs::read_to_string(&config_path).unwrap();
        assert!(content.contains("[paths]"));
        assert!(content.contains("[naming]"));
        assert!(content.contains("# File extensions per asset role"));

        // The generated file parses back to the defaults.
        let mut reloaded = ConfigManager::new(&config_path);
        reloaded.load().unwrap();
        assert_eq!(
            reloaded.settings().naming.template_pattern,
            "MASTER_b3_{modality}_Template"
        );
    }

    #[test]
    fn load_or_create_preserves_existing() {
        let dir = tempdir().unwrap();
        let config_path = dir.path().join("settings.toml");

        fs::write(
            &config_path,
            "[naming]\ntemplate_pattern = \"TPL_{modality}\"\n",
        )
        .unwrap();

        let mut manager = ConfigManager::new(&config_path);
        manager.load_or_create().unwrap();

        assert_eq!(manager.settings().naming.template_pattern, "TPL_{modality}");

        // Missing sections were filled in on disk.
        let content = fs::read_to_string(&config_path).unwrap();
        assert!(content.contains("[media]"));
        assert!(content.contains("TPL_{modality}"));
    }

    #[test]
    fn complete_file_is_left_alone() {
        let dir = tempdir().unwrap();
        let config_path = dir.path().join("settings.toml");

        let mut manager = ConfigManager::new(&config_path);
        manager.load_or_create().unwrap();

        // Append a user comment; a complete file must not be regenerated.
        let mut content = fs::read_to_string(&config_path).unwrap();
        content.push_str("# my note\n");
        fs::write(&config_path, &content).unwrap();

        let mut again = ConfigManager::new(&config_path);
        again.load_or_create().unwrap();
        assert!(fs::read_to_string(&config_path).unwrap().contains("# my note"));
    }

    #[test]
    fn unknown_sections_trigger_rewrite() {
        let dir = tempdir().unwrap();
        let config_path = dir.path().join("settings.toml");

        let mut manager = ConfigManager::new(&config_path);
        manager.load_or_create().unwrap();
        let mut content = fs::read_to_string(&config_path).unwrap();
        content.push_str("\n[legacy]\nfoo = 1\n");
        fs::write(&config_path, &content).unwrap();

        let mut again = ConfigManager::new(&config_path);
        again.load_or_create().unwrap();
        assert!(!fs::read_to_string(&config_path).unwrap().contains("[legacy]"));
    }

    #[test]
    fn update_section_only_changes_target() {
        let dir = tempdir().unwrap();
        let config_path = dir.path().join("settings.toml");

        let mut manager = ConfigManager::new(&config_path);
        manager.load_or_create().unwrap();

        manager.settings_mut().naming.duplicate_pattern = "{folder} master".to_string();
        manager.settings_mut().paths.logs_folder = "elsewhere".to_string();

        manager.update_section(ConfigSection::Naming).unwrap();

        let content = fs::read_to_string(&config_path).unwrap();
        assert!(content.contains("{folder} master"));
        // Paths were not written
        assert!(!content.contains("elsewhere"));
        assert!(content.contains("[paths]"));
    }

    #[test]
    fn load_missing_file_is_not_found() {
        let dir = tempdir().unwrap();
        let mut manager = ConfigManager::new(dir.path().join("absent.toml"));
        assert!(matches!(manager.load(), Err(ConfigError::NotFound(_))));
    }

    #[test]
    fn atomic_write_creates_no_temp_on_success() {
        let dir = tempdir().unwrap();
        let config_path = dir.path().join("settings.toml");

        let mut manager = ConfigManager::new(&config_path);
        manager.load_or_create().unwrap();

        let temp_path = config_path.with_extension("toml.tmp");
        assert!(!temp_path.exists());
    }
}
