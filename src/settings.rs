use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{ConvertError, Result};
use crate::layout::{DEFAULT_CATEGORY, DEFAULT_ORGANIZATION};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default = "default_organization_name")]
    pub organization_name: String,
    #[serde(default = "default_category_label")]
    pub category_label: String,
    /// Warnings listed individually after a conversion; the rest are counted.
    #[serde(default = "default_warning_preview_limit")]
    pub warning_preview_limit: usize,
    /// File stem used when no output path is given.
    #[serde(default = "default_output_name")]
    pub output_name: String,
}

fn default_organization_name() -> String {
    DEFAULT_ORGANIZATION.to_string()
}

fn default_category_label() -> String {
    DEFAULT_CATEGORY.to_string()
}

fn default_warning_preview_limit() -> usize {
    5
}

fn default_output_name() -> String {
    "EXPORT".to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            organization_name: default_organization_name(),
            category_label: default_category_label(),
            warning_preview_limit: default_warning_preview_limit(),
            output_name: default_output_name(),
        }
    }
}

impl Settings {
    /// `<source dir>/<output_name>.xlsx`
    pub fn default_destination(&self, source: &Path) -> PathBuf {
        let dir = source.parent().unwrap_or_else(|| Path::new(""));
        dir.join(format!("{}.xlsx", self.output_name))
    }
}

fn config_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config")
        .join("checkreg")
}

pub fn settings_path() -> PathBuf {
    config_dir().join("settings.json")
}

pub fn load_settings() -> Settings {
    load_settings_from(&settings_path())
}

fn load_settings_from(path: &Path) -> Settings {
    if path.exists() {
        let content = std::fs::read_to_string(path).unwrap_or_default();
        serde_json::from_str(&content).unwrap_or_default()
    } else {
        Settings::default()
    }
}

pub fn save_settings(settings: &Settings) -> Result<()> {
    save_settings_to(settings, &settings_path())
}

fn save_settings_to(settings: &Settings, path: &Path) -> Result<()> {
    if let Some(dir) = path.parent() {
        std::fs::create_dir_all(dir)?;
    }
    let json = serde_json::to_string_pretty(settings)
        .map_err(|e| ConvertError::Settings(e.to_string()))?;
    std::fs::write(path, format!("{json}\n"))?;
    Ok(())
}

pub fn settings_file_exists() -> bool {
    settings_path().exists()
}
