//! Converter settings
//!
//! Looked up in order: the `--config` path, `./pr3conv.toml`, then
//! `~/.config/pr3conv/settings.toml`. Command-line flags override them.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use pr3_format::ModelVersion;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

const LOCAL_FILE: &str = "pr3conv.toml";

/// All converter settings
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConvertSettings {
    pub format: FormatSettings,
    pub rig: RigSettings,
    pub log: LogSettings,
}

impl ConvertSettings {
    /// Get the config directory path
    fn config_dir() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("pr3conv"))
    }

    /// Get the user settings file path
    fn settings_path() -> Option<PathBuf> {
        Self::config_dir().map(|p| p.join("settings.toml"))
    }

    /// Load settings.
    ///
    /// An explicit path must exist and parse. Implicit files are optional and
    /// a broken one falls back to defaults with a warning.
    pub fn load(explicit: Option<&Path>) -> anyhow::Result<Self> {
        if let Some(path) = explicit {
            let settings = Self::read(path)?;
            info!("Loaded settings from {:?}", path);
            return Ok(settings);
        }

        let local = PathBuf::from(LOCAL_FILE);
        let candidates = std::iter::once(local).chain(Self::settings_path());
        for path in candidates {
            if !path.exists() {
                continue;
            }
            return Ok(match Self::read(&path) {
                Ok(settings) => {
                    info!("Loaded settings from {:?}", path);
                    settings
                }
                Err(e) => {
                    warn!("{:#}, using defaults", e);
                    Self::default()
                }
            });
        }

        info!("No settings file found, using defaults");
        Ok(Self::default())
    }

    fn read(path: &Path) -> anyhow::Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read settings file {:?}", path))?;
        let settings: Self = toml::from_str(&content)
            .with_context(|| format!("Failed to parse settings {:?}", path))?;
        settings
            .format
            .model_version()
            .with_context(|| format!("Invalid settings {:?}", path))?;
        Ok(settings)
    }

    /// Save settings to the user config directory
    pub fn save(&self) -> anyhow::Result<PathBuf> {
        let Some(dir) = Self::config_dir() else {
            anyhow::bail!("Could not determine config directory");
        };
        self.save_to(&dir.join("settings.toml"))
    }

    pub fn save_to(&self, path: &Path) -> anyhow::Result<PathBuf> {
        if let Some(dir) = path.parent() {
            if !dir.as_os_str().is_empty() && !dir.exists() {
                fs::create_dir_all(dir)?;
            }
        }

        let content = toml::to_string_pretty(self)?;
        fs::write(path, content)?;
        info!("Saved settings to {:?}", path);
        Ok(path.to_path_buf())
    }
}

/// Model container settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FormatSettings {
    /// Container version (1 = legacy i32/f32, 2 = compact varint/half)
    pub version: u32,
}

impl Default for FormatSettings {
    fn default() -> Self {
        Self {
            version: ModelVersion::CURRENT.as_u32(),
        }
    }
}

impl FormatSettings {
    /// The configured container version. Unknown numbers are a settings
    /// error, not an encoding one.
    pub fn model_version(&self) -> anyhow::Result<ModelVersion> {
        ModelVersion::try_from(self.version).map_err(|_| {
            anyhow::anyhow!(
                "Unsupported format version {} (expected 1 or 2)",
                self.version
            )
        })
    }
}

/// Rig extraction settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RigSettings {
    /// Name of the node holding the bones
    pub armature: String,
    /// Write `<model>.pr3r` when no rig output is given
    pub always_write: bool,
}

impl Default for RigSettings {
    fn default() -> Self {
        Self {
            armature: pr3_mesh::DEFAULT_ARMATURE.to_string(),
            always_write: false,
        }
    }
}

/// Logging settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogSettings {
    /// Default level when `RUST_LOG` is unset
    pub level: String,
}

impl Default for LogSettings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}
