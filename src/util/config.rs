//! Configuration file support for Synth.
//!
//! Synth reads two optional configuration files:
//! - Global: `config.toml` in the platform config directory
//!   (`~/.config/synth/config.toml` on Linux)
//! - Project: `.synth/config.toml` next to the manifest
//!
//! Project config takes precedence over global config, and command-line
//! flags take precedence over both.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Synth configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// External tool locations
    pub tools: ToolsConfig,
}

/// Where to find the external tools.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ToolsConfig {
    /// Directory containing `iverilog`, `vvp` and `yosys`
    pub basepath: Option<PathBuf>,

    /// Explicit path to `iverilog`; wins over `basepath`
    pub iverilog: Option<PathBuf>,

    /// Explicit path to `vvp`; wins over `basepath`
    pub vvp: Option<PathBuf>,

    /// Explicit path to `yosys`; wins over `basepath`
    pub yosys: Option<PathBuf>,
}

impl Config {
    /// Load configuration from a file.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config: {}", path.display()))?;

        toml::from_str(&contents)
            .with_context(|| format!("failed to parse config: {}", path.display()))
    }

    /// Load configuration, falling back to defaults if the file is missing
    /// or unreadable.
    pub fn load_or_default(path: &Path) -> Self {
        if path.exists() {
            Self::load(path).unwrap_or_else(|e| {
                tracing::warn!("Failed to load config from {}: {:#}", path.display(), e);
                Self::default()
            })
        } else {
            Self::default()
        }
    }

    /// Save configuration to a file.
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).with_context(|| {
                format!("failed to create config directory: {}", parent.display())
            })?;
        }

        let contents =
            toml::to_string_pretty(self).with_context(|| "failed to serialize config")?;

        std::fs::write(path, contents)
            .with_context(|| format!("failed to write config: {}", path.display()))?;

        Ok(())
    }

    /// Merge another config into this one (other takes precedence).
    pub fn merge(&mut self, other: Config) {
        let tools = other.tools;
        if tools.basepath.is_some() {
            self.tools.basepath = tools.basepath;
        }
        if tools.iverilog.is_some() {
            self.tools.iverilog = tools.iverilog;
        }
        if tools.vvp.is_some() {
            self.tools.vvp = tools.vvp;
        }
        if tools.yosys.is_some() {
            self.tools.yosys = tools.yosys;
        }
    }
}

/// Load merged configuration from the global and project locations.
///
/// Order of precedence (highest to lowest):
/// 1. Project config (.synth/config.toml)
/// 2. Global config
/// 3. Defaults
pub fn load_config(global_path: Option<&Path>, project_path: &Path) -> Config {
    let mut config = Config::default();

    if let Some(global_path) = global_path {
        config.merge(Config::load_or_default(global_path));
    }

    config.merge(Config::load_or_default(project_path));

    config
}

/// The platform config directory for Synth.
pub fn global_config_dir() -> Option<PathBuf> {
    directories::ProjectDirs::from("", "", "synth").map(|dirs| dirs.config_dir().to_path_buf())
}

/// The global config file path.
pub fn global_config_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join("config.toml"))
}

/// The project config file path (`.synth/config.toml`).
pub fn project_config_path(project_root: &Path) -> PathBuf {
    project_root.join(".synth").join("config.toml")
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_parse_tools() {
        let config: Config = toml::from_str(
            r#"
[tools]
basepath = "/opt/eda/bin"
yosys = "/usr/local/bin/yosys"
"#,
        )
        .unwrap();

        assert_eq!(config.tools.basepath, Some(PathBuf::from("/opt/eda/bin")));
        assert_eq!(config.tools.yosys, Some(PathBuf::from("/usr/local/bin/yosys")));
        assert!(config.tools.iverilog.is_none());
    }

    #[test]
    fn test_empty_config() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_merge_prefers_other() {
        let mut base = Config::default();
        base.tools.basepath = Some(PathBuf::from("/global"));
        base.tools.vvp = Some(PathBuf::from("/global/vvp"));

        let mut project = Config::default();
        project.tools.basepath = Some(PathBuf::from("/project"));

        base.merge(project);
        assert_eq!(base.tools.basepath, Some(PathBuf::from("/project")));
        assert_eq!(base.tools.vvp, Some(PathBuf::from("/global/vvp")));
    }

    #[test]
    fn test_save_and_load_config() {
        let tmp = TempDir::new().unwrap();
        let path = project_config_path(tmp.path());

        let mut config = Config::default();
        config.tools.iverilog = Some(PathBuf::from("/opt/iverilog/bin/iverilog"));
        config.save(&path).unwrap();

        assert_eq!(Config::load(&path).unwrap(), config);
    }

    #[test]
    fn test_malformed_config_falls_back() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("config.toml");
        std::fs::write(&path, "[tools\nbasepath = 1").unwrap();

        assert!(Config::load(&path).is_err());
        assert_eq!(Config::load_or_default(&path), Config::default());
    }

    #[test]
    fn test_load_config_layers() {
        let tmp = TempDir::new().unwrap();
        let global = tmp.path().join("global.toml");
        std::fs::write(&global, "[tools]\nbasepath = \"/global\"\nyosys = \"/g/yosys\"\n").unwrap();

        let project = project_config_path(tmp.path());
        std::fs::create_dir_all(project.parent().unwrap()).unwrap();
        std::fs::write(&project, "[tools]\nbasepath = \"/project\"\n").unwrap();

        let config = load_config(Some(&global), &project);
        assert_eq!(config.tools.basepath, Some(PathBuf::from("/project")));
        assert_eq!(config.tools.yosys, Some(PathBuf::from("/g/yosys")));
    }
}
