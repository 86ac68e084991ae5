//! Global context for Synth operations.
//!
//! Provides centralized access to the manifest location, configuration and
//! the output shell.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};

use crate::core::manifest::MANIFEST_NAME;
use crate::util::config::{global_config_path, load_config, project_config_path, Config};
use crate::util::fs::absolutize;
use crate::util::shell::Shell;

/// Global context containing configuration and paths.
#[derive(Debug, Clone)]
pub struct GlobalContext {
    /// Current working directory
    cwd: PathBuf,

    /// Absolute path of the project manifest
    manifest_path: PathBuf,

    /// Tool base directory given on the command line
    basepath: Option<PathBuf>,

    /// Merged global and project configuration
    config: Config,

    shell: Arc<Shell>,
}

impl GlobalContext {
    /// Create a context rooted at the current directory.
    ///
    /// `project` is the `--project` flag; without it the manifest is looked
    /// up from the current directory upward.
    pub fn new(project: Option<&Path>, shell: Shell) -> Result<Self> {
        let cwd = std::env::current_dir().context("failed to get current directory")?;
        Ok(Self::with_cwd(cwd, project, shell))
    }

    /// Create a context with a specific working directory.
    pub fn with_cwd(cwd: PathBuf, project: Option<&Path>, shell: Shell) -> Self {
        let manifest_path = match project {
            Some(path) => absolutize(&cwd, path),
            None => find_manifest(&cwd).unwrap_or_else(|| cwd.join(MANIFEST_NAME)),
        };

        let project_root = manifest_path.parent().unwrap_or(&cwd).to_path_buf();
        let config = load_config(
            global_config_path().as_deref(),
            &project_config_path(&project_root),
        );
        tracing::debug!("manifest: {}", manifest_path.display());

        GlobalContext {
            cwd,
            manifest_path,
            basepath: None,
            config,
            shell: Arc::new(shell),
        }
    }

    /// Set the tool base directory from the command line.
    pub fn with_basepath(mut self, basepath: Option<PathBuf>) -> Self {
        self.basepath = basepath.map(|p| absolutize(&self.cwd, &p));
        self
    }

    /// Replace the loaded configuration.
    pub fn with_config(mut self, config: Config) -> Self {
        self.config = config;
        self
    }

    pub fn cwd(&self) -> &Path {
        &self.cwd
    }

    /// Path of the project manifest. It may not exist.
    pub fn manifest_path(&self) -> &Path {
        &self.manifest_path
    }

    /// Directory containing the project manifest.
    pub fn project_root(&self) -> &Path {
        self.manifest_path.parent().unwrap_or(&self.cwd)
    }

    /// Tool base directory from the command line, if any.
    pub fn basepath(&self) -> Option<&Path> {
        self.basepath.as_deref()
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn shell(&self) -> &Arc<Shell> {
        &self.shell
    }
}

/// Search `start` and its ancestors for a project manifest.
pub fn find_manifest(start: &Path) -> Option<PathBuf> {
    start
        .ancestors()
        .map(|dir| dir.join(MANIFEST_NAME))
        .find(|candidate| candidate.is_file())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn quiet_shell() -> Shell {
        Shell::from_flags(true, false, crate::util::shell::ColorChoice::Never)
    }

    #[test]
    fn test_find_manifest_upward() {
        let tmp = TempDir::new().unwrap();
        let manifest = tmp.path().join(MANIFEST_NAME);
        std::fs::write(&manifest, "[project]\n").unwrap();
        let nested = tmp.path().join("rtl").join("alu");
        std::fs::create_dir_all(&nested).unwrap();

        assert_eq!(find_manifest(&nested), Some(manifest));
    }

    #[test]
    fn test_default_manifest_path() {
        let tmp = TempDir::new().unwrap();
        let ctx = GlobalContext::with_cwd(tmp.path().to_path_buf(), None, quiet_shell());

        assert_eq!(ctx.manifest_path(), tmp.path().join(MANIFEST_NAME));
        assert_eq!(ctx.project_root(), tmp.path());
    }

    #[test]
    fn test_explicit_project_is_absolutized() {
        let tmp = TempDir::new().unwrap();
        let ctx = GlobalContext::with_cwd(
            tmp.path().to_path_buf(),
            Some(Path::new("hw/./soc.toml")),
            quiet_shell(),
        )
        .with_basepath(Some(PathBuf::from("tools/bin")));

        assert_eq!(ctx.manifest_path(), tmp.path().join("hw").join("soc.toml"));
        assert_eq!(ctx.project_root(), tmp.path().join("hw"));
        assert_eq!(ctx.basepath(), Some(tmp.path().join("tools").join("bin").as_path()));
    }

    #[test]
    fn test_project_config_is_loaded() {
        let tmp = TempDir::new().unwrap();
        let config_path = project_config_path(tmp.path());
        std::fs::create_dir_all(config_path.parent().unwrap()).unwrap();
        std::fs::write(&config_path, "[tools]\nyosys = \"/opt/yosys/bin/yosys\"\n").unwrap();

        let ctx = GlobalContext::with_cwd(tmp.path().to_path_buf(), None, quiet_shell());
        assert_eq!(
            ctx.config().tools.yosys,
            Some(PathBuf::from("/opt/yosys/bin/yosys"))
        );
    }
}
