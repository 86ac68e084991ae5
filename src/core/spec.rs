//! Project-specific spec file.
//!
//! An optional secondary manifest, referenced by `project.spec`, declaring
//! prebuilt libraries and extra include directories:
//!
//! ```toml
//! ext_including_dir = ["vendor/include"]
//!
//! [[lib]]
//! name = "cells"
//! path = "/opt/pdk/cells"
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::core::error::ProjectError;
use crate::core::manifest::{read_toml_file, MissingKeys};
use crate::util::fs::absolutize;

/// A prebuilt library directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LibInfo {
    pub name: String,

    /// Absolute path; existence is not checked
    pub path: PathBuf,
}

/// The resolved contents of a spec file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SpecFile {
    /// Libraries, in file order
    pub libs: Vec<LibInfo>,

    /// Extra include directories, in file order
    pub including_dirs: Vec<PathBuf>,
}

#[derive(Debug, Default, Deserialize)]
struct RawSpec {
    #[serde(default)]
    lib: Vec<RawLib>,

    #[serde(default)]
    ext_including_dir: Vec<String>,
}

#[derive(Debug, Default, Deserialize)]
struct RawLib {
    name: Option<String>,
    path: Option<String>,
}

impl SpecFile {
    /// Load a spec file.
    pub fn load(path: &Path) -> Result<Self, ProjectError> {
        let content = read_toml_file(path)?;
        Self::parse(&content, path)
    }

    /// Parse spec file content; relative paths resolve against its directory.
    pub fn parse(content: &str, path: &Path) -> Result<Self, ProjectError> {
        let raw: RawSpec =
            toml::from_str(content).map_err(|e| ProjectError::MalformedManifest {
                path: path.to_path_buf(),
                source: e,
            })?;

        let base = path.parent().unwrap_or(Path::new("."));
        let mut missing = MissingKeys::default();

        let mut libs = Vec::with_capacity(raw.lib.len());
        for (i, lib) in raw.lib.into_iter().enumerate() {
            let name = missing.require(lib.name, format!("lib[{}].name", i));
            let lib_path = missing.require(lib.path, format!("lib[{}].path", i));
            if let (Some(name), Some(lib_path)) = (name, lib_path) {
                libs.push(LibInfo {
                    name,
                    path: absolutize(base, Path::new(&lib_path)),
                });
            }
        }
        missing.finish(path)?;

        let including_dirs = raw
            .ext_including_dir
            .iter()
            .map(|dir| absolutize(base, Path::new(dir)))
            .collect();

        tracing::debug!(
            "spec {}: {} lib(s), {} extra include dir(s)",
            path.display(),
            libs.len(),
            raw.ext_including_dir.len()
        );

        Ok(SpecFile {
            libs,
            including_dirs,
        })
    }
}
