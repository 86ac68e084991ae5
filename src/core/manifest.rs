//! project.toml manifest parsing and schema.
//!
//! The manifest describes where a project's RTL sources and testbenches
//! live, how testbenches are named, which IP cores it depends on and where
//! build outputs go:
//!
//! ```toml
//! [project]
//! language = "verilog"
//! top_module = "cpu"
//! rtl_dir = "rtl"
//! rtl_dir_pattern = "*.v"
//! tb_dir = "tb"
//! tb_dir_pattern = "*.v"
//! tb_file_fmt = "{}_tb"
//! build_dir = "build"
//! spec = "spec.toml"        # optional
//!
//! [[ip]]                    # optional, repeatable
//! name = "fifo"
//! rtl_dir = "ip/fifo"
//! rtl_dir_pattern = "*.v"
//! ```
//!
//! Relative paths are resolved against the directory holding the manifest.

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::core::error::ProjectError;
use crate::core::testbench::TestbenchTemplate;
use crate::util::fs::{absolutize, absolutize_from_cwd};

/// Default manifest file name.
pub const MANIFEST_NAME: &str = "project.toml";

/// The validated manifest.
#[derive(Debug, Clone)]
pub struct Manifest {
    /// Target HDL dialect, passed through uninterpreted
    pub language: String,

    /// Name of the project's top-level module
    pub top_module: String,

    /// Absolute RTL source root
    pub rtl_dir: PathBuf,

    /// Glob selecting RTL files under `rtl_dir`
    pub rtl_dir_pattern: String,

    /// Absolute testbench root
    pub tb_dir: PathBuf,

    /// Glob selecting testbench files under `tb_dir`
    pub tb_dir_pattern: String,

    /// Testbench naming convention
    pub tb_file_fmt: TestbenchTemplate,

    /// Absolute build output directory
    pub build_dir: PathBuf,

    /// Absolute path to an optional spec file
    pub spec: Option<PathBuf>,

    /// IP core declarations, in declaration order
    pub ip: Vec<IpDeclaration>,

    /// Path of the manifest itself
    pub manifest_path: PathBuf,
}

/// A declared IP core.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IpDeclaration {
    /// Core name, which is also the name of its top module
    pub name: String,

    /// Absolute root of the core's sources
    pub rtl_dir: PathBuf,

    /// Glob selecting the core's files under `rtl_dir`
    pub rtl_dir_pattern: String,
}

/// Raw manifest as deserialized from TOML.
///
/// Everything is optional here so that all missing keys can be reported in
/// one error.
#[derive(Debug, Default, Deserialize)]
struct RawManifest {
    #[serde(default)]
    project: Option<RawProject>,

    #[serde(default)]
    ip: Vec<RawIp>,
}

#[derive(Debug, Default, Deserialize)]
struct RawProject {
    language: Option<String>,
    top_module: Option<String>,
    rtl_dir: Option<String>,
    rtl_dir_pattern: Option<String>,
    tb_dir: Option<String>,
    tb_dir_pattern: Option<String>,
    tb_file_fmt: Option<String>,
    build_dir: Option<String>,

    #[serde(default)]
    spec: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct RawIp {
    name: Option<String>,
    rtl_dir: Option<String>,
    rtl_dir_pattern: Option<String>,
}

/// Collects missing keys while validating a raw manifest.
#[derive(Default)]
pub(crate) struct MissingKeys(Vec<String>);

impl MissingKeys {
    /// Take a required value, recording `key` if it is absent.
    pub(crate) fn require<T>(&mut self, value: Option<T>, key: impl Into<String>) -> Option<T> {
        if value.is_none() {
            self.0.push(key.into());
        }
        value
    }

    /// Fail with every recorded key, if any.
    pub(crate) fn finish(self, path: &Path) -> Result<(), ProjectError> {
        if self.0.is_empty() {
            Ok(())
        } else {
            Err(self.into_error(path))
        }
    }

    pub(crate) fn into_error(self, path: &Path) -> ProjectError {
        ProjectError::ManifestIncomplete {
            path: path.to_path_buf(),
            missing: self.0,
        }
    }
}

/// Read a TOML file, mapping a missing file to [`ProjectError::MissingFile`].
pub(crate) fn read_toml_file(path: &Path) -> Result<String, ProjectError> {
    std::fs::read_to_string(path).map_err(|e| match e.kind() {
        std::io::ErrorKind::NotFound => ProjectError::MissingFile {
            path: path.to_path_buf(),
        },
        _ => ProjectError::Io {
            path: path.to_path_buf(),
            source: e,
        },
    })
}

impl Manifest {
    /// Load a manifest from a file path. A relative path is taken from the
    /// current directory.
    pub fn load(path: &Path) -> Result<Self, ProjectError> {
        let path = absolutize_from_cwd(path).map_err(|e| ProjectError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
        let content = read_toml_file(&path)?;
        Self::parse(&content, &path)
    }

    /// Parse manifest content.
    ///
    /// `path` is the manifest's location; relative paths inside the manifest
    /// are resolved against its parent directory.
    pub fn parse(content: &str, path: &Path) -> Result<Self, ProjectError> {
        let raw: RawManifest =
            toml::from_str(content).map_err(|e| ProjectError::MalformedManifest {
                path: path.to_path_buf(),
                source: e,
            })?;

        let manifest_dir = path.parent().unwrap_or(Path::new("."));
        let resolve = |p: String| absolutize(manifest_dir, Path::new(&p));

        let mut missing = MissingKeys::default();

        let project = missing.require(raw.project, "project");
        let project = project.unwrap_or_default();
        let language = missing.require(project.language, "project.language");
        let top_module = missing.require(project.top_module, "project.top_module");
        let rtl_dir = missing.require(project.rtl_dir, "project.rtl_dir");
        let rtl_dir_pattern = missing.require(project.rtl_dir_pattern, "project.rtl_dir_pattern");
        let tb_dir = missing.require(project.tb_dir, "project.tb_dir");
        let tb_dir_pattern = missing.require(project.tb_dir_pattern, "project.tb_dir_pattern");
        let tb_file_fmt = missing.require(project.tb_file_fmt, "project.tb_file_fmt");
        let build_dir = missing.require(project.build_dir, "project.build_dir");

        let mut ip = Vec::with_capacity(raw.ip.len());
        for (i, raw_ip) in raw.ip.into_iter().enumerate() {
            let name = missing.require(raw_ip.name, format!("ip[{}].name", i));
            let rtl_dir = missing.require(raw_ip.rtl_dir, format!("ip[{}].rtl_dir", i));
            let rtl_dir_pattern =
                missing.require(raw_ip.rtl_dir_pattern, format!("ip[{}].rtl_dir_pattern", i));

            if let (Some(name), Some(rtl_dir), Some(rtl_dir_pattern)) =
                (name, rtl_dir, rtl_dir_pattern)
            {
                ip.push(IpDeclaration {
                    name,
                    rtl_dir: resolve(rtl_dir),
                    rtl_dir_pattern,
                });
            }
        }

        let (
            Some(language),
            Some(top_module),
            Some(rtl_dir),
            Some(rtl_dir_pattern),
            Some(tb_dir),
            Some(tb_dir_pattern),
            Some(tb_file_fmt),
            Some(build_dir),
        ) = (
            language,
            top_module,
            rtl_dir,
            rtl_dir_pattern,
            tb_dir,
            tb_dir_pattern,
            tb_file_fmt,
            build_dir,
        )
        else {
            return Err(missing.into_error(path));
        };
        missing.finish(path)?;

        Ok(Manifest {
            language,
            top_module,
            rtl_dir: resolve(rtl_dir),
            rtl_dir_pattern,
            tb_dir: resolve(tb_dir),
            tb_dir_pattern,
            tb_file_fmt: TestbenchTemplate::parse(&tb_file_fmt)?,
            build_dir: resolve(build_dir),
            spec: project.spec.map(resolve),
            ip,
            manifest_path: path.to_path_buf(),
        })
    }
}

/// Generate a starter manifest.
pub fn generate_default_manifest(top_module: &str) -> String {
    format!(
        r#"[project]
language = "verilog"
top_module = "{top_module}"
rtl_dir = "rtl"
rtl_dir_pattern = "*.v"
tb_dir = "tb"
tb_dir_pattern = "*.v"
tb_file_fmt = "{{}}_tb"
build_dir = "build"
"#
    )
}
