//! The resolved project model.
//!
//! A [`Project`] is built once from a manifest, validated completely during
//! construction, and read-only afterwards. It is the only thing the actions
//! in [`crate::ops`] need to assemble tool command lines.

use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use serde::Serialize;

use crate::core::discover::FileDiscoverer;
use crate::core::error::ProjectError;
use crate::core::ip::{self, IpCoreInfo};
use crate::core::manifest::Manifest;
use crate::core::registry::{FileInfo, ModuleRegistry, RegistryKind};
use crate::core::spec::{LibInfo, SpecFile};
use crate::core::testbench::{self, TestbenchTemplate};
use crate::util::fs::{ensure_dir, with_trailing_separator};

/// A fully resolved HDL project.
#[derive(Debug, Clone, Serialize)]
pub struct Project {
    language: String,
    root_dir: PathBuf,
    top_module: String,
    files: ModuleRegistry,
    test_bench: ModuleRegistry,
    tb_file_fmt: TestbenchTemplate,
    ip_cores: IndexMap<String, IpCoreInfo>,
    libs: Vec<LibInfo>,
    including_dir: Vec<PathBuf>,
    build_out_dir: PathBuf,
    manifest_path: PathBuf,
}

impl Project {
    /// Load and resolve the project described by the manifest at `path`.
    ///
    /// Creates the build output directory if it does not exist yet.
    pub fn load(path: &Path) -> Result<Self, ProjectError> {
        let manifest = Manifest::load(path)?;
        Self::from_manifest(manifest)
    }

    /// Resolve a parsed manifest against the filesystem.
    pub fn from_manifest(manifest: Manifest) -> Result<Self, ProjectError> {
        tracing::debug!("resolving project {}", manifest.manifest_path.display());

        let files = discover_into(
            RegistryKind::Rtl,
            &manifest.rtl_dir,
            &manifest.rtl_dir_pattern,
        )?;

        if !files.contains(&manifest.top_module) {
            return Err(ProjectError::MissingTopModule {
                name: manifest.top_module,
            });
        }

        let testbench_files = discover_into(
            RegistryKind::Testbench,
            &manifest.tb_dir,
            &manifest.tb_dir_pattern,
        )?;
        let test_bench = testbench::resolve(&files, &manifest.tb_file_fmt, &testbench_files);

        let ip_cores = ip::resolve(&manifest.ip)?;

        let spec = match &manifest.spec {
            Some(spec_path) => SpecFile::load(spec_path)?,
            None => SpecFile::default(),
        };

        let mut including_dir = Vec::with_capacity(1 + ip_cores.len() + spec.including_dirs.len());
        including_dir.push(manifest.rtl_dir.clone());
        including_dir.extend(ip_cores.values().map(|core| core.root_dir().to_path_buf()));
        including_dir.extend(spec.including_dirs);

        ensure_dir(&manifest.build_dir).map_err(|e| ProjectError::Io {
            path: manifest.build_dir.clone(),
            source: e,
        })?;
        let build_out_dir = with_trailing_separator(&manifest.build_dir);

        tracing::debug!(
            "resolved {} module(s), {} testbench(es), {} IP core(s), {} lib(s)",
            files.len(),
            test_bench.len(),
            ip_cores.len(),
            spec.libs.len()
        );

        Ok(Project {
            language: manifest.language,
            root_dir: manifest.rtl_dir,
            top_module: manifest.top_module,
            files,
            test_bench,
            tb_file_fmt: manifest.tb_file_fmt,
            ip_cores,
            libs: spec.libs,
            including_dir,
            build_out_dir,
            manifest_path: manifest.manifest_path,
        })
    }

    /// Target HDL dialect, as written in the manifest.
    pub fn language(&self) -> &str {
        &self.language
    }

    /// Absolute RTL source root.
    pub fn root_dir(&self) -> &Path {
        &self.root_dir
    }

    /// Name of the top-level module; always a key of [`Project::files`].
    pub fn top_module(&self) -> &str {
        &self.top_module
    }

    /// The project's own modules.
    pub fn files(&self) -> &ModuleRegistry {
        &self.files
    }

    /// Testbench file for each module that has one, keyed by module name.
    pub fn test_bench(&self) -> &ModuleRegistry {
        &self.test_bench
    }

    /// How testbench names are derived from module names.
    pub fn testbench_template(&self) -> &TestbenchTemplate {
        &self.tb_file_fmt
    }

    /// IP cores in declaration order.
    pub fn ip_cores(&self) -> &IndexMap<String, IpCoreInfo> {
        &self.ip_cores
    }

    pub fn libs(&self) -> &[LibInfo] {
        &self.libs
    }

    /// Include search path: the RTL root, then IP core roots, then extra
    /// directories from the spec file.
    pub fn including_dir(&self) -> &[PathBuf] {
        &self.including_dir
    }

    /// Absolute build output directory, ending in a path separator.
    pub fn build_out_dir(&self) -> &Path {
        &self.build_out_dir
    }

    pub fn manifest_path(&self) -> &Path {
        &self.manifest_path
    }

    /// Look up a project module.
    pub fn module(&self, name: &str) -> Option<&FileInfo> {
        self.files.get(name)
    }

    /// Look up the testbench of a project module.
    pub fn testbench(&self, module: &str) -> Option<&FileInfo> {
        self.test_bench.get(module)
    }
}

fn discover_into(
    kind: RegistryKind,
    root: &Path,
    pattern: &str,
) -> Result<ModuleRegistry, ProjectError> {
    let discoverer = FileDiscoverer::new(root, pattern)?;
    let mut registry = ModuleRegistry::new(kind);
    registry.register_all(discoverer.files())?;
    tracing::debug!("{}: {} file(s)", registry.kind(), registry.len());
    Ok(registry)
}
