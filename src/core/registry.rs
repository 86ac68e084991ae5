//! Module registries.
//!
//! A [`ModuleRegistry`] maps module names (file stems) to the file that
//! defines them. The same insertion rule is shared by the RTL registry, the
//! raw testbench file set and every IP core: a name may only be registered
//! once.

use std::collections::btree_map::{self, BTreeMap};
use std::fmt;
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::core::error::ProjectError;

/// A discovered source file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileInfo {
    /// File name without its extension
    name: String,

    /// Extension including the leading dot, or empty
    extension: String,

    /// Absolute path
    path: PathBuf,
}

impl FileInfo {
    /// Build file info from an absolute path.
    ///
    /// The extension is the suffix after the last dot of the file name
    /// (including the dot); a leading dot alone does not start an extension.
    pub fn from_path(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();

        let extension = path
            .extension()
            .map(|ext| format!(".{}", ext.to_string_lossy()))
            .unwrap_or_default();
        let name = file_name[..file_name.len() - extension.len()].to_string();

        FileInfo {
            name,
            extension,
            path,
        }
    }

    /// Module name (file stem).
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Extension, including the leading dot.
    pub fn extension(&self) -> &str {
        &self.extension
    }

    /// Absolute path to the file.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// Which registry a module belongs to, used in conflict reports.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum RegistryKind {
    /// The project's own RTL sources
    Rtl,
    /// Files found in the testbench directory
    Testbench,
    /// Sources of a named IP core
    IpCore(String),
}

impl fmt::Display for RegistryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RegistryKind::Rtl => write!(f, "RTL sources"),
            RegistryKind::Testbench => write!(f, "testbench sources"),
            RegistryKind::IpCore(name) => write!(f, "IP core `{}`", name),
        }
    }
}

/// Name-unique mapping from module name to its file.
#[derive(Debug, Clone, Serialize)]
pub struct ModuleRegistry {
    #[serde(skip)]
    kind: RegistryKind,

    #[serde(flatten)]
    modules: BTreeMap<String, FileInfo>,
}

impl ModuleRegistry {
    /// Create an empty registry.
    pub fn new(kind: RegistryKind) -> Self {
        ModuleRegistry {
            kind,
            modules: BTreeMap::new(),
        }
    }

    /// Build a registry from entries whose keys are already unique.
    ///
    /// Used for testbench maps, which are keyed by the module under test
    /// rather than by the testbench's own stem.
    pub fn from_unique<I>(kind: RegistryKind, entries: I) -> Self
    where
        I: IntoIterator<Item = (String, FileInfo)>,
    {
        ModuleRegistry {
            kind,
            modules: entries.into_iter().collect(),
        }
    }

    /// Register a single file, rejecting duplicate module names.
    pub fn register(&mut self, file: FileInfo) -> Result<(), ProjectError> {
        match self.modules.entry(file.name.clone()) {
            btree_map::Entry::Occupied(existing) => Err(ProjectError::DuplicateModule {
                name: file.name,
                registry: self.kind.clone(),
                first: existing.get().path.clone(),
                second: file.path,
            }),
            btree_map::Entry::Vacant(slot) => {
                tracing::trace!("registered `{}` in {}", slot.key(), self.kind);
                slot.insert(file);
                Ok(())
            }
        }
    }

    /// Register every file, stopping at the first duplicate.
    pub fn register_all<I>(&mut self, files: I) -> Result<(), ProjectError>
    where
        I: IntoIterator<Item = FileInfo>,
    {
        for file in files {
            self.register(file)?;
        }
        Ok(())
    }

    /// The registry this map represents.
    pub fn kind(&self) -> &RegistryKind {
        &self.kind
    }

    /// Look up a module by name.
    pub fn get(&self, name: &str) -> Option<&FileInfo> {
        self.modules.get(name)
    }

    /// Check whether a module is registered.
    pub fn contains(&self, name: &str) -> bool {
        self.modules.contains_key(name)
    }

    /// Iterate modules in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &FileInfo)> {
        self.modules.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Module names in name order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.modules.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.modules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.modules.is_empty()
    }
}
