//! IP core resolution.
//!
//! Each declared IP core is a separately rooted set of sources whose top
//! module carries the core's name.

use std::path::{Path, PathBuf};

use indexmap::map::{Entry, IndexMap};
use serde::Serialize;

use crate::core::discover::FileDiscoverer;
use crate::core::error::ProjectError;
use crate::core::manifest::IpDeclaration;
use crate::core::registry::{ModuleRegistry, RegistryKind};

/// A resolved IP core.
#[derive(Debug, Clone, Serialize)]
pub struct IpCoreInfo {
    name: String,
    root_dir: PathBuf,
    rtl_files: ModuleRegistry,
}

impl IpCoreInfo {
    /// Discover and validate a single declared core.
    pub fn resolve(decl: &IpDeclaration) -> Result<Self, ProjectError> {
        let discoverer = FileDiscoverer::new(&decl.rtl_dir, &decl.rtl_dir_pattern)?;

        let mut rtl_files = ModuleRegistry::new(RegistryKind::IpCore(decl.name.clone()));
        rtl_files.register_all(discoverer.files())?;

        if !rtl_files.contains(&decl.name) {
            return Err(ProjectError::MissingIpTopModule {
                name: decl.name.clone(),
                root_dir: decl.rtl_dir.clone(),
            });
        }

        tracing::debug!(
            "IP core `{}`: {} file(s) under {}",
            decl.name,
            rtl_files.len(),
            decl.rtl_dir.display()
        );

        Ok(IpCoreInfo {
            name: decl.name.clone(),
            root_dir: decl.rtl_dir.clone(),
            rtl_files,
        })
    }

    /// Core name, also the name of its top module.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Absolute root directory of the core.
    pub fn root_dir(&self) -> &Path {
        &self.root_dir
    }

    /// The core's own modules.
    pub fn rtl_files(&self) -> &ModuleRegistry {
        &self.rtl_files
    }
}

/// Resolve all declared IP cores, keeping declaration order.
///
/// Declaring two cores with the same name is a conflict.
pub fn resolve(
    declarations: &[IpDeclaration],
) -> Result<IndexMap<String, IpCoreInfo>, ProjectError> {
    let mut cores = IndexMap::with_capacity(declarations.len());

    for decl in declarations {
        match cores.entry(decl.name.clone()) {
            Entry::Occupied(_) => {
                return Err(ProjectError::DuplicateIpCore {
                    name: decl.name.clone(),
                });
            }
            Entry::Vacant(slot) => {
                slot.insert(IpCoreInfo::resolve(decl)?);
            }
        }
    }

    Ok(cores)
}
