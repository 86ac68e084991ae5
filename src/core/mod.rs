//! Core data structures for Synth.
//!
//! This module contains the project resolution model:
//! - File discovery and module registries
//! - Manifest and spec file parsing
//! - Testbench matching and IP core resolution
//! - The resolved [`Project`]

pub mod discover;
pub mod error;
pub mod ip;
pub mod manifest;
pub mod project;
pub mod registry;
pub mod spec;
pub mod testbench;

pub use discover::{discover, FileDiscoverer};
pub use error::{ErrorKind, ProjectError};
pub use ip::IpCoreInfo;
pub use manifest::{IpDeclaration, Manifest, MANIFEST_NAME};
pub use project::Project;
pub use registry::{FileInfo, ModuleRegistry, RegistryKind};
pub use spec::{LibInfo, SpecFile};
pub use testbench::TestbenchTemplate;
