//! Synth - a manifest-driven build and simulation orchestrator for Verilog
//!
//! This crate resolves a `project.toml` manifest and the source tree it
//! describes into a validated [`Project`] model, and drives external tools
//! (Icarus Verilog, Yosys) from that model.

pub mod core;
pub mod ops;
pub mod util;

/// Test fixtures for project layouts on disk.
#[cfg(test)]
pub mod test_support;

pub use crate::core::{
    error::{ErrorKind, ProjectError},
    ip::IpCoreInfo,
    manifest::Manifest,
    project::Project,
    registry::{FileInfo, ModuleRegistry, RegistryKind},
    spec::LibInfo,
};

pub use util::context::GlobalContext;
