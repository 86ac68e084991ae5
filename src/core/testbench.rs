//! Testbench matching.
//!
//! A module `m` has a testbench when the testbench directory contains a file
//! whose stem is `tb_file_fmt` with `m` substituted into its slot.

use std::fmt;

use serde::{Serialize, Serializer};

use crate::core::error::ProjectError;
use crate::core::registry::{ModuleRegistry, RegistryKind};

/// A naming template with exactly one slot for a module name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TestbenchTemplate {
    prefix: String,
    suffix: String,
}

impl TestbenchTemplate {
    /// Parse a template such as `"{}_tb"` or `"tb_{0}"`.
    pub fn parse(template: &str) -> Result<Self, ProjectError> {
        let invalid = || ProjectError::InvalidTemplate {
            template: template.to_string(),
        };

        let (prefix, rest) = template
            .split_once("{}")
            .or_else(|| template.split_once("{0}"))
            .ok_or_else(invalid)?;

        if prefix.contains(['{', '}']) || rest.contains(['{', '}']) {
            return Err(invalid());
        }

        Ok(TestbenchTemplate {
            prefix: prefix.to_string(),
            suffix: rest.to_string(),
        })
    }

    /// Substitute a module name into the slot.
    pub fn apply(&self, module: &str) -> String {
        format!("{}{}{}", self.prefix, module, self.suffix)
    }
}

impl fmt::Display for TestbenchTemplate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{{}}{}", self.prefix, self.suffix)
    }
}

impl Serialize for TestbenchTemplate {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Match every primary module to its testbench file, if any.
///
/// The result is keyed by module name and only contains modules present in
/// `modules`. Modules without a testbench are left out.
pub fn resolve(
    modules: &ModuleRegistry,
    template: &TestbenchTemplate,
    testbench_files: &ModuleRegistry,
) -> ModuleRegistry {
    let matched = modules.names().filter_map(|name| {
        let expected = template.apply(name);
        let file = testbench_files.get(&expected)?;
        tracing::trace!("testbench for `{}` is {}", name, file.path().display());
        Some((name.to_string(), file.clone()))
    });

    // Keys come from `modules`, so they are already unique
    ModuleRegistry::from_unique(RegistryKind::Testbench, matched)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::registry::FileInfo;

    fn registry(kind: RegistryKind, paths: &[&str]) -> ModuleRegistry {
        let mut registry = ModuleRegistry::new(kind);
        registry
            .register_all(paths.iter().map(|p| FileInfo::from_path(*p)))
            .unwrap();
        registry
    }

    #[test]
    fn test_template_parse() {
        let t = TestbenchTemplate::parse("{}_tb").unwrap();
        assert_eq!(t.apply("adder"), "adder_tb");

        let t = TestbenchTemplate::parse("tb_{0}").unwrap();
        assert_eq!(t.apply("adder"), "tb_adder");
        assert_eq!(t.to_string(), "tb_{}");

        assert!(TestbenchTemplate::parse("adder_tb").is_err());
        assert!(TestbenchTemplate::parse("{}_{}").is_err());
        assert!(TestbenchTemplate::parse("{name}_tb").is_err());
    }

    #[test]
    fn test_resolve_matches_by_template() {
        let modules = registry(RegistryKind::Rtl, &["/rtl/adder.v", "/rtl/mux.v"]);
        let tb_files = registry(
            RegistryKind::Testbench,
            &["/tb/adder_tb.v", "/tb/helper.v"],
        );
        let template = TestbenchTemplate::parse("{}_tb").unwrap();

        let testbenches = resolve(&modules, &template, &tb_files);
        assert_eq!(testbenches.len(), 1);
        assert_eq!(
            testbenches.get("adder").unwrap().path(),
            std::path::Path::new("/tb/adder_tb.v")
        );
        assert!(!testbenches.contains("mux"));
        assert!(!testbenches.contains("helper"));
    }

    #[test]
    fn test_resolve_keys_by_module_under_test() {
        let modules = registry(RegistryKind::Rtl, &["/rtl/adder.v", "/rtl/mux.v"]);
        let tb_files = registry(RegistryKind::Testbench, &["/tb/tb_adder.v", "/tb/tb_mux.v"]);
        let template = TestbenchTemplate::parse("tb_{}").unwrap();

        let testbenches = resolve(&modules, &template, &tb_files);
        assert_eq!(testbenches.kind(), &RegistryKind::Testbench);
        assert_eq!(testbenches.names().collect::<Vec<_>>(), vec!["adder", "mux"]);
        assert_eq!(testbenches.get("mux").unwrap().name(), "tb_mux");
        assert!(!testbenches.contains("tb_adder"));
    }

    #[test]
    fn test_resolve_is_deterministic_subset() {
        let modules = registry(
            RegistryKind::Rtl,
            &["/rtl/a.v", "/rtl/b.v", "/rtl/c.v"],
        );
        let tb_files = registry(
            RegistryKind::Testbench,
            &["/tb/a_tb.v", "/tb/c_tb.v", "/tb/d_tb.v"],
        );
        let template = TestbenchTemplate::parse("{}_tb").unwrap();

        let first = resolve(&modules, &template, &tb_files);
        let second = resolve(&modules, &template, &tb_files);

        let first: Vec<_> = first.iter().map(|(k, v)| (k.to_string(), v.clone())).collect();
        let second: Vec<_> = second.iter().map(|(k, v)| (k.to_string(), v.clone())).collect();
        assert_eq!(first, second);
        assert!(first.iter().all(|(name, _)| modules.contains(name)));
        assert_eq!(first.len(), 2);
    }
}
