//! Implementation of `synth init`.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};

use crate::core::manifest::{generate_default_manifest, MANIFEST_NAME};
use crate::ops::error::ActionError;

/// Options for initializing a project.
#[derive(Debug, Clone)]
pub struct InitOptions {
    /// Name of the top-level module
    pub top_module: String,

    /// Also write a testbench skeleton for the top module
    pub testbench: bool,
}

/// Check that `name` is a plain Verilog identifier.
pub fn validate_module_name(name: &str) -> Result<(), &'static str> {
    let mut chars = name.chars();
    match chars.next() {
        None => return Err("module name cannot be empty"),
        Some(c) if !(c.is_ascii_alphabetic() || c == '_') => {
            return Err("module name must start with a letter or underscore")
        }
        _ => {}
    }

    if chars.any(|c| !(c.is_ascii_alphanumeric() || c == '_' || c == '$')) {
        return Err("module name contains invalid characters");
    }

    Ok(())
}

/// Lay out a new project in `path`, creating the directory if needed.
///
/// Returns the path of the written manifest.
pub fn init_project(path: &Path, opts: &InitOptions) -> Result<PathBuf> {
    if let Err(reason) = validate_module_name(&opts.top_module) {
        bail!("invalid top module name `{}`: {}", opts.top_module, reason);
    }

    if !path.exists() {
        fs::create_dir_all(path)
            .with_context(|| format!("failed to create directory: {}", path.display()))?;
    }

    let manifest_path = path.join(MANIFEST_NAME);
    if manifest_path.exists() {
        return Err(ActionError::AlreadyExists {
            path: manifest_path,
        }
        .into());
    }

    fs::write(&manifest_path, generate_default_manifest(&opts.top_module))
        .with_context(|| format!("failed to write {}", MANIFEST_NAME))?;

    let rtl_dir = path.join("rtl");
    let tb_dir = path.join("tb");
    fs::create_dir_all(&rtl_dir).with_context(|| "failed to create rtl directory")?;
    fs::create_dir_all(&tb_dir).with_context(|| "failed to create tb directory")?;

    let top = &opts.top_module;
    let module_file = rtl_dir.join(format!("{}.v", top));
    if !module_file.exists() {
        fs::write(&module_file, module_skeleton(top))?;
    }

    if opts.testbench {
        let tb_file = tb_dir.join(format!("{}_tb.v", top));
        if !tb_file.exists() {
            fs::write(&tb_file, testbench_skeleton(top))?;
        }
    }

    let gitignore = path.join(".gitignore");
    if !gitignore.exists() {
        fs::write(&gitignore, "# Synth build outputs\nbuild/\n")?;
    }

    Ok(manifest_path)
}

fn module_skeleton(name: &str) -> String {
    format!(
        r#"module {name} (
    input  wire clk,
    input  wire rst_n
);

endmodule
"#
    )
}

fn testbench_skeleton(dut: &str) -> String {
    format!(
        r#"`timescale 1ns/1ps

module {dut}_tb;
    reg clk = 1'b0;
    reg rst_n = 1'b0;

    always #5 clk = ~clk;

    {dut} uut (
        .clk(clk),
        .rst_n(rst_n)
    );

    initial begin
        $dumpfile("{dut}_tb.vcd");
        $dumpvars(0, {dut}_tb);
        #20 rst_n = 1'b1;
        #100 $finish;
    end
endmodule
"#
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::project::Project;
    use tempfile::TempDir;

    fn opts(top: &str) -> InitOptions {
        InitOptions {
            top_module: top.to_string(),
            testbench: true,
        }
    }

    #[test]
    fn test_init_creates_loadable_project() {
        let tmp = TempDir::new().unwrap();
        let root = tmp.path().join("counter");

        let manifest = init_project(&root, &opts("counter")).unwrap();
        assert_eq!(manifest, root.join("project.toml"));
        assert!(root.join("rtl/counter.v").is_file());
        assert!(root.join("tb/counter_tb.v").is_file());

        let project = Project::load(&manifest).unwrap();
        assert_eq!(project.top_module(), "counter");
        assert_eq!(project.testbench("counter").unwrap().name(), "counter_tb");
    }

    #[test]
    fn test_init_without_testbench() {
        let tmp = TempDir::new().unwrap();
        let options = InitOptions {
            testbench: false,
            ..opts("alu")
        };

        init_project(tmp.path(), &options).unwrap();
        assert!(!tmp.path().join("tb/alu_tb.v").exists());
        assert!(tmp.path().join("tb").is_dir());
    }

    #[test]
    fn test_init_refuses_existing_manifest() {
        let tmp = TempDir::new().unwrap();
        init_project(tmp.path(), &opts("alu")).unwrap();

        let err = init_project(tmp.path(), &opts("alu")).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<ActionError>(),
            Some(ActionError::AlreadyExists { .. })
        ));
    }

    #[test]
    fn test_init_keeps_existing_sources() {
        let tmp = TempDir::new().unwrap();
        std::fs::create_dir_all(tmp.path().join("rtl")).unwrap();
        std::fs::write(tmp.path().join("rtl/alu.v"), "// mine\n").unwrap();

        init_project(tmp.path(), &opts("alu")).unwrap();
        let content = std::fs::read_to_string(tmp.path().join("rtl/alu.v")).unwrap();
        assert_eq!(content, "// mine\n");
    }

    #[test]
    fn test_validate_module_name() {
        assert!(validate_module_name("alu").is_ok());
        assert!(validate_module_name("_fifo_8x32").is_ok());
        assert!(validate_module_name("a$b").is_ok());
        assert!(validate_module_name("").is_err());
        assert!(validate_module_name("8bit").is_err());
        assert!(validate_module_name("my-core").is_err());
    }
}
