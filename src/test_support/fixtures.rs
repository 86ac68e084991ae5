//! Project fixtures written to temporary directories.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

/// Fixture for a project layout on disk.
///
/// Defaults mirror `synth init`: sources under `rtl/`, testbenches under
/// `tb/`, both matched with `*.v`, testbenches named `{}_tb`, outputs in
/// `build/`.
#[derive(Debug, Clone)]
pub struct ProjectFixture {
    top_module: String,
    rtl_dir: String,
    tb_dir: String,
    build_dir: String,
    pattern: String,
    tb_file_fmt: String,
    ip: Vec<(String, String)>,
    spec_path: Option<String>,
    spec_content: Option<String>,
    files: BTreeMap<PathBuf, String>,
    create_dirs: bool,
}

impl ProjectFixture {
    /// Create a fixture for a project whose top module is `top_module`.
    pub fn new(top_module: impl Into<String>) -> Self {
        ProjectFixture {
            top_module: top_module.into(),
            rtl_dir: "rtl".to_string(),
            tb_dir: "tb".to_string(),
            build_dir: "build".to_string(),
            pattern: "*.v".to_string(),
            tb_file_fmt: "{}_tb".to_string(),
            ip: Vec::new(),
            spec_path: None,
            spec_content: None,
            files: BTreeMap::new(),
            create_dirs: true,
        }
    }

    pub fn tb_dir(mut self, dir: impl Into<String>) -> Self {
        self.tb_dir = dir.into();
        self
    }

    pub fn build_dir(mut self, dir: impl Into<String>) -> Self {
        self.build_dir = dir.into();
        self
    }

    pub fn tb_file_fmt(mut self, fmt: impl Into<String>) -> Self {
        self.tb_file_fmt = fmt.into();
        self
    }

    /// Declare an IP core rooted at `dir`.
    pub fn ip(mut self, name: impl Into<String>, dir: impl Into<String>) -> Self {
        self.ip.push((name.into(), dir.into()));
        self
    }

    /// Write `spec.toml` with `content` and reference it from the manifest.
    pub fn spec(mut self, content: impl Into<String>) -> Self {
        self.spec_path = Some("spec.toml".to_string());
        self.spec_content = Some(content.into());
        self
    }

    /// Reference a spec file without writing it.
    pub fn spec_path(mut self, path: impl Into<String>) -> Self {
        self.spec_path = Some(path.into());
        self.spec_content = None;
        self
    }

    /// Add a file, relative to the project root.
    pub fn file(mut self, path: impl Into<PathBuf>, content: impl Into<String>) -> Self {
        self.files.insert(path.into(), content.into());
        self
    }

    /// Don't create the RTL and testbench directories up front.
    pub fn skip_dirs(mut self) -> Self {
        self.create_dirs = false;
        self
    }

    /// Render the manifest.
    pub fn manifest(&self) -> String {
        let mut manifest = format!(
            r#"[project]
language = "verilog"
top_module = "{top}"
rtl_dir = "{rtl}"
rtl_dir_pattern = "{pattern}"
tb_dir = "{tb}"
tb_dir_pattern = "{pattern}"
tb_file_fmt = "{fmt}"
build_dir = "{build}"
"#,
            top = self.top_module,
            rtl = self.rtl_dir,
            tb = self.tb_dir,
            pattern = self.pattern,
            fmt = self.tb_file_fmt,
            build = self.build_dir,
        );

        if let Some(spec) = &self.spec_path {
            manifest.push_str(&format!("spec = \"{}\"\n", spec));
        }

        for (name, dir) in &self.ip {
            manifest.push_str(&format!(
                "\n[[ip]]\nname = \"{}\"\nrtl_dir = \"{}\"\nrtl_dir_pattern = \"{}\"\n",
                name, dir, self.pattern
            ));
        }

        manifest
    }

    /// Write this fixture to a real directory, returning the manifest path.
    pub fn write_to(&self, root: &Path) -> std::io::Result<PathBuf> {
        if self.create_dirs {
            std::fs::create_dir_all(root.join(&self.rtl_dir))?;
            std::fs::create_dir_all(root.join(&self.tb_dir))?;
        }

        let manifest_path = root.join("project.toml");
        std::fs::write(&manifest_path, self.manifest())?;

        if let (Some(path), Some(content)) = (&self.spec_path, &self.spec_content) {
            std::fs::write(root.join(path), content)?;
        }

        for (rel_path, content) in &self.files {
            let full_path = root.join(rel_path);
            if let Some(parent) = full_path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            std::fs::write(&full_path, content)?;
        }

        Ok(manifest_path)
    }

    /// Write this fixture to a fresh temporary directory.
    pub fn create(&self) -> TempDir {
        let tmp = TempDir::new().expect("failed to create temp dir");
        self.write_to(tmp.path()).expect("failed to write fixture");
        tmp
    }
}

/// Common Verilog source templates.
pub mod sources {
    /// An empty module.
    pub fn module(name: &str) -> String {
        format!("module {name}();\nendmodule\n")
    }

    /// A testbench instantiating `dut`.
    pub fn testbench(dut: &str) -> String {
        format!(
            r#"`timescale 1ns/1ps
module {dut}_tb();
    {dut} uut();
    initial begin
        $finish;
    end
endmodule
"#
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixture_writes_layout() {
        let tmp = ProjectFixture::new("adder")
            .file("rtl/adder.v", sources::module("adder"))
            .file("tb/adder_tb.v", sources::testbench("adder"))
            .ip("fifo", "ip/fifo")
            .spec("ext_including_dir = []\n")
            .create();

        assert!(tmp.path().join("project.toml").is_file());
        assert!(tmp.path().join("spec.toml").is_file());
        assert!(tmp.path().join("rtl/adder.v").is_file());

        let manifest = std::fs::read_to_string(tmp.path().join("project.toml")).unwrap();
        assert!(manifest.contains("top_module = \"adder\""));
        assert!(manifest.contains("[[ip]]"));
        assert!(manifest.contains("spec = \"spec.toml\""));
    }

    #[test]
    fn test_skip_dirs() {
        let tmp = ProjectFixture::new("adder").skip_dirs().create();
        assert!(!tmp.path().join("rtl").exists());
        assert!(!tmp.path().join("tb").exists());
    }
}
