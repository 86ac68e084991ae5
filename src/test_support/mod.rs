//! Test utilities for Synth unit tests.
//!
//! Provides on-disk project fixtures and stand-ins for the external tools.
//!
//! # Example
//!
//! ```rust,ignore
//! use synth::test_support::ProjectFixture;
//!
//! #[test]
//! fn test_example() {
//!     let tmp = ProjectFixture::new("adder")
//!         .file("rtl/adder.v", "module adder(); endmodule")
//!         .create();
//!
//!     let project = Project::load(&tmp.path().join("project.toml")).unwrap();
//! }
//! ```

pub mod fixtures;

use std::path::{Path, PathBuf};

pub use fixtures::*;

/// Write an executable shell script standing in for a tool.
///
/// The script appends its arguments, one per line, to `<name>.args` next to
/// itself, prints `stdout` and exits with `exit_code`.
#[cfg(unix)]
pub fn fake_tool(dir: &Path, name: &str, stdout: &str, exit_code: i32) -> PathBuf {
    use std::os::unix::fs::PermissionsExt;

    let path = dir.join(name);
    let log = dir.join(format!("{}.args", name));
    let script = format!(
        "#!/bin/sh\nfor arg in \"$@\"; do printf '%s\\n' \"$arg\" >> '{log}'; done\nprintf '%s\\n' '{stdout}'\nexit {exit_code}\n",
        log = log.display(),
    );

    std::fs::write(&path, script).expect("failed to write fake tool");
    let mut perms = std::fs::metadata(&path).unwrap().permissions();
    perms.set_mode(0o755);
    std::fs::set_permissions(&path, perms).unwrap();
    path
}

/// Arguments recorded by a [`fake_tool`] invocation.
#[cfg(unix)]
pub fn recorded_args(dir: &Path, name: &str) -> Vec<String> {
    std::fs::read_to_string(dir.join(format!("{}.args", name)))
        .map(|s| s.lines().map(str::to_string).collect())
        .unwrap_or_default()
}
