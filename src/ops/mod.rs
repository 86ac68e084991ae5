//! High-level operations.
//!
//! Each action takes a resolved [`Project`](crate::core::Project) and drives
//! one of the external tools. Command lines are built separately from
//! running them.

pub mod check;
pub mod error;
pub mod init;
pub mod simulate;
pub mod synthesize;
pub mod tools;

use std::io;

use anyhow::Result;

use crate::util::process::{describe_status, ProcessBuilder};
use crate::util::shell::{Shell, Status};

pub use check::{check, format_report, CheckReport, CheckResult};
pub use error::ActionError;
pub use init::{init_project, InitOptions};
pub use simulate::{make_testbench, simulate};
pub use synthesize::synthesize;
pub use tools::{Tool, ToolPaths};

/// Run a tool with inherited stdio, requiring a zero exit status.
pub(crate) fn run_tool(shell: &Shell, tool: Tool, cmd: &ProcessBuilder) -> Result<()> {
    shell.status(Status::Running, format!("{}...", tool));
    shell.verbose(Status::Info, cmd.display_command());
    tracing::debug!("spawning {}", cmd.display_command());

    let status = match cmd.status() {
        Ok(status) => status,
        Err(e) => {
            let not_found = e
                .root_cause()
                .downcast_ref::<io::Error>()
                .is_some_and(|io| io.kind() == io::ErrorKind::NotFound);
            if not_found {
                return Err(ActionError::ToolNotFound {
                    tool: tool.to_string(),
                    path: cmd.get_program().to_path_buf(),
                }
                .into());
            }
            return Err(e);
        }
    };

    if !status.success() {
        return Err(ActionError::ToolFailed {
            tool: tool.to_string(),
            status: describe_status(&status),
            command: cmd.display_command(),
        }
        .into());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::util::shell::{ColorChoice, Verbosity};

    #[test]
    fn test_run_missing_tool() {
        let shell = Shell::new(Verbosity::Quiet, ColorChoice::Never);
        let cmd = ProcessBuilder::new("/definitely/not/here/iverilog").arg("-v");

        let err = run_tool(&shell, Tool::Iverilog, &cmd).unwrap_err();
        let action = err.downcast_ref::<ActionError>().unwrap();
        assert!(matches!(action, ActionError::ToolNotFound { tool, .. } if tool == "iverilog"));
    }

    #[test]
    #[cfg(unix)]
    fn test_run_failing_tool() {
        let tmp = tempfile::TempDir::new().unwrap();
        let yosys = crate::test_support::fake_tool(tmp.path(), "yosys", "ERROR", 3);
        let shell = Shell::new(Verbosity::Quiet, ColorChoice::Never);
        let cmd = ProcessBuilder::new(&yosys).args(["-p", "synth"]);

        let err = run_tool(&shell, Tool::Yosys, &cmd).unwrap_err();
        match err.downcast_ref::<ActionError>() {
            Some(ActionError::ToolFailed {
                status, command, ..
            }) => {
                assert_eq!(status, "exit code 3");
                assert!(command.ends_with("-p synth"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
