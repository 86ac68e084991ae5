//! Testbench compilation with Icarus Verilog and simulation with `vvp`.

use std::path::{Path, PathBuf};

use anyhow::Result;

use crate::core::project::Project;
use crate::ops::error::ActionError;
use crate::ops::run_tool;
use crate::ops::tools::{Tool, ToolPaths};
use crate::util::process::ProcessBuilder;
use crate::util::shell::Shell;

/// Where the compiled simulation of `module` is written.
pub fn simulation_output(project: &Project, module: &str) -> PathBuf {
    project.build_out_dir().join(format!("{}.vo", module))
}

/// Build the `iverilog` command compiling `module` with its testbench.
///
/// Search paths come in a fixed order: include dirs (`-I`), library dirs,
/// IP core roots, then the RTL root (all `-y`). The module file and its
/// testbench come last.
pub fn iverilog_command(
    project: &Project,
    module: &str,
    tools: &ToolPaths,
) -> Result<(ProcessBuilder, PathBuf), ActionError> {
    let source = project
        .module(module)
        .ok_or_else(|| ActionError::UnknownModule {
            name: module.to_string(),
            available: project.files().names().collect::<Vec<_>>().join(", "),
        })?;

    let testbench = project
        .testbench(module)
        .ok_or_else(|| ActionError::MissingTestbench {
            module: module.to_string(),
            expected: project.testbench_template().apply(module),
        })?;

    let output = simulation_output(project, module);

    let mut cmd = ProcessBuilder::new(&tools.iverilog).arg("-o").arg(&output);
    for dir in project.including_dir() {
        cmd = cmd.arg("-I").arg(dir);
    }
    for lib in project.libs() {
        cmd = cmd.arg("-y").arg(&lib.path);
    }
    for core in project.ip_cores().values() {
        cmd = cmd.arg("-y").arg(core.root_dir());
    }
    cmd = cmd
        .arg("-y")
        .arg(project.root_dir())
        .arg(source.path())
        .arg(testbench.path());

    Ok((cmd, output))
}

/// Build the `vvp` command running a compiled simulation.
pub fn vvp_command(output: &Path, tools: &ToolPaths) -> ProcessBuilder {
    ProcessBuilder::new(&tools.vvp).arg("-n").arg(output)
}

/// Compile the simulation of `module`, returning the path of the output.
pub fn make_testbench(
    project: &Project,
    module: &str,
    tools: &ToolPaths,
    shell: &Shell,
) -> Result<PathBuf> {
    let (cmd, output) = iverilog_command(project, module, tools)?;
    run_tool(shell, Tool::Iverilog, &cmd)?;
    Ok(output)
}

/// Compile and run the simulation of `module`.
pub fn simulate(
    project: &Project,
    module: &str,
    tools: &ToolPaths,
    shell: &Shell,
) -> Result<PathBuf> {
    let output = make_testbench(project, module, tools, shell)?;
    run_tool(shell, Tool::Vvp, &vvp_command(&output, tools))?;
    Ok(output)
}
