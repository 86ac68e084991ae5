//! Logic synthesis with Yosys.

use std::path::Path;

use anyhow::Result;

use crate::core::project::Project;
use crate::ops::run_tool;
use crate::ops::tools::{Tool, ToolPaths};
use crate::util::process::ProcessBuilder;
use crate::util::shell::Shell;

/// Yosys commands loading every project module and checking the hierarchy
/// under the top module.
pub fn load_script(project: &Project) -> Vec<String> {
    let mut script: Vec<String> = project
        .files()
        .iter()
        .map(|(_, file)| format!("read_verilog {}", file.path().display()))
        .collect();
    script.push(format!("hierarchy -check -top {}", project.top_module()));
    script
}

/// The full synthesis script, commands joined with `; `.
pub fn synthesis_script(project: &Project, output: &Path) -> String {
    let mut script = load_script(project);
    script.push("synth".to_string());
    script.push(format!("write_verilog {}", output.display()));
    script.join("; ")
}

/// Build the `yosys` command synthesizing the project into `output`.
pub fn yosys_command(project: &Project, output: &Path, tools: &ToolPaths) -> ProcessBuilder {
    ProcessBuilder::new(&tools.yosys)
        .args(["-Q", "-v", "info", "-p"])
        .arg(synthesis_script(project, output))
}

/// Synthesize the project to a gate-level netlist at `output`.
pub fn synthesize(
    project: &Project,
    output: &Path,
    tools: &ToolPaths,
    shell: &Shell,
) -> Result<()> {
    run_tool(shell, Tool::Yosys, &yosys_command(project, output, tools))
}
