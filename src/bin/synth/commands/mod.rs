//! Command implementations

pub mod check;
pub mod completions;
pub mod info;
pub mod init;
pub mod make_simu;
pub mod simu;
pub mod synthesize;

use anyhow::Result;

use synth::ops::ToolPaths;
use synth::util::shell::Status;
use synth::{GlobalContext, Project};

/// Load the project named by the context, reporting what was found.
pub fn load_project(ctx: &GlobalContext) -> Result<Project> {
    let shell = ctx.shell();
    shell.status(Status::Loading, ctx.manifest_path().display());

    let project = Project::load(ctx.manifest_path())?;

    shell.note(format!(
        "language `{}`, top module `{}`",
        project.language(),
        project.top_module()
    ));
    shell.note(format!(
        "found {} RTL file(s), {} testbench(es), {} IP core(s)",
        project.files().len(),
        project.test_bench().len(),
        project.ip_cores().len()
    ));
    Ok(project)
}

/// Tool locations from `--basepath` and the configuration.
pub fn tool_paths(ctx: &GlobalContext) -> ToolPaths {
    ToolPaths::resolve(ctx.basepath(), &ctx.config().tools)
}

/// Report the outcome of an action on a target.
pub fn finish_target(
    ctx: &GlobalContext,
    target: &str,
    action: &str,
    result: Result<()>,
) -> Result<()> {
    let shell = ctx.shell();
    match &result {
        Ok(()) => shell.status(
            Status::Finished,
            format!("Make target \"{}\" (action=\"{}\") succeeded", target, action),
        ),
        Err(_) => shell.status(
            Status::Failed,
            format!("Make target \"{}\" (action=\"{}\") failed", target, action),
        ),
    }
    result
}
