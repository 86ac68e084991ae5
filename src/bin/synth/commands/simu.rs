//! `synth simu` command

use anyhow::Result;

use super::{finish_target, load_project, tool_paths};
use crate::cli::TargetArgs;
use synth::ops::simulate;
use synth::util::shell::Status;
use synth::GlobalContext;

pub fn execute(args: TargetArgs, ctx: &GlobalContext) -> Result<()> {
    finish_target(ctx, &args.module, "simu", run(&args.module, ctx))
}

fn run(module: &str, ctx: &GlobalContext) -> Result<()> {
    let project = load_project(ctx)?;

    let span = ctx.shell().span(Status::Simulating, format!("`{}`", module));
    simulate(&project, module, &tool_paths(ctx), ctx.shell())?;
    span.finish("simulation");
    Ok(())
}
