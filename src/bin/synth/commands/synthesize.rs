//! `synth synth` command

use std::path::Path;

use anyhow::Result;

use super::{finish_target, load_project, tool_paths};
use crate::cli::SynthArgs;
use synth::ops::synthesize;
use synth::util::shell::Status;
use synth::GlobalContext;

pub fn execute(args: SynthArgs, ctx: &GlobalContext) -> Result<()> {
    let target = args.output.display().to_string();
    finish_target(ctx, &target, "synth", run(&args.output, ctx))
}

fn run(output: &Path, ctx: &GlobalContext) -> Result<()> {
    let project = load_project(ctx)?;

    let span = ctx
        .shell()
        .span(Status::Synthesizing, format!("top module `{}`", project.top_module()));
    synthesize(&project, output, &tool_paths(ctx), ctx.shell())?;
    span.finish(output.display());
    Ok(())
}
