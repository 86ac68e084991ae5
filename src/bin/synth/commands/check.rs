//! `synth check` command

use anyhow::{bail, Result};

use super::{finish_target, tool_paths};
use synth::ops::{check, format_report};
use synth::util::shell::Status;
use synth::GlobalContext;

pub fn execute(ctx: &GlobalContext) -> Result<()> {
    let target = ctx.manifest_path().display().to_string();
    finish_target(ctx, &target, "check", run(ctx))
}

fn run(ctx: &GlobalContext) -> Result<()> {
    let span = ctx.shell().span(Status::Checking, "tools and project");

    let report = check(ctx.manifest_path(), &tool_paths(ctx));
    print!("{}", format_report(&report, ctx.shell().is_verbose()));

    if !report.all_passed() {
        bail!("{} check(s) failed", report.failed_count());
    }
    span.finish("checks");
    Ok(())
}
