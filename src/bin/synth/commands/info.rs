//! `synth info` command

use std::fmt::Write;

use anyhow::{Context, Result};

use crate::cli::InfoArgs;
use synth::util::fs::relative_path;
use synth::{GlobalContext, Project};

pub fn execute(args: InfoArgs, ctx: &GlobalContext) -> Result<()> {
    let project = Project::load(ctx.manifest_path())?;

    if args.json {
        let json =
            serde_json::to_string_pretty(&project).context("failed to serialize project")?;
        println!("{}", json);
    } else {
        print!("{}", format_project(&project, ctx.cwd()));
    }
    Ok(())
}

/// Human-readable summary of a resolved project, paths shown relative to
/// `base`.
pub fn format_project(project: &Project, base: &std::path::Path) -> String {
    let rel = |p: &std::path::Path| relative_path(base, p).display().to_string();
    let mut out = String::new();

    let _ = writeln!(out, "language:   {}", project.language());
    let _ = writeln!(out, "top module: {}", project.top_module());
    let _ = writeln!(out, "rtl root:   {}", rel(project.root_dir()));
    let _ = writeln!(out, "build dir:  {}", rel(project.build_out_dir()));

    let _ = writeln!(out, "\nRTL files ({}):", project.files().len());
    for (name, file) in project.files().iter() {
        match project.testbench(name) {
            Some(tb) => {
                let _ = writeln!(
                    out,
                    "  {:<20} {} (testbench {})",
                    name,
                    rel(file.path()),
                    rel(tb.path())
                );
            }
            None => {
                let _ = writeln!(out, "  {:<20} {}", name, rel(file.path()));
            }
        }
    }

    let _ = writeln!(out, "\nIP cores ({}):", project.ip_cores().len());
    for core in project.ip_cores().values() {
        let _ = writeln!(
            out,
            "  {:<20} {} ({} file(s))",
            core.name(),
            rel(core.root_dir()),
            core.rtl_files().len()
        );
    }

    if !project.libs().is_empty() {
        let _ = writeln!(out, "\nLibraries ({}):", project.libs().len());
        for lib in project.libs() {
            let _ = writeln!(out, "  {:<20} {}", lib.name, rel(&lib.path));
        }
    }

    let _ = writeln!(out, "\nInclude dirs:");
    for dir in project.including_dir() {
        let _ = writeln!(out, "  {}", rel(dir));
    }

    out
}
