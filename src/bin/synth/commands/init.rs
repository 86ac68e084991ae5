//! `synth init` command

use std::path::{Path, PathBuf};

use anyhow::{bail, Result};

use crate::cli::InitArgs;
use synth::ops::init::validate_module_name;
use synth::ops::{init_project, InitOptions};
use synth::util::fs::absolutize;
use synth::util::shell::Status;
use synth::GlobalContext;

/// Derive the top module name from the arguments or directory.
pub fn determine_top_module(top: &Option<String>, path: &Path) -> String {
    top.clone().unwrap_or_else(|| {
        path.file_name()
            .and_then(|n| n.to_str())
            .map(|n| n.replace(['-', '.', ' '], "_"))
            .unwrap_or_else(|| "top".to_string())
    })
}

pub fn execute(args: InitArgs, ctx: &GlobalContext) -> Result<()> {
    let path = absolutize(ctx.cwd(), &args.path.unwrap_or_else(|| PathBuf::from(".")));
    let top_module = determine_top_module(&args.top, &path);

    if let Err(reason) = validate_module_name(&top_module) {
        bail!(
            "cannot use `{}` as the top module name: {}\n\
             \n\
             Pass a valid Verilog identifier with --top <NAME>.",
            top_module,
            reason
        );
    }

    let opts = InitOptions {
        top_module: top_module.clone(),
        testbench: !args.no_testbench,
    };
    let manifest = init_project(&path, &opts)?;

    ctx.shell().status(
        Status::Created,
        format!("project `{}` at {}", top_module, manifest.display()),
    );
    Ok(())
}
