//! Synth CLI - build, simulate and synthesize Verilog projects

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

mod cli;
mod commands;

use cli::{Cli, Commands};
use synth::ops::ActionError;
use synth::util::diagnostic::{emit, Diagnostic};
use synth::util::shell::{ColorChoice, Shell};
use synth::{GlobalContext, ProjectError};

fn main() {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("synth=debug")
    } else if cli.quiet {
        EnvFilter::new("synth=error")
    } else {
        EnvFilter::new("synth=info")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .without_time()
        .init();

    let color = if cli.no_color {
        ColorChoice::Never
    } else {
        ColorChoice::Auto
    };
    let shell = Shell::from_flags(cli.quiet, cli.verbose, color);
    let use_color = shell.use_color();

    if let Err(e) = run(cli, shell) {
        report(&e, use_color);
        std::process::exit(1);
    }
}

fn run(cli: Cli, shell: Shell) -> Result<()> {
    let ctx = GlobalContext::new(cli.project.as_deref(), shell)?.with_basepath(cli.basepath);

    match cli.command {
        Commands::Init(args) => commands::init::execute(args, &ctx),
        Commands::Check => commands::check::execute(&ctx),
        Commands::MakeSimu(args) => commands::make_simu::execute(args, &ctx),
        Commands::Simu(args) => commands::simu::execute(args, &ctx),
        Commands::Synth(args) => commands::synthesize::execute(args, &ctx),
        Commands::Info(args) => commands::info::execute(args, &ctx),
        Commands::Completions(args) => commands::completions::execute(args),
    }
}

/// Print an error, as a structured diagnostic when we know its type.
fn report(err: &anyhow::Error, color: bool) {
    let diagnostic = if let Some(e) = err.downcast_ref::<ProjectError>() {
        e.to_diagnostic()
    } else if let Some(e) = err.downcast_ref::<ActionError>() {
        e.to_diagnostic()
    } else {
        Diagnostic::error(format!("{:#}", err))
    };
    emit(&diagnostic, color);
}
