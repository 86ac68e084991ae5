//! CLI definitions using clap.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use clap_complete::Shell as CompletionShell;

/// Synth - build, simulate and synthesize Verilog projects
#[derive(Parser)]
#[command(name = "synth")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Project manifest [default: ./project.toml, searched upward]
    #[arg(long, global = true, value_name = "PATH")]
    pub project: Option<PathBuf>,

    /// Directory containing iverilog, vvp and yosys
    #[arg(long, global = true, value_name = "DIR", env = "SYNTH_TOOL_PATH")]
    pub basepath: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Only print errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Create a project.toml and source layout
    Init(InitArgs),

    /// Check that the tools are installed and the project resolves
    Check,

    /// Compile the simulation of a module with its testbench
    #[command(name = "make-simu", alias = "make_simu")]
    MakeSimu(TargetArgs),

    /// Compile and run the simulation of a module
    Simu(TargetArgs),

    /// Synthesize the project to a gate-level netlist
    Synth(SynthArgs),

    /// Show the resolved project
    Info(InfoArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

#[derive(Args)]
pub struct InitArgs {
    /// Top-level module name (defaults to the directory name)
    #[arg(long)]
    pub top: Option<String>,

    /// Don't write a testbench skeleton
    #[arg(long)]
    pub no_testbench: bool,

    /// Directory to initialize (defaults to current directory)
    pub path: Option<PathBuf>,
}

#[derive(Args)]
pub struct TargetArgs {
    /// Module to simulate
    pub module: String,
}

#[derive(Args)]
pub struct SynthArgs {
    /// Netlist file to write
    pub output: PathBuf,
}

#[derive(Args)]
pub struct InfoArgs {
    /// Print the whole resolved project as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: CompletionShell,
}
