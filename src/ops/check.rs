//! Environment and project health checks.
//!
//! `synth check` verifies that Icarus Verilog and Yosys can be run and
//! report a recognizable version, and that the project manifest resolves.

use std::fmt::Write;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;
use std::time::{Duration, Instant};

use regex::Regex;

use crate::core::project::Project;
use crate::ops::tools::{Tool, ToolPaths};
use crate::util::process::ProcessBuilder;

static IVERILOG_VERSION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^Icarus Verilog version ([0-9]+\.[0-9]+)").expect("valid regex")
});

static YOSYS_VERSION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(Y|y)osys (([a-zA-Z0-9]|\.)+)").expect("valid regex"));

/// Result of a single check.
#[derive(Debug, Clone)]
pub struct CheckResult {
    /// Name of the check
    pub name: String,

    pub passed: bool,

    /// Human-readable status message
    pub message: String,

    /// Path to the tool (if applicable)
    pub path: Option<PathBuf>,

    /// Version string (if applicable)
    pub version: Option<String>,

    pub duration: Duration,
}

impl CheckResult {
    pub fn pass(name: impl Into<String>, message: impl Into<String>) -> Self {
        CheckResult {
            name: name.into(),
            passed: true,
            message: message.into(),
            path: None,
            version: None,
            duration: Duration::ZERO,
        }
    }

    pub fn fail(name: impl Into<String>, message: impl Into<String>) -> Self {
        CheckResult {
            passed: false,
            ..Self::pass(name, message)
        }
    }

    pub fn with_path(mut self, path: Option<PathBuf>) -> Self {
        self.path = path;
        self
    }

    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = Some(version.into());
        self
    }

    pub fn with_duration(mut self, duration: Duration) -> Self {
        self.duration = duration;
        self
    }
}

/// Summary of all checks.
#[derive(Debug, Clone, Default)]
pub struct CheckReport {
    pub checks: Vec<CheckResult>,

    /// Total time taken
    pub total_duration: Duration,
}

impl CheckReport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, check: CheckResult) {
        self.checks.push(check);
    }

    pub fn all_passed(&self) -> bool {
        self.checks.iter().all(|c| c.passed)
    }

    pub fn passed_count(&self) -> usize {
        self.checks.iter().filter(|c| c.passed).count()
    }

    pub fn failed_count(&self) -> usize {
        self.checks.iter().filter(|c| !c.passed).count()
    }
}

/// Run every check.
///
/// A failing check never stops the others from running.
pub fn check(manifest_path: &Path, tools: &ToolPaths) -> CheckReport {
    let start = Instant::now();
    let mut report = CheckReport::new();

    report.add(check_tool(tools, Tool::Iverilog, "-v", parse_iverilog_version));
    report.add(check_tool(tools, Tool::Yosys, "-V", parse_yosys_version));
    report.add(check_project(manifest_path));

    report.total_duration = start.elapsed();
    report
}

/// Extract the version from `iverilog -v` output.
pub fn parse_iverilog_version(stdout: &str) -> Option<String> {
    IVERILOG_VERSION
        .captures(stdout)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
}

/// Extract the version from `yosys -V` output.
pub fn parse_yosys_version(stdout: &str) -> Option<String> {
    YOSYS_VERSION
        .captures(stdout)
        .and_then(|caps| caps.get(2))
        .map(|m| m.as_str().to_string())
}

fn check_tool(
    tools: &ToolPaths,
    tool: Tool,
    version_flag: &str,
    parse: fn(&str) -> Option<String>,
) -> CheckResult {
    let start = Instant::now();
    let program = tools.get(tool);
    let name = format!("{} {}", tool, version_flag);

    let result = match ProcessBuilder::new(program).arg(version_flag).exec() {
        Err(e) => CheckResult::fail(
            name,
            format!("{:#}; did you forget to add it to PATH?", e),
        ),
        Ok(output) => {
            let stdout = String::from_utf8_lossy(&output.stdout);
            match parse(&stdout) {
                Some(version) => {
                    CheckResult::pass(name, format!("{} version {}", tool, version))
                        .with_version(version)
                        .with_path(tools.locate(tool))
                }
                None => CheckResult::fail(
                    name,
                    format!("{} command output is not recognized", tool),
                )
                .with_path(tools.locate(tool)),
            }
        }
    };

    tracing::debug!("{}: passed={}", result.name, result.passed);
    result.with_duration(start.elapsed())
}

fn check_project(manifest_path: &Path) -> CheckResult {
    let start = Instant::now();
    let name = "project";

    let result = match Project::load(manifest_path) {
        Ok(project) => CheckResult::pass(
            name,
            format!(
                "top module `{}`, {} RTL file(s), {} testbench(es), {} IP core(s)",
                project.top_module(),
                project.files().len(),
                project.test_bench().len(),
                project.ip_cores().len()
            ),
        ),
        Err(e) => CheckResult::fail(name, format!("{} ({})", e, e.kind())),
    };

    result
        .with_path(Some(manifest_path.to_path_buf()))
        .with_duration(start.elapsed())
}

/// Format the report for display.
pub fn format_report(report: &CheckReport, verbose: bool) -> String {
    let mut output = String::new();

    let _ = writeln!(output, "Checks:");
    for check in &report.checks {
        let status = if check.passed { "[OK]" } else { "[!!]" };
        let _ = writeln!(output, "  {} {}", status, check.name);

        if verbose || !check.passed {
            let _ = writeln!(output, "      {}", check.message);
        }
        if verbose {
            if let Some(path) = &check.path {
                let _ = writeln!(output, "      Path: {}", path.display());
            }
            if let Some(version) = &check.version {
                let _ = writeln!(output, "      Version: {}", version);
            }
        }
    }

    let _ = writeln!(
        output,
        "\nSummary: {} passed, {} failed",
        report.passed_count(),
        report.failed_count()
    );

    output
}
