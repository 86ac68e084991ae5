//! Errors raised by the actions, as opposed to project resolution.

use std::path::PathBuf;

use miette::Diagnostic as MietteDiagnostic;
use thiserror::Error;

use crate::util::diagnostic::{suggestions, Diagnostic};

/// A requested action cannot run against the resolved project.
#[derive(Debug, Error, MietteDiagnostic)]
pub enum ActionError {
    #[error("module `{name}` does not exist")]
    #[diagnostic(
        code(synth::action::unknown_module),
        help("available modules: {available}")
    )]
    UnknownModule { name: String, available: String },

    #[error("testbench for module `{module}` does not exist")]
    #[diagnostic(code(synth::action::missing_testbench))]
    MissingTestbench { module: String, expected: String },

    #[error("`{tool}` was not found")]
    #[diagnostic(code(synth::action::tool_not_found))]
    ToolNotFound { tool: String, path: PathBuf },

    #[error("`{tool}` exited with {status}")]
    #[diagnostic(code(synth::action::tool_failed))]
    ToolFailed {
        tool: String,
        status: String,
        command: String,
    },

    #[error("`{}` already exists", path.display())]
    #[diagnostic(code(synth::action::already_exists))]
    AlreadyExists { path: PathBuf },
}

impl ActionError {
    /// Render this error as a user-facing diagnostic.
    pub fn to_diagnostic(&self) -> Diagnostic {
        let diag = Diagnostic::error(self.to_string());
        match self {
            ActionError::UnknownModule { available, .. } => {
                diag.with_context(format!("available modules: {}", available))
            }
            ActionError::MissingTestbench { expected, .. } => diag
                .with_context(format!("expected a testbench module named `{}`", expected))
                .with_suggestion(suggestions::NO_TESTBENCH),
            ActionError::ToolNotFound { path, .. } => diag
                .with_context(format!("looked for {}", path.display()))
                .with_suggestion(suggestions::TOOL_NOT_FOUND),
            ActionError::ToolFailed { command, .. } => diag
                .with_context(format!("command: {}", command))
                .with_suggestion(suggestions::TOOL_FAILED),
            ActionError::AlreadyExists { path } => diag.with_location(path),
        }
    }
}
