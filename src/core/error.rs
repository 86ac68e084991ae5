//! Project resolution errors.
//!
//! Every failure while building a [`Project`](crate::core::Project) is a
//! [`ProjectError`]. Each variant belongs to exactly one [`ErrorKind`], which
//! is the whole taxonomy callers need to branch on.

use std::fmt;
use std::path::PathBuf;

use miette::Diagnostic as MietteDiagnostic;
use thiserror::Error;

use crate::core::manifest::MANIFEST_NAME;
use crate::core::registry::RegistryKind;
use crate::util::diagnostic::{suggestions, Diagnostic};

/// Coarse classification of a [`ProjectError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// A required manifest key is absent, or the manifest cannot be parsed.
    ManifestIncomplete,
    /// A path referenced by a manifest does not exist.
    MissingFile,
    /// Duplicate modules, or a declared top module that was not found.
    StructuralConflict,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorKind::ManifestIncomplete => write!(f, "manifest incomplete"),
            ErrorKind::MissingFile => write!(f, "missing file"),
            ErrorKind::StructuralConflict => write!(f, "structural conflict"),
        }
    }
}

/// Error raised while resolving a project.
#[derive(Debug, Error, MietteDiagnostic)]
pub enum ProjectError {
    #[error("manifest `{}` is missing required key(s): {}", path.display(), missing.join(", "))]
    #[diagnostic(
        code(synth::manifest::incomplete),
        help("Add the missing keys to the manifest")
    )]
    ManifestIncomplete { path: PathBuf, missing: Vec<String> },

    #[error("failed to parse manifest `{}`", path.display())]
    #[diagnostic(code(synth::manifest::malformed))]
    MalformedManifest {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("invalid testbench file format `{template}`")]
    #[diagnostic(
        code(synth::manifest::tb_file_fmt),
        help("`tb_file_fmt` must contain exactly one `{{}}` slot, e.g. \"{{}}_tb\"")
    )]
    InvalidTemplate { template: String },

    #[error("invalid file pattern `{pattern}`: {message}")]
    #[diagnostic(code(synth::manifest::pattern))]
    InvalidPattern { pattern: String, message: String },

    #[error("missing file `{}`", path.display())]
    #[diagnostic(
        code(synth::fs::missing),
        help("Check that the path in the manifest is correct")
    )]
    MissingFile { path: PathBuf },

    #[error("failed to access `{}`", path.display())]
    #[diagnostic(code(synth::fs::io))]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("module `{name}` already exists in {registry}")]
    #[diagnostic(
        code(synth::project::duplicate_module),
        help("Rename one of the files or narrow the file pattern")
    )]
    DuplicateModule {
        name: String,
        registry: RegistryKind,
        first: PathBuf,
        second: PathBuf,
    },

    #[error("top module `{name}` does not exist")]
    #[diagnostic(
        code(synth::project::missing_top_module),
        help("Check `top_module` and `rtl_dir_pattern` in the manifest")
    )]
    MissingTopModule { name: String },

    #[error("cannot find top module `{name}` in IP core `{name}`")]
    #[diagnostic(
        code(synth::project::missing_ip_top_module),
        help("An IP core must contain a module named after the core")
    )]
    MissingIpTopModule { name: String, root_dir: PathBuf },

    #[error("IP core `{name}` is declared more than once")]
    #[diagnostic(code(synth::project::duplicate_ip_core))]
    DuplicateIpCore { name: String },
}

impl ProjectError {
    /// The taxonomy class of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            ProjectError::ManifestIncomplete { .. }
            | ProjectError::MalformedManifest { .. }
            | ProjectError::InvalidTemplate { .. }
            | ProjectError::InvalidPattern { .. } => ErrorKind::ManifestIncomplete,
            ProjectError::MissingFile { .. } | ProjectError::Io { .. } => ErrorKind::MissingFile,
            ProjectError::DuplicateModule { .. }
            | ProjectError::MissingTopModule { .. }
            | ProjectError::MissingIpTopModule { .. }
            | ProjectError::DuplicateIpCore { .. } => ErrorKind::StructuralConflict,
        }
    }

    /// Convert to a user-friendly diagnostic.
    pub fn to_diagnostic(&self) -> Diagnostic {
        let mut diag = Diagnostic::error(self.to_string()).with_context(self.kind().to_string());

        match self {
            ProjectError::ManifestIncomplete { path, .. } => {
                diag = diag.with_location(path);
            }
            ProjectError::MalformedManifest { path, source } => {
                diag = diag
                    .with_location(path)
                    .with_context(source.message().to_string());
            }
            ProjectError::MissingFile { path } if path.ends_with(MANIFEST_NAME) => {
                diag = diag.with_suggestion(suggestions::NO_MANIFEST);
            }
            ProjectError::Io { source, .. } => {
                diag = diag.with_context(source.to_string());
            }
            ProjectError::DuplicateModule { first, second, .. } => {
                diag = diag
                    .with_context(format!("first defined in {}", first.display()))
                    .with_context(format!("redefined in {}", second.display()));
            }
            ProjectError::MissingIpTopModule { name, root_dir } => {
                diag = diag.with_context(format!(
                    "expected a file named `{}` under {}",
                    name,
                    root_dir.display()
                ));
            }
            _ => {}
        }

        if let Some(help) = MietteDiagnostic::help(self) {
            diag = diag.with_suggestion(help.to_string());
        }

        diag
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_kinds() {
        let err = ProjectError::ManifestIncomplete {
            path: PathBuf::from("project.toml"),
            missing: vec!["project.top_module".to_string()],
        };
        assert_eq!(err.kind(), ErrorKind::ManifestIncomplete);

        let err = ProjectError::MissingFile {
            path: PathBuf::from("rtl"),
        };
        assert_eq!(err.kind(), ErrorKind::MissingFile);

        let err = ProjectError::MissingTopModule {
            name: "adder".to_string(),
        };
        assert_eq!(err.kind(), ErrorKind::StructuralConflict);
    }

    #[test]
    fn test_missing_keys_are_listed_together() {
        let err = ProjectError::ManifestIncomplete {
            path: PathBuf::from("project.toml"),
            missing: vec!["project.language".to_string(), "ip[0].name".to_string()],
        };
        let msg = err.to_string();
        assert!(msg.contains("project.language, ip[0].name"));
    }

    #[test]
    fn test_duplicate_module_diagnostic() {
        let err = ProjectError::DuplicateModule {
            name: "adder".to_string(),
            registry: RegistryKind::Rtl,
            first: PathBuf::from("/rtl/adder.v"),
            second: PathBuf::from("/rtl/alt/adder.v"),
        };

        let output = err.to_diagnostic().format(false);
        assert!(output.contains("module `adder` already exists in RTL sources"));
        assert!(output.contains("/rtl/alt/adder.v"));
        assert!(output.contains("help: consider:"));
    }
}
