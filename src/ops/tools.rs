//! Locations of the external tools.

use std::fmt;
use std::path::{Path, PathBuf};

use crate::util::config::ToolsConfig;
use crate::util::process::find_executable;

/// An external tool driven by Synth.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tool {
    Iverilog,
    Vvp,
    Yosys,
}

impl Tool {
    pub fn name(&self) -> &'static str {
        match self {
            Tool::Iverilog => "iverilog",
            Tool::Vvp => "vvp",
            Tool::Yosys => "yosys",
        }
    }
}

impl fmt::Display for Tool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Paths used to invoke `iverilog`, `vvp` and `yosys`.
///
/// A bare name is looked up on `PATH` when the tool is spawned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolPaths {
    pub iverilog: PathBuf,
    pub vvp: PathBuf,
    pub yosys: PathBuf,
}

impl ToolPaths {
    /// Tools inside `basepath`, or bare names without one.
    pub fn from_basepath(basepath: Option<&Path>) -> Self {
        let locate = |tool: Tool| match basepath {
            Some(dir) => dir.join(tool.name()),
            None => PathBuf::from(tool.name()),
        };
        ToolPaths {
            iverilog: locate(Tool::Iverilog),
            vvp: locate(Tool::Vvp),
            yosys: locate(Tool::Yosys),
        }
    }

    /// Combine the command-line base path with the configuration.
    ///
    /// A base path given on the command line applies to every tool.
    /// Otherwise an explicit per-tool path from the config wins over the
    /// config's base path, which wins over a bare name.
    pub fn resolve(cli_basepath: Option<&Path>, config: &ToolsConfig) -> Self {
        if cli_basepath.is_some() {
            return Self::from_basepath(cli_basepath);
        }

        let base = Self::from_basepath(config.basepath.as_deref());
        ToolPaths {
            iverilog: config.iverilog.clone().unwrap_or(base.iverilog),
            vvp: config.vvp.clone().unwrap_or(base.vvp),
            yosys: config.yosys.clone().unwrap_or(base.yosys),
        }
    }

    pub fn get(&self, tool: Tool) -> &Path {
        match tool {
            Tool::Iverilog => &self.iverilog,
            Tool::Vvp => &self.vvp,
            Tool::Yosys => &self.yosys,
        }
    }

    /// Find where `tool` would actually be spawned from, if anywhere.
    pub fn locate(&self, tool: Tool) -> Option<PathBuf> {
        let path = self.get(tool);
        if path.components().count() > 1 {
            path.is_file().then(|| path.to_path_buf())
        } else {
            find_executable(&path.to_string_lossy())
        }
    }
}

impl Default for ToolPaths {
    fn default() -> Self {
        Self::from_basepath(None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bare_names() {
        let tools = ToolPaths::default();
        assert_eq!(tools.iverilog, PathBuf::from("iverilog"));
        assert_eq!(tools.vvp, PathBuf::from("vvp"));
        assert_eq!(tools.yosys, PathBuf::from("yosys"));
    }

    #[test]
    fn test_basepath() {
        let tools = ToolPaths::from_basepath(Some(Path::new("/opt/eda/bin")));
        assert_eq!(tools.get(Tool::Iverilog), Path::new("/opt/eda/bin/iverilog"));
        assert_eq!(tools.get(Tool::Yosys), Path::new("/opt/eda/bin/yosys"));
    }

    #[test]
    fn test_cli_overrides_config() {
        let config = ToolsConfig {
            basepath: Some(PathBuf::from("/config")),
            yosys: Some(PathBuf::from("/elsewhere/yosys")),
            ..Default::default()
        };

        let tools = ToolPaths::resolve(Some(Path::new("/cli")), &config);
        assert_eq!(tools.yosys, PathBuf::from("/cli/yosys"));
        assert_eq!(tools.vvp, PathBuf::from("/cli/vvp"));
    }

    #[test]
    fn test_config_tool_overrides_config_basepath() {
        let config = ToolsConfig {
            basepath: Some(PathBuf::from("/config")),
            yosys: Some(PathBuf::from("/elsewhere/yosys")),
            ..Default::default()
        };

        let tools = ToolPaths::resolve(None, &config);
        assert_eq!(tools.yosys, PathBuf::from("/elsewhere/yosys"));
        assert_eq!(tools.iverilog, PathBuf::from("/config/iverilog"));
    }

    #[test]
    fn test_locate_missing_explicit_path() {
        let tools = ToolPaths::from_basepath(Some(Path::new("/definitely/not/here")));
        assert_eq!(tools.locate(Tool::Vvp), None);
    }
}
