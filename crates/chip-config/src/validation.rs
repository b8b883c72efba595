//! Opt-in eager checking of the registry against the host.
//!
//! Building a registry never touches the tools themselves. Pipelines that
//! want to fail before the first subprocess call can run a validation pass
//! and turn the report into an error.

use std::ffi::OsStr;
use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::{info, warn};

use crate::error::{Error, Result};
use crate::registry::ExecutableRegistry;
use crate::tool::{Tool, ToolKind};

/// Outcome of checking a single tool.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ToolStatus {
    pub tool: Tool,
    /// Configured value that was checked
    pub value: String,
    /// Where the tool was found, if anywhere
    pub located: Option<PathBuf>,
    /// False for tools this platform never uses
    pub required: bool,
}

impl ToolStatus {
    pub fn is_missing(&self) -> bool {
        self.required && self.located.is_none()
    }
}

/// Validation result for every tool in a registry.
#[derive(Debug, Clone, Serialize)]
pub struct ValidationReport {
    pub statuses: Vec<ToolStatus>,
}

impl ValidationReport {
    /// True when every required tool was located.
    pub fn is_ready(&self) -> bool {
        !self.statuses.iter().any(ToolStatus::is_missing)
    }

    /// Required tools that could not be located.
    pub fn missing(&self) -> Vec<Tool> {
        self.statuses
            .iter()
            .filter(|s| s.is_missing())
            .map(|s| s.tool)
            .collect()
    }

    pub fn status(&self, tool: Tool) -> Option<&ToolStatus> {
        self.statuses.iter().find(|s| s.tool == tool)
    }

    /// Convert a report with missing tools into [`Error::MissingTools`].
    pub fn into_result(self) -> Result<Self> {
        let missing = self.missing();
        if missing.is_empty() {
            Ok(self)
        } else {
            Err(Error::MissingTools { tools: missing })
        }
    }
}

impl ExecutableRegistry {
    /// Check every entry against the process `PATH` and the filesystem.
    pub fn validate(&self) -> ValidationReport {
        self.validate_with(|token| which::which(token).ok())
    }

    /// Check every entry, looking commands up only in `search_path`.
    ///
    /// `search_path` uses the platform's `PATH` syntax.
    pub fn validate_in(&self, search_path: impl AsRef<OsStr>) -> ValidationReport {
        let search_path = search_path.as_ref();
        let cwd = self.install_dir().to_path_buf();
        self.validate_with(|token| which::which_in(token, Some(search_path), &cwd).ok())
    }

    fn validate_with<F>(&self, mut locate: F) -> ValidationReport
    where
        F: FnMut(&str) -> Option<PathBuf>,
    {
        let statuses: Vec<ToolStatus> = self
            .iter()
            .map(|(tool, value)| {
                let located = match tool.kind() {
                    ToolKind::Command => locate(value),
                    ToolKind::Resource => locate_resource(Path::new(value)),
                };
                let status = ToolStatus {
                    tool,
                    value: value.to_string(),
                    located,
                    required: tool.is_required_on_host(),
                };
                if status.is_missing() {
                    warn!(tool = %tool, value = %value, "Required tool not found");
                }
                status
            })
            .collect();

        let report = ValidationReport { statuses };
        info!(
            total = report.statuses.len(),
            missing = report.missing().len(),
            "Validated executable registry"
        );
        report
    }
}

fn locate_resource(path: &Path) -> Option<PathBuf> {
    path.is_file().then(|| path.to_path_buf())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn status(tool: Tool, located: Option<&str>, required: bool) -> ToolStatus {
        ToolStatus {
            tool,
            value: tool.as_str().to_string(),
            located: located.map(PathBuf::from),
            required,
        }
    }

    #[test]
    fn test_optional_tool_never_missing() {
        assert!(!status(Tool::RangerMac, None, false).is_missing());
        assert!(status(Tool::RangerMac, None, true).is_missing());
    }

    #[test]
    fn test_report_ready_when_only_optional_missing() {
        let report = ValidationReport {
            statuses: vec![
                status(Tool::Mafft, Some("/usr/bin/mafft"), true),
                status(Tool::RangerMac, None, false),
            ],
        };
        assert!(report.is_ready());
        assert!(report.missing().is_empty());
        assert!(report.into_result().is_ok());
    }

    #[test]
    fn test_into_result_lists_missing() {
        let report = ValidationReport {
            statuses: vec![
                status(Tool::Mafft, None, true),
                status(Tool::BlastP, Some("/usr/bin/blastp"), true),
                status(Tool::PathToHmm, None, true),
            ],
        };
        assert_eq!(report.missing(), vec![Tool::Mafft, Tool::PathToHmm]);
        match report.into_result() {
            Err(Error::MissingTools { tools }) => {
                assert_eq!(tools, vec![Tool::Mafft, Tool::PathToHmm])
            }
            other => panic!("expected MissingTools, got {other:?}"),
        }
    }

    #[test]
    fn test_validate_with_custom_locator() {
        let reg = ExecutableRegistry::from_install_dir(std::env::temp_dir().join("no-such-chip"))
            .unwrap();
        let report = reg.validate_with(|token| Some(PathBuf::from("/opt/bin").join(token)));

        assert_eq!(report.statuses.len(), Tool::COUNT);
        assert_eq!(
            report.status(Tool::FastTree).unwrap().located,
            Some(PathBuf::from("/opt/bin/FastTree"))
        );
        assert_eq!(report.missing(), vec![Tool::PathToHmm, Tool::CircosHgtR]);
    }
}
