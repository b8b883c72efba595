//! The executable registry.

use std::path::{Path, PathBuf};
use std::process::Command;

use serde::ser::{Serialize, SerializeMap, Serializer};
use tracing::debug;

use crate::error::{Error, Result};
use crate::location;
use crate::tool::{Tool, ToolKind, ToolSource};

/// A logical name paired with its configured value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigEntry {
    tool: Tool,
    value: String,
}

impl ConfigEntry {
    pub fn tool(&self) -> Tool {
        self.tool
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn kind(&self) -> ToolKind {
        self.tool.kind()
    }
}

/// Immutable lookup from logical tool name to command token or resource path.
///
/// Built once and shared by reference. Command entries are returned verbatim
/// and resolved by the OS at spawn time; resource entries are absolute paths
/// under the install directory.
#[derive(Debug, Clone)]
pub struct ExecutableRegistry {
    install_dir: PathBuf,
    /// Indexed by position in [`Tool::ALL`].
    entries: Vec<ConfigEntry>,
}

impl ExecutableRegistry {
    /// Build the registry for the installation containing the running executable.
    pub fn discover() -> Result<Self> {
        let install_dir = location::current_install_dir()?;
        Self::from_install_dir(install_dir)
    }

    /// Build the registry for an explicit install directory.
    ///
    /// The directory is not required to exist. Relative paths are made
    /// absolute against the current working directory.
    pub fn from_install_dir(dir: impl AsRef<Path>) -> Result<Self> {
        let install_dir = location::absolutize(dir.as_ref())?;
        if install_dir.to_str().is_none() {
            return Err(Error::location(
                install_dir.display().to_string(),
                "install directory is not valid UTF-8",
            ));
        }

        let entries = Tool::ALL
            .into_iter()
            .map(|tool| ConfigEntry {
                tool,
                value: entry_value(tool, &install_dir),
            })
            .collect();

        debug!(install_dir = %install_dir.display(), "Built executable registry");

        Ok(Self {
            install_dir,
            entries,
        })
    }

    /// Look up a logical name.
    ///
    /// Unknown names are an error that lists every valid name.
    pub fn resolve(&self, name: &str) -> Result<&str> {
        let tool: Tool = name.parse()?;
        Ok(self.get(tool))
    }

    /// Typed lookup.
    pub fn get(&self, tool: Tool) -> &str {
        self.entry(tool).value()
    }

    pub fn entry(&self, tool: Tool) -> &ConfigEntry {
        // entries is built from Tool::ALL, whose order matches the enum discriminants
        &self.entries[tool as usize]
    }

    /// Absolute path of a bundled resource, `None` for command tools.
    pub fn resource_path(&self, tool: Tool) -> Option<&Path> {
        match tool.kind() {
            ToolKind::Resource => Some(Path::new(self.get(tool))),
            ToolKind::Command => None,
        }
    }

    /// Directory the bundled resources are resolved against.
    pub fn install_dir(&self) -> &Path {
        &self.install_dir
    }

    /// All entries in canonical order.
    pub fn entries(&self) -> &[ConfigEntry] {
        &self.entries
    }

    pub fn iter(&self) -> impl Iterator<Item = (Tool, &str)> {
        self.entries.iter().map(|e| (e.tool, e.value.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The Ranger-DTL build to use on this platform.
    pub fn reconciliation_tool(&self) -> Tool {
        Tool::ranger_for_host()
    }

    /// A [`Command`] for a command tool, ready for arguments to be added.
    ///
    /// The program is the bare token, so the caller's `PATH` decides which
    /// binary runs.
    pub fn command(&self, tool: Tool) -> Result<Command> {
        match tool.kind() {
            ToolKind::Command => Ok(Command::new(self.get(tool))),
            ToolKind::Resource => Err(Error::NotExecutable { tool }),
        }
    }
}

fn entry_value(tool: Tool, install_dir: &Path) -> String {
    match tool.source() {
        ToolSource::Command(token) => token.to_string(),
        ToolSource::Resource(file) => install_dir.join(file).to_string_lossy().into_owned(),
    }
}

impl<'a> IntoIterator for &'a ExecutableRegistry {
    type Item = &'a ConfigEntry;
    type IntoIter = std::slice::Iter<'a, ConfigEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

impl Serialize for ExecutableRegistry {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (tool, value) in self.iter() {
            map.serialize_entry(tool.as_str(), value)?;
        }
        map.end()
    }
}
