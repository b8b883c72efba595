//! Error types for chip-config

use crate::tool::Tool;

/// Result type for chip-config operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while building or querying the registry
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Unknown tool name '{key}'. Valid names: {valid}")]
    KeyNotFound { key: String, valid: String },

    #[error("Could not determine install location from {origin}: {reason}")]
    LocationResolution {
        origin: String,
        reason: String,
        #[source]
        source: Option<std::io::Error>,
    },

    #[error("'{tool}' is a bundled resource, not an executable")]
    NotExecutable { tool: Tool },

    #[error("Required tools not found: {}", format_tools(.tools))]
    MissingTools { tools: Vec<Tool> },
}

impl Error {
    pub fn key_not_found(key: impl Into<String>) -> Self {
        Self::KeyNotFound {
            key: key.into(),
            valid: Tool::valid_names(),
        }
    }

    pub fn location(origin: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::LocationResolution {
            origin: origin.into(),
            reason: reason.into(),
            source: None,
        }
    }

    pub fn location_io(origin: impl Into<String>, source: std::io::Error) -> Self {
        Self::LocationResolution {
            origin: origin.into(),
            reason: source.to_string(),
            source: Some(source),
        }
    }
}

fn format_tools(tools: &[Tool]) -> String {
    tools
        .iter()
        .map(Tool::as_str)
        .collect::<Vec<_>>()
        .join(", ")
}
