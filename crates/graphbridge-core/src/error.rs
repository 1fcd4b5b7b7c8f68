use crate::host::PluginError;
use crate::workspace::WorkspaceError;
use thiserror::Error;

/// Core error type for graphbridge operations.
#[derive(Error, Debug)]
pub enum Error {
    /// Errors raised by the external workspace are passed through as-is.
    #[error(transparent)]
    Workspace(#[from] WorkspaceError),

    #[error("Cannot convert module path to a file URL: {path}")]
    InvalidPath { path: String },

    #[error("Invalid pattern {pattern:?}: {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex_lite::Error,
    },

    #[error("Failed to parse options: {0}")]
    OptionsParse(#[from] serde_json::Error),

    #[error(transparent)]
    Plugin(#[from] PluginError),
}
