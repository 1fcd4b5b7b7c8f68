use crate::entrypoints::EntrypointSeeding;
use crate::error::Error;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Options for the workspace plugin.
///
/// Everything except `entrypoint_seeding` is passed through to the workspace
/// unchanged; no validation happens here.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BridgeOptions {
    /// Show debugging logs.
    pub debug: bool,

    /// Use this workspace config file instead of auto-discovering it.
    pub config_path: Option<PathBuf>,

    /// Don't transpile files when loading them.
    pub no_transpile: bool,

    /// Keep JSX as is, instead of transpiling it.
    pub preserve_jsx: bool,

    /// Which entrypoints seed the workspace's module graph.
    pub entrypoint_seeding: EntrypointSeeding,
}

impl BridgeOptions {
    /// Parse options from a JSON object, e.g. `{"configPath": "deno.json"}`.
    pub fn from_json(json: &str) -> Result<Self, Error> {
        Ok(serde_json::from_str(json)?)
    }

    /// Enable debug logging.
    #[must_use]
    pub fn with_debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    /// Set an explicit config file path.
    #[must_use]
    pub fn with_config_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.config_path = Some(path.into());
        self
    }

    /// Disable transpilation on load.
    #[must_use]
    pub fn with_no_transpile(mut self, no_transpile: bool) -> Self {
        self.no_transpile = no_transpile;
        self
    }

    /// Keep JSX untransformed.
    #[must_use]
    pub fn with_preserve_jsx(mut self, preserve_jsx: bool) -> Self {
        self.preserve_jsx = preserve_jsx;
        self
    }

    /// Set the entrypoint seeding policy.
    #[must_use]
    pub fn with_entrypoint_seeding(mut self, seeding: EntrypointSeeding) -> Self {
        self.entrypoint_seeding = seeding;
        self
    }
}
