//! Contract with the external workspace resolver.
//!
//! The workspace owns the module graph: it knows how to resolve remote URLs,
//! `npm:` and `jsr:` specifiers and the project's import map, and it produces
//! transpiled source on load. This crate only routes requests to it.
//!
//! A workspace is opened once per build through a [`WorkspaceFactory`], then
//! asked for a single [`ModuleLoader`] which is shared by every resolve and
//! load hook. Implementations must be safe to call concurrently.

use crate::config::BridgeOptions;
use crate::media::{MediaType, RequestedModuleType};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::sync::Arc;
use thiserror::Error;

/// How the workspace should interpret an ambiguous specifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResolutionMode {
    Import,
    Require,
}

/// Options used to open a workspace.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkspaceOptions {
    /// Emit debug logs from the workspace.
    pub debug: bool,
    /// Explicit workspace config file instead of auto-discovery.
    pub config_path: Option<PathBuf>,
    /// Package export conditions, taken from the bundler's build options.
    pub node_conditions: Vec<String>,
    /// Return sources untranspiled.
    pub no_transpile: bool,
    /// Keep JSX syntax instead of transforming it.
    pub preserve_jsx: bool,
}

impl WorkspaceOptions {
    /// Build workspace options from plugin options plus the bundler's
    /// configured conditions.
    #[must_use]
    pub fn new(options: &BridgeOptions, node_conditions: Vec<String>) -> Self {
        Self {
            debug: options.debug,
            config_path: options.config_path.clone(),
            node_conditions,
            no_transpile: options.no_transpile,
            preserve_jsx: options.preserve_jsx,
        }
    }
}

/// Options for creating the per-build loader.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoaderOptions {
    /// Entrypoints used to seed the module graph. May be empty.
    pub entrypoints: Vec<String>,
}

/// Outcome of loading a module.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadResponse {
    /// The module is declared external and must not be bundled.
    External { specifier: String },
    /// Transformed module content.
    Module {
        specifier: String,
        media_type: MediaType,
        code: Vec<u8>,
    },
}

/// Errors reported by the workspace.
#[derive(Error, Debug)]
pub enum WorkspaceError {
    #[error("Failed to read workspace config at {}: {message}", path.display())]
    Config { path: PathBuf, message: String },

    #[error("Unable to resolve '{specifier}' from '{referrer}': {message}")]
    Unresolved {
        specifier: String,
        referrer: String,
        message: String,
    },

    #[error("Failed to load {specifier}: {message}")]
    Load { specifier: String, message: String },

    #[error("{0}")]
    Other(String),
}

impl WorkspaceError {
    /// Create an unresolved specifier error.
    pub fn unresolved(specifier: &str, referrer: &str, message: impl Into<String>) -> Self {
        Self::Unresolved {
            specifier: specifier.to_string(),
            referrer: referrer.to_string(),
            message: message.into(),
        }
    }

    /// Create a load error.
    pub fn load(specifier: &str, message: impl Into<String>) -> Self {
        Self::Load {
            specifier: specifier.to_string(),
            message: message.into(),
        }
    }
}

/// Resolves and loads modules within one build.
#[async_trait]
pub trait ModuleLoader: Send + Sync {
    /// Resolve `specifier` as imported from `referrer` to a canonical URL.
    ///
    /// `referrer` is empty for entrypoints.
    async fn resolve(
        &self,
        specifier: &str,
        referrer: &str,
        mode: ResolutionMode,
    ) -> Result<String, WorkspaceError>;

    /// Load the module at a canonical URL.
    async fn load(
        &self,
        specifier: &str,
        requested: RequestedModuleType,
    ) -> Result<LoadResponse, WorkspaceError>;
}

/// An opened workspace.
#[async_trait]
pub trait Workspace: Send + Sync {
    /// Create the loader used for one build.
    async fn create_loader(
        &self,
        options: LoaderOptions,
    ) -> Result<Arc<dyn ModuleLoader>, WorkspaceError>;
}

/// Opens a workspace from options.
pub trait WorkspaceFactory: Send + Sync {
    fn open(&self, options: WorkspaceOptions) -> Result<Arc<dyn Workspace>, WorkspaceError>;
}

impl<F> WorkspaceFactory for F
where
    F: Fn(WorkspaceOptions) -> Result<Arc<dyn Workspace>, WorkspaceError> + Send + Sync,
{
    fn open(&self, options: WorkspaceOptions) -> Result<Arc<dyn Workspace>, WorkspaceError> {
        self(options)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entrypoints::EntrypointSeeding;

    #[test]
    fn test_workspace_options_from_bridge_options() {
        let options = BridgeOptions::default()
            .with_debug(true)
            .with_config_path("/project/deno.json")
            .with_preserve_jsx(true);

        let ws = WorkspaceOptions::new(&options, vec!["browser".to_string()]);
        assert!(ws.debug);
        assert_eq!(ws.config_path, Some(PathBuf::from("/project/deno.json")));
        assert_eq!(ws.node_conditions, vec!["browser".to_string()]);
        assert!(!ws.no_transpile);
        assert!(ws.preserve_jsx);
        assert_eq!(options.entrypoint_seeding, EntrypointSeeding::Declared);
    }

    #[test]
    fn test_workspace_error_messages() {
        let err = WorkspaceError::unresolved("mapped", "file:///a.ts", "not in import map");
        assert_eq!(
            err.to_string(),
            "Unable to resolve 'mapped' from 'file:///a.ts': not in import map"
        );

        let err = WorkspaceError::load("npm:preact", "tarball fetch failed");
        assert_eq!(err.to_string(), "Failed to load npm:preact: tarball fetch failed");
    }
}
