//! Load dispatch.
//!
//! Turns a routed module back into its canonical URL, asks the workspace for
//! its content and picks the bundler loader from the reported media type.

use crate::error::Error;
use crate::host::{ImportAttributes, Loader, OnLoadResult};
use crate::media::RequestedModuleType;
use crate::namespace::Namespace;
use crate::workspace::{LoadResponse, ModuleLoader};
use graphbridge_util::path_to_file_url;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::trace;

/// Outcome of dispatching one load.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Dispatch {
    /// The workspace declared the module external; leave the import alone.
    External,
    /// Module content and how to interpret it.
    Content { contents: Vec<u8>, loader: Loader },
}

impl Dispatch {
    /// Convert into the host's load hook result.
    #[must_use]
    pub fn into_load_result(self) -> Option<OnLoadResult> {
        match self {
            Self::External => None,
            Self::Content { contents, loader } => Some(OnLoadResult { contents, loader }),
        }
    }
}

/// Dispatches loads to the workspace loader.
pub struct Dispatcher {
    loader: Arc<dyn ModuleLoader>,
    /// Base for relative module paths.
    cwd: PathBuf,
}

impl Dispatcher {
    pub fn new(loader: Arc<dyn ModuleLoader>, cwd: PathBuf) -> Self {
        Self { loader, cwd }
    }

    /// Reconstruct the canonical URL for a routed path.
    ///
    /// Remote, registry and `data:` URLs are already canonical. Anything else
    /// is a filesystem path and becomes a `file:` URL.
    pub fn canonical_url(&self, path: &str) -> Result<String, Error> {
        let is_canonical = Namespace::classify(path).is_some_and(Namespace::is_verbatim)
            || path.starts_with("data:");
        if is_canonical {
            return Ok(path.to_string());
        }

        let fs_path = Path::new(path);
        let absolute = if fs_path.is_absolute() {
            fs_path.to_path_buf()
        } else {
            self.cwd.join(fs_path)
        };
        path_to_file_url(&absolute).ok_or_else(|| Error::InvalidPath {
            path: path.to_string(),
        })
    }

    /// Load a routed module.
    ///
    /// `namespace` is informational; the canonical URL alone decides what is
    /// loaded.
    pub async fn load(
        &self,
        path: &str,
        namespace: &str,
        with: &ImportAttributes,
    ) -> Result<Dispatch, Error> {
        let url = self.canonical_url(path)?;
        let requested = RequestedModuleType::from_attributes(with);

        match self.loader.load(&url, requested).await? {
            LoadResponse::External { specifier } => {
                trace!(%specifier, namespace, "workspace marked module external");
                Ok(Dispatch::External)
            }
            LoadResponse::Module {
                specifier,
                media_type,
                code,
            } => {
                let loader = media_type.loader();
                trace!(%specifier, namespace, ?requested, ?media_type, %loader, "loaded");
                Ok(Dispatch::Content {
                    contents: code,
                    loader,
                })
            }
        }
    }
}
