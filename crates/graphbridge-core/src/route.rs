//! Resolution routing.
//!
//! Every specifier the bundler encounters goes through [`Router::route`]:
//! built-ins are marked external up front, everything else is resolved by the
//! workspace and classified into a namespace by its URL scheme. Specifiers the
//! workspace can't resolve are deferred rather than failed, so other plugins
//! and the bundler's own resolver still get a chance.

use crate::builtins::is_builtin;
use crate::host::{ImportKind, OnResolveResult};
use crate::namespace::Namespace;
use crate::workspace::{ModuleLoader, ResolutionMode};
use graphbridge_util::file_url_to_path;
use std::sync::Arc;
use tracing::{debug, trace};

/// Outcome of routing one specifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    /// The specifier maps to a module.
    Resolved {
        /// Filesystem path for `file:` modules, canonical URL otherwise.
        path: String,
        namespace: Option<Namespace>,
        external: bool,
    },
    /// No opinion; let the next resolver try.
    Deferred,
}

impl Route {
    /// Convert into the host's resolve hook result.
    #[must_use]
    pub fn into_resolve_result(self) -> Option<OnResolveResult> {
        match self {
            Self::Resolved {
                path,
                namespace,
                external,
            } => Some(OnResolveResult {
                path,
                namespace: namespace.map(|ns| ns.as_str().to_string()),
                external,
            }),
            Self::Deferred => None,
        }
    }
}

/// Resolution mode for an import kind.
///
/// Only `require()` calls and `require.resolve()` resolve with CommonJS
/// semantics.
#[must_use]
pub fn resolution_mode(kind: ImportKind) -> ResolutionMode {
    match kind {
        ImportKind::RequireCall | ImportKind::RequireResolve => ResolutionMode::Require,
        _ => ResolutionMode::Import,
    }
}

/// Routes specifiers through the workspace loader.
pub struct Router {
    loader: Arc<dyn ModuleLoader>,
}

impl Router {
    pub fn new(loader: Arc<dyn ModuleLoader>) -> Self {
        Self { loader }
    }

    /// Route a specifier imported by `importer` (empty for entrypoints).
    pub async fn route(&self, specifier: &str, importer: &str, kind: ImportKind) -> Route {
        if is_builtin(specifier) {
            trace!(specifier, "built-in module, keeping external");
            return Route::Resolved {
                path: specifier.to_string(),
                namespace: None,
                external: true,
            };
        }

        let mode = resolution_mode(kind);
        let resolved = match self.loader.resolve(specifier, importer, mode).await {
            Ok(resolved) => resolved,
            Err(err) => {
                debug!(specifier, importer, error = %err, "deferring unresolved specifier");
                return Route::Deferred;
            }
        };

        let namespace = Namespace::classify(&resolved);
        let path = if namespace == Some(Namespace::File) {
            match file_url_to_path(&resolved) {
                Some(path) => path.to_string_lossy().into_owned(),
                None => {
                    debug!(specifier, %resolved, "deferring file URL without a local path");
                    return Route::Deferred;
                }
            }
        } else {
            resolved
        };

        trace!(specifier, importer, ?mode, path = %path, ?namespace, "routed");
        Route::Resolved {
            path,
            namespace,
            external: false,
        }
    }
}
