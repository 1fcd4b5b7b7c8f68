#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::return_self_not_must_use)]

pub mod builtins;
pub mod config;
pub mod dispatch;
pub mod entrypoints;
pub mod error;
pub mod external;
pub mod host;
pub mod media;
pub mod namespace;
pub mod plugin;
pub mod route;
pub mod workspace;

pub use config::BridgeOptions;
pub use dispatch::{Dispatch, Dispatcher};
pub use entrypoints::{normalize_entrypoints, EntryPoint, EntryPoints, EntrypointSeeding};
pub use error::Error;
pub use external::{external_to_regex, ExternalMatcher};
pub use host::{
    BuildOptions, HookFilter, HookResult, ImportAttributes, ImportKind, Loader, OnLoadArgs,
    OnLoadResult, OnResolveArgs, OnResolveResult, Plugin, PluginBuild, PluginError, PluginHost,
};
pub use media::{MediaType, RequestedModuleType};
pub use namespace::Namespace;
pub use plugin::{WorkspacePlugin, PLUGIN_NAME};
pub use route::{Route, Router};
pub use workspace::{
    LoadResponse, LoaderOptions, ModuleLoader, ResolutionMode, Workspace, WorkspaceError,
    WorkspaceFactory, WorkspaceOptions,
};
