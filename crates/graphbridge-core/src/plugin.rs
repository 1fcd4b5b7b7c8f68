//! The workspace plugin.
//!
//! Opens the workspace once per build, creates its loader and registers the
//! router and dispatcher as resolve and load hooks for every namespace the
//! workspace can produce.
//!
//! ## Example
//!
//! ```ignore
//! use graphbridge_core::{BridgeOptions, BuildOptions, PluginHost, WorkspacePlugin};
//!
//! let mut host = PluginHost::new(BuildOptions::new(cwd).with_entry_points(vec!["main.ts"]));
//! host.add(Box::new(WorkspacePlugin::new(BridgeOptions::default(), open_workspace)));
//! host.setup().await?;
//! ```

use crate::config::BridgeOptions;
use crate::dispatch::{Dispatch, Dispatcher};
use crate::error::Error;
use crate::host::{HookFilter, OnLoadArgs, OnResolveArgs, Plugin, PluginBuild, PluginError};
use crate::namespace::{LOAD_NAMESPACES, RESOLVE_NAMESPACES};
use crate::route::Router;
use crate::workspace::{LoaderOptions, WorkspaceFactory, WorkspaceOptions};
use async_trait::async_trait;
use std::sync::Arc;
use tracing::{debug, info};

/// Plugin name reported to the host and in hook errors.
pub const PLUGIN_NAME: &str = "graphbridge";

/// Bundler plugin that delegates resolution and loading to a workspace.
pub struct WorkspacePlugin {
    options: BridgeOptions,
    factory: Arc<dyn WorkspaceFactory>,
}

impl WorkspacePlugin {
    /// Create the plugin. The workspace is opened lazily, during setup.
    pub fn new(options: BridgeOptions, factory: impl WorkspaceFactory + 'static) -> Self {
        Self {
            options,
            factory: Arc::new(factory),
        }
    }

    #[must_use]
    pub fn options(&self) -> &BridgeOptions {
        &self.options
    }
}

#[async_trait]
impl Plugin for WorkspacePlugin {
    fn name(&self) -> &str {
        PLUGIN_NAME
    }

    async fn setup(&self, build: &mut PluginBuild) -> Result<(), Error> {
        let initial = build.initial_options();
        if self.options.debug {
            info!(options = ?self.options, conditions = ?initial.conditions, "setting up workspace");
        }

        let workspace = self.factory.open(WorkspaceOptions::new(
            &self.options,
            initial.conditions.clone(),
        ))?;

        let entrypoints = self
            .options
            .entrypoint_seeding
            .seed(initial.entry_points.as_ref());
        debug!(?entrypoints, "creating workspace loader");
        let loader = workspace
            .create_loader(LoaderOptions { entrypoints })
            .await?;

        let router = Arc::new(Router::new(Arc::clone(&loader)));
        let dispatcher = Arc::new(Dispatcher::new(loader, initial.cwd.clone()));

        let on_resolve = move |args: OnResolveArgs| {
            let router = Arc::clone(&router);
            async move {
                let route = router.route(&args.path, &args.importer, args.kind).await;
                Ok::<_, PluginError>(route.into_resolve_result())
            }
        };

        // Entrypoints reach us without a namespace, so the catch-all goes first.
        build.on_resolve(HookFilter::any(), on_resolve.clone());
        for namespace in RESOLVE_NAMESPACES {
            build.on_resolve(HookFilter::any().in_namespace(*namespace), on_resolve.clone());
        }

        let on_load = move |args: OnLoadArgs| {
            let dispatcher = Arc::clone(&dispatcher);
            async move {
                dispatcher
                    .load(&args.path, &args.namespace, &args.with)
                    .await
                    .map(Dispatch::into_load_result)
                    .map_err(|err| PluginError::new(PLUGIN_NAME, "load", err.to_string()))
            }
        };
        for namespace in LOAD_NAMESPACES {
            build.on_load(HookFilter::any().in_namespace(*namespace), on_load.clone());
        }

        Ok(())
    }
}
