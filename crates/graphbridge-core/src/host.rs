//! Bundler host plugin interface.
//!
//! Models the hook contract the bundler exposes to plugins: during `setup` a
//! plugin registers resolve and load callbacks, each scoped by a path filter
//! and optionally a namespace. The host then runs callbacks in registration
//! order and the first one to return `Some` wins; returning `None` lets the
//! next plugin (or the bundler's default behavior) handle the request.
//!
//! ## Example
//!
//! ```ignore
//! use graphbridge_core::host::{HookFilter, OnResolveResult, Plugin, PluginBuild};
//!
//! struct Alias;
//!
//! #[async_trait::async_trait]
//! impl Plugin for Alias {
//!     fn name(&self) -> &str { "alias" }
//!
//!     async fn setup(&self, build: &mut PluginBuild) -> Result<(), Error> {
//!         build.on_resolve(HookFilter::new("^@/")?, |args| async move {
//!             Ok(Some(OnResolveResult::resolved(args.path.replacen("@/", "/src/", 1))))
//!         });
//!         Ok(())
//!     }
//! }
//! ```

use crate::entrypoints::EntryPoints;
use crate::error::Error;
use crate::external::ExternalMatcher;
use async_trait::async_trait;
use futures::future::BoxFuture;
use futures::FutureExt;
use regex_lite::Regex;
use rustc_hash::FxHashMap as HashMap;
use std::fmt;
use std::future::Future;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{debug, trace};

/// Namespace the host assigns to resolved modules that don't name one.
pub const DEFAULT_NAMESPACE: &str = "file";

/// Result type for plugin hooks.
pub type HookResult<T> = Result<T, PluginError>;

/// Error from a plugin.
#[derive(Debug)]
pub struct PluginError {
    /// Plugin name that caused the error.
    pub plugin: String,
    /// Hook that failed.
    pub hook: &'static str,
    /// Error message.
    pub message: String,
}

impl PluginError {
    pub fn new(plugin: impl Into<String>, hook: &'static str, message: impl Into<String>) -> Self {
        Self {
            plugin: plugin.into(),
            hook,
            message: message.into(),
        }
    }
}

impl fmt::Display for PluginError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}: {}", self.plugin, self.hook, self.message)
    }
}

impl std::error::Error for PluginError {}

/// Import attributes attached to an import statement (`with { type: "json" }`).
pub type ImportAttributes = HashMap<String, String>;

/// How a specifier was referenced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ImportKind {
    EntryPoint,
    ImportStatement,
    RequireCall,
    DynamicImport,
    RequireResolve,
    ImportRule,
    ComposesFrom,
    UrlToken,
}

impl ImportKind {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::EntryPoint => "entry-point",
            Self::ImportStatement => "import-statement",
            Self::RequireCall => "require-call",
            Self::DynamicImport => "dynamic-import",
            Self::RequireResolve => "require-resolve",
            Self::ImportRule => "import-rule",
            Self::ComposesFrom => "composes-from",
            Self::UrlToken => "url-token",
        }
    }
}

impl fmt::Display for ImportKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How the bundler should interpret loaded content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Loader {
    Js,
    Jsx,
    Ts,
    Tsx,
    Css,
    Json,
    Binary,
    /// Let the bundler pick based on the file extension.
    Default,
}

impl Loader {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Js => "js",
            Self::Jsx => "jsx",
            Self::Ts => "ts",
            Self::Tsx => "tsx",
            Self::Css => "css",
            Self::Json => "json",
            Self::Binary => "binary",
            Self::Default => "default",
        }
    }
}

impl fmt::Display for Loader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Initial build options, visible to plugins during setup.
#[derive(Debug, Clone)]
pub struct BuildOptions {
    /// Working directory relative paths are resolved against.
    pub cwd: PathBuf,
    /// Declared entrypoints.
    pub entry_points: Option<EntryPoints>,
    /// Package export conditions.
    pub conditions: Vec<String>,
    /// Patterns of specifiers that are always external.
    pub external: Vec<String>,
}

impl Default for BuildOptions {
    fn default() -> Self {
        Self {
            cwd: std::env::current_dir().unwrap_or_default(),
            entry_points: None,
            conditions: Vec::new(),
            external: Vec::new(),
        }
    }
}

impl BuildOptions {
    /// Create build options rooted at the given working directory.
    #[must_use]
    pub fn new(cwd: PathBuf) -> Self {
        Self {
            cwd,
            ..Default::default()
        }
    }

    /// Set the entrypoints.
    #[must_use]
    pub fn with_entry_points(mut self, entry_points: impl Into<EntryPoints>) -> Self {
        self.entry_points = Some(entry_points.into());
        self
    }

    /// Set the export conditions.
    #[must_use]
    pub fn with_conditions(mut self, conditions: Vec<String>) -> Self {
        self.conditions = conditions;
        self
    }

    /// Add an external pattern.
    #[must_use]
    pub fn external(mut self, pattern: impl Into<String>) -> Self {
        self.external.push(pattern.into());
        self
    }
}

/// Arguments to a resolve hook.
#[derive(Debug, Clone)]
pub struct OnResolveArgs {
    /// The specifier as written in the import.
    pub path: String,
    /// The importing module's path, empty for entrypoints.
    pub importer: String,
    /// Namespace of the importing module, empty for entrypoints.
    pub namespace: String,
    /// How the specifier was referenced.
    pub kind: ImportKind,
    /// Import attributes.
    pub with: ImportAttributes,
}

impl OnResolveArgs {
    /// Arguments for resolving an entrypoint.
    pub fn entry(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            importer: String::new(),
            namespace: String::new(),
            kind: ImportKind::EntryPoint,
            with: ImportAttributes::default(),
        }
    }

    /// Arguments for resolving an import from another module.
    pub fn import(
        path: impl Into<String>,
        importer: impl Into<String>,
        namespace: impl Into<String>,
        kind: ImportKind,
    ) -> Self {
        Self {
            path: path.into(),
            importer: importer.into(),
            namespace: namespace.into(),
            kind,
            with: ImportAttributes::default(),
        }
    }

    /// Attach an import attribute.
    #[must_use]
    pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.with.insert(key.into(), value.into());
        self
    }
}

/// Result of a resolve hook.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OnResolveResult {
    /// Resolved path (filesystem path or canonical URL).
    pub path: String,
    /// Namespace, or `None` to let the host choose.
    pub namespace: Option<String>,
    /// Whether the module stays external (not bundled).
    pub external: bool,
}

impl OnResolveResult {
    /// Create a resolved module result.
    pub fn resolved(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            namespace: None,
            external: false,
        }
    }

    /// Create an external module result.
    pub fn external(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            namespace: None,
            external: true,
        }
    }

    /// Set the namespace.
    #[must_use]
    pub fn in_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = Some(namespace.into());
        self
    }
}

/// Arguments to a load hook.
#[derive(Debug, Clone)]
pub struct OnLoadArgs {
    /// Resolved path.
    pub path: String,
    /// Namespace the module was resolved into.
    pub namespace: String,
    /// Import attributes of the import that pulled the module in.
    pub with: ImportAttributes,
}

impl OnLoadArgs {
    pub fn new(path: impl Into<String>, namespace: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            namespace: namespace.into(),
            with: ImportAttributes::default(),
        }
    }

    /// Arguments for loading a module previously returned by a resolve hook.
    pub fn from_resolved(result: &OnResolveResult) -> Self {
        Self::new(
            result.path.clone(),
            result.namespace.as_deref().unwrap_or(DEFAULT_NAMESPACE),
        )
    }

    /// Attach an import attribute.
    #[must_use]
    pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.with.insert(key.into(), value.into());
        self
    }
}

/// Result of a load hook.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OnLoadResult {
    /// Module content.
    pub contents: Vec<u8>,
    /// How to interpret the content.
    pub loader: Loader,
}

impl OnLoadResult {
    pub fn new(contents: impl Into<Vec<u8>>, loader: Loader) -> Self {
        Self {
            contents: contents.into(),
            loader,
        }
    }

    /// Content as UTF-8 text, if valid.
    #[must_use]
    pub fn text(&self) -> Option<&str> {
        std::str::from_utf8(&self.contents).ok()
    }
}

/// Scope of a registered hook.
#[derive(Debug, Clone, Default)]
pub struct HookFilter {
    /// Path filter; `None` matches every path.
    filter: Option<Regex>,
    /// Namespace; `None` matches every namespace.
    namespace: Option<String>,
}

impl HookFilter {
    /// Match every path in every namespace.
    #[must_use]
    pub fn any() -> Self {
        Self::default()
    }

    /// Match paths against a regex.
    pub fn new(pattern: &str) -> Result<Self, Error> {
        let filter = Regex::new(pattern).map_err(|source| Error::InvalidPattern {
            pattern: pattern.to_string(),
            source,
        })?;
        Ok(Self {
            filter: Some(filter),
            namespace: None,
        })
    }

    /// Restrict to a single namespace.
    #[must_use]
    pub fn in_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = Some(namespace.into());
        self
    }

    /// Namespace this filter is scoped to, if any.
    #[must_use]
    pub fn namespace(&self) -> Option<&str> {
        self.namespace.as_deref()
    }

    #[must_use]
    pub fn matches(&self, path: &str, namespace: &str) -> bool {
        if let Some(ns) = &self.namespace {
            if ns != namespace {
                return false;
            }
        }
        self.filter.as_ref().map_or(true, |re| re.is_match(path))
    }
}

/// Registered resolve callback.
pub type ResolveCallback =
    Arc<dyn Fn(OnResolveArgs) -> BoxFuture<'static, HookResult<Option<OnResolveResult>>> + Send + Sync>;

/// Registered load callback.
pub type LoadCallback =
    Arc<dyn Fn(OnLoadArgs) -> BoxFuture<'static, HookResult<Option<OnLoadResult>>> + Send + Sync>;

struct ResolveHook {
    plugin: String,
    filter: HookFilter,
    callback: ResolveCallback,
}

struct LoadHook {
    plugin: String,
    filter: HookFilter,
    callback: LoadCallback,
}

/// Registration context handed to [`Plugin::setup`].
pub struct PluginBuild {
    options: BuildOptions,
    plugin: String,
    resolve_hooks: Vec<ResolveHook>,
    load_hooks: Vec<LoadHook>,
}

impl PluginBuild {
    pub(crate) fn new(options: BuildOptions) -> Self {
        Self {
            options,
            plugin: String::new(),
            resolve_hooks: Vec::new(),
            load_hooks: Vec::new(),
        }
    }

    /// The build options as configured before any plugin ran.
    #[must_use]
    pub fn initial_options(&self) -> &BuildOptions {
        &self.options
    }

    /// Register a resolve callback.
    pub fn on_resolve<F, Fut>(&mut self, filter: HookFilter, callback: F)
    where
        F: Fn(OnResolveArgs) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = HookResult<Option<OnResolveResult>>> + Send + 'static,
    {
        self.resolve_hooks.push(ResolveHook {
            plugin: self.plugin.clone(),
            filter,
            callback: Arc::new(move |args: OnResolveArgs| callback(args).boxed()),
        });
    }

    /// Register a load callback.
    pub fn on_load<F, Fut>(&mut self, filter: HookFilter, callback: F)
    where
        F: Fn(OnLoadArgs) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = HookResult<Option<OnLoadResult>>> + Send + 'static,
    {
        self.load_hooks.push(LoadHook {
            plugin: self.plugin.clone(),
            filter,
            callback: Arc::new(move |args: OnLoadArgs| callback(args).boxed()),
        });
    }

    /// Namespace scope of each registered resolve hook, in registration order.
    #[must_use]
    pub fn resolve_scopes(&self) -> Vec<Option<&str>> {
        self.resolve_hooks.iter().map(|h| h.filter.namespace()).collect()
    }

    /// Namespace scope of each registered load hook, in registration order.
    #[must_use]
    pub fn load_scopes(&self) -> Vec<Option<&str>> {
        self.load_hooks.iter().map(|h| h.filter.namespace()).collect()
    }
}

/// A bundler plugin.
#[async_trait]
pub trait Plugin: Send + Sync {
    /// Plugin name for debugging and error messages.
    fn name(&self) -> &str;

    /// Register hooks. Errors abort the build.
    async fn setup(&self, build: &mut PluginBuild) -> Result<(), Error>;
}

/// Runs plugin setup and dispatches resolve/load requests to registered hooks.
///
/// Hooks run in registration order, and plugins register in the order they
/// were added.
pub struct PluginHost {
    plugins: Vec<Box<dyn Plugin>>,
    options: BuildOptions,
    external: ExternalMatcher,
    resolve_hooks: Vec<ResolveHook>,
    load_hooks: Vec<LoadHook>,
}

impl PluginHost {
    /// Create a new host for a build.
    #[must_use]
    pub fn new(options: BuildOptions) -> Self {
        Self {
            plugins: Vec::new(),
            options,
            external: ExternalMatcher::default(),
            resolve_hooks: Vec::new(),
            load_hooks: Vec::new(),
        }
    }

    /// Add a plugin. Takes effect on the next [`PluginHost::setup`].
    pub fn add(&mut self, plugin: Box<dyn Plugin>) {
        self.plugins.push(plugin);
    }

    /// Build options.
    #[must_use]
    pub fn options(&self) -> &BuildOptions {
        &self.options
    }

    /// Check if any plugins are registered.
    #[must_use]
    pub fn has_plugins(&self) -> bool {
        !self.plugins.is_empty()
    }

    /// Compile external patterns and run every plugin's setup.
    ///
    /// The first failing setup aborts with its error unchanged.
    pub async fn setup(&mut self) -> Result<(), Error> {
        self.external = ExternalMatcher::new(&self.options.external)?;

        let mut build = PluginBuild::new(self.options.clone());
        for plugin in &self.plugins {
            build.plugin = plugin.name().to_string();
            plugin.setup(&mut build).await?;
            debug!(plugin = plugin.name(), "plugin setup complete");
        }

        self.resolve_hooks = build.resolve_hooks;
        self.load_hooks = build.load_hooks;
        Ok(())
    }

    /// Resolve a specifier through external patterns, then plugins.
    ///
    /// Returns `None` if no plugin handled the resolution. Results without a
    /// namespace land in [`DEFAULT_NAMESPACE`] unless external.
    pub async fn resolve(&self, args: OnResolveArgs) -> HookResult<Option<OnResolveResult>> {
        if self.external.is_match(&args.path) {
            trace!(path = %args.path, "matched external pattern");
            return Ok(Some(OnResolveResult::external(args.path)));
        }

        for hook in &self.resolve_hooks {
            if !hook.filter.matches(&args.path, &args.namespace) {
                continue;
            }
            if let Some(mut result) = (hook.callback)(args.clone()).await? {
                if result.namespace.is_none() && !result.external {
                    result.namespace = Some(DEFAULT_NAMESPACE.to_string());
                }
                trace!(plugin = %hook.plugin, path = %args.path, resolved = %result.path, "resolved");
                return Ok(Some(result));
            }
        }
        Ok(None)
    }

    /// Load a module through plugins.
    ///
    /// Returns `None` if no plugin handled the load.
    pub async fn load(&self, args: OnLoadArgs) -> HookResult<Option<OnLoadResult>> {
        for hook in &self.load_hooks {
            if !hook.filter.matches(&args.path, &args.namespace) {
                continue;
            }
            if let Some(result) = (hook.callback)(args.clone()).await? {
                trace!(plugin = %hook.plugin, path = %args.path, loader = %result.loader, "loaded");
                return Ok(Some(result));
            }
        }
        Ok(None)
    }
}

impl Default for PluginHost {
    fn default() -> Self {
        Self::new(BuildOptions::default())
    }
}
