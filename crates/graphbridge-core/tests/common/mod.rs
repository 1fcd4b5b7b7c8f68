//! In-memory workspace shared by the integration tests.
//!
//! Modules live in a map keyed by canonical URL. Bare specifiers go through a
//! small import map, `./` specifiers are joined to the importer's directory
//! (or the fixture root for entrypoints) and anything else must already be a
//! known URL.

#![allow(dead_code)]

use async_trait::async_trait;
use graphbridge_core::{
    LoadResponse, LoaderOptions, MediaType, ModuleLoader, RequestedModuleType, ResolutionMode,
    Workspace, WorkspaceError, WorkspaceOptions,
};
use graphbridge_util::path_to_file_url;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

/// Config file name the fixture factory refuses to open.
pub const BROKEN_CONFIG: &str = "broken.json";

pub const SIMPLE_SOURCE: &str = "console.log('hey');\n";
pub const PREACT_SOURCE: &str = "export function h() {}\n";

/// Root directory of the virtual fixture tree. Nothing is written to disk.
pub fn fixture_root() -> PathBuf {
    std::env::temp_dir().join("graphbridge-fixtures")
}

/// Absolute path of a fixture file, as a string.
pub fn fixture(name: &str) -> String {
    fixture_root().join(name).to_string_lossy().into_owned()
}

fn fixture_url(name: &str) -> String {
    path_to_file_url(&fixture_root().join(name)).unwrap()
}

/// Install a test-writer subscriber so hook traces show up on failure.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_env_filter("graphbridge_core=trace")
        .try_init();
}

enum Entry {
    External,
    Source(MediaType, Vec<u8>),
}

/// Module graph backing the fixture workspace.
pub struct MemoryGraph {
    imports: HashMap<String, String>,
    modules: HashMap<String, Entry>,
    resolve_calls: AtomicUsize,
    requests: Mutex<Vec<(String, RequestedModuleType)>>,
    seeded: Mutex<Option<Vec<String>>>,
    opened: Mutex<Option<WorkspaceOptions>>,
}

impl MemoryGraph {
    /// Graph with the standard fixture modules.
    pub fn new() -> Arc<Self> {
        let mut graph = Self {
            imports: HashMap::new(),
            modules: HashMap::new(),
            resolve_calls: AtomicUsize::new(0),
            requests: Mutex::new(Vec::new()),
            seeded: Mutex::new(None),
            opened: Mutex::new(None),
        };

        graph.source(&fixture_url("simple.ts"), MediaType::TypeScript, SIMPLE_SOURCE);
        graph.source(
            &fixture_url("preact.ts"),
            MediaType::TypeScript,
            "import { h } from \"preact\";\nconsole.log(h);\n",
        );
        graph.source(
            &fixture_url("component.tsx"),
            MediaType::Tsx,
            "export const App = () => <div />;\n",
        );
        graph.source(&fixture_url("data.json"), MediaType::Json, "{\"hey\":true}\n");
        graph.source(&fixture_url("style.css"), MediaType::Css, "body { margin: 0 }\n");

        graph.import("preact", "npm:/preact@10.22.0");
        graph.source("npm:/preact@10.22.0", MediaType::JavaScript, PREACT_SOURCE);

        graph.import("@std/path", "jsr:@std/path@1.0.0/mod.ts");
        graph.source(
            "jsr:@std/path@1.0.0/mod.ts",
            MediaType::TypeScript,
            "export const SEPARATOR = '/';\n",
        );

        graph.source(
            "https://deno.land/std/fmt/colors.ts",
            MediaType::TypeScript,
            "export const red = (s: string) => s;\n",
        );

        graph.import("external-pkg", "npm:/external-pkg@1.0.0");
        graph
            .modules
            .insert("npm:/external-pkg@1.0.0".to_string(), Entry::External);

        Arc::new(graph)
    }

    fn import(&mut self, specifier: &str, url: &str) {
        self.imports.insert(specifier.to_string(), url.to_string());
    }

    fn source(&mut self, url: &str, media_type: MediaType, code: &str) {
        self.modules.insert(
            url.to_string(),
            Entry::Source(media_type, code.as_bytes().to_vec()),
        );
    }

    /// Factory that opens a [`MemoryWorkspace`] over this graph.
    ///
    /// Fails with a config error when pointed at [`BROKEN_CONFIG`].
    pub fn factory(
        self: &Arc<Self>,
    ) -> impl Fn(WorkspaceOptions) -> Result<Arc<dyn Workspace>, WorkspaceError> + Send + Sync
    {
        let graph = Arc::clone(self);
        move |options: WorkspaceOptions| {
            if let Some(path) = &options.config_path {
                if path.file_name().is_some_and(|name| name == BROKEN_CONFIG) {
                    return Err(WorkspaceError::Config {
                        path: path.clone(),
                        message: "expected value at line 1 column 1".to_string(),
                    });
                }
            }
            *graph.opened.lock().unwrap() = Some(options);
            Ok(Arc::new(MemoryWorkspace {
                graph: Arc::clone(&graph),
            }) as Arc<dyn Workspace>)
        }
    }

    pub fn resolve_calls(&self) -> usize {
        self.resolve_calls.load(Ordering::SeqCst)
    }

    /// Entrypoints the loader was created with, if it was created.
    pub fn seeded(&self) -> Option<Vec<String>> {
        self.seeded.lock().unwrap().clone()
    }

    /// Options the workspace was opened with, if it was opened.
    pub fn opened(&self) -> Option<WorkspaceOptions> {
        self.opened.lock().unwrap().clone()
    }

    /// Every load request seen so far.
    pub fn requests(&self) -> Vec<(String, RequestedModuleType)> {
        self.requests.lock().unwrap().clone()
    }

    fn lookup(&self, specifier: &str, referrer: &str) -> Option<String> {
        if let Some(url) = self.imports.get(specifier) {
            return Some(url.clone());
        }

        let candidate = if let Some(relative) = specifier.strip_prefix("./") {
            let base = if referrer.is_empty() {
                fixture_root()
            } else {
                Path::new(referrer).parent()?.to_path_buf()
            };
            path_to_file_url(&base.join(relative))?
        } else if Path::new(specifier).is_absolute() {
            path_to_file_url(Path::new(specifier))?
        } else {
            specifier.to_string()
        };

        self.modules.contains_key(&candidate).then_some(candidate)
    }
}

#[async_trait]
impl ModuleLoader for MemoryGraph {
    async fn resolve(
        &self,
        specifier: &str,
        referrer: &str,
        _mode: ResolutionMode,
    ) -> Result<String, WorkspaceError> {
        self.resolve_calls.fetch_add(1, Ordering::SeqCst);
        self.lookup(specifier, referrer)
            .ok_or_else(|| WorkspaceError::unresolved(specifier, referrer, "not in module graph"))
    }

    async fn load(
        &self,
        specifier: &str,
        requested: RequestedModuleType,
    ) -> Result<LoadResponse, WorkspaceError> {
        self.requests
            .lock()
            .unwrap()
            .push((specifier.to_string(), requested));

        match self.modules.get(specifier) {
            Some(Entry::External) => Ok(LoadResponse::External {
                specifier: specifier.to_string(),
            }),
            Some(Entry::Source(media_type, code)) => Ok(LoadResponse::Module {
                specifier: specifier.to_string(),
                media_type: *media_type,
                code: code.clone(),
            }),
            None => Err(WorkspaceError::load(specifier, "module not found")),
        }
    }
}

/// Workspace handle returned by [`MemoryGraph::factory`].
pub struct MemoryWorkspace {
    graph: Arc<MemoryGraph>,
}

#[async_trait]
impl Workspace for MemoryWorkspace {
    async fn create_loader(
        &self,
        options: LoaderOptions,
    ) -> Result<Arc<dyn ModuleLoader>, WorkspaceError> {
        *self.graph.seeded.lock().unwrap() = Some(options.entrypoints);
        Ok(Arc::clone(&self.graph) as Arc<dyn ModuleLoader>)
    }
}
