//! Entrypoint normalization.
//!
//! Bundlers accept entrypoints in several shapes. The workspace only needs the
//! input side, as a flat list in declaration order.

use serde::{Deserialize, Serialize};

/// A single entrypoint in list form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntryPoint {
    /// A plain input path.
    Path(String),
    /// An input path with an explicit output name.
    Named { input: String, output: String },
}

impl EntryPoint {
    /// The input path of this entrypoint.
    #[must_use]
    pub fn input(&self) -> &str {
        match self {
            Self::Path(input) | Self::Named { input, .. } => input,
        }
    }
}

impl From<&str> for EntryPoint {
    fn from(path: &str) -> Self {
        Self::Path(path.to_string())
    }
}

impl From<String> for EntryPoint {
    fn from(path: String) -> Self {
        Self::Path(path)
    }
}

/// Entrypoints as declared in the bundler's build options.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntryPoints {
    /// A list of paths and/or `{in, out}` pairs.
    List(Vec<EntryPoint>),
    /// Output name to input path, in declaration order.
    Map(Vec<(String, String)>),
}

impl EntryPoints {
    /// Build a name → path mapping, preserving iteration order.
    pub fn map<I, K, V>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self::Map(
            entries
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

impl<T: Into<EntryPoint>> From<Vec<T>> for EntryPoints {
    fn from(entries: Vec<T>) -> Self {
        Self::List(entries.into_iter().map(Into::into).collect())
    }
}

/// Flatten declared entrypoints into their input paths.
///
/// Output names are irrelevant to resolution and are dropped. No entrypoints
/// yields an empty list.
#[must_use]
pub fn normalize_entrypoints(entries: Option<&EntryPoints>) -> Vec<String> {
    match entries {
        None => Vec::new(),
        Some(EntryPoints::List(list)) => list.iter().map(|e| e.input().to_string()).collect(),
        Some(EntryPoints::Map(map)) => map.iter().map(|(_, input)| input.clone()).collect(),
    }
}

/// Which entrypoints seed the workspace's module graph.
///
/// The bundler (or other plugins) may introduce virtual entries that have no
/// filesystem presence and would confuse graph construction. `Empty` skips
/// seeding entirely and relies on per-specifier resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntrypointSeeding {
    /// Seed with the normalized declared entrypoints.
    #[default]
    Declared,
    /// Seed with an empty list.
    Empty,
}

impl EntrypointSeeding {
    /// Entrypoints to hand to the workspace under this policy.
    #[must_use]
    pub fn seed(self, entries: Option<&EntryPoints>) -> Vec<String> {
        match self {
            Self::Declared => normalize_entrypoints(entries),
            Self::Empty => Vec::new(),
        }
    }
}
