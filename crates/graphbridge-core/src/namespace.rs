//! Namespace classification for canonical module identifiers.
//!
//! A namespace is the protocol family of a resolved module. The bundler keeps
//! modules from different namespaces apart and routes loads by namespace.

use std::fmt;

/// Namespace of a resolved module, derived from its URL scheme.
///
/// "No namespace" is `Option::<Namespace>::None` and means the bundler should
/// fall back to its default handling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Namespace {
    File,
    Http,
    Https,
    Npm,
    Jsr,
}

/// Namespace for `data:` URLs. The bundler may hand these back to us, but
/// classification never produces it.
pub const DATA_NAMESPACE: &str = "data";

/// Namespaces the resolve hook is registered for, in addition to the
/// unscoped catch-all.
pub const RESOLVE_NAMESPACES: &[&str] = &["file", "http", "https", DATA_NAMESPACE, "npm", "jsr"];

/// Namespaces the load hook is registered for.
pub const LOAD_NAMESPACES: &[&str] = &["file", "jsr", "npm", "http", "https", DATA_NAMESPACE];

impl Namespace {
    /// All recognized namespaces.
    pub const ALL: [Namespace; 5] = [
        Namespace::File,
        Namespace::Http,
        Namespace::Https,
        Namespace::Npm,
        Namespace::Jsr,
    ];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::File => "file",
            Self::Http => "http",
            Self::Https => "https",
            Self::Npm => "npm",
            Self::Jsr => "jsr",
        }
    }

    /// Map a bare scheme (without the trailing `:`) to a namespace.
    #[must_use]
    pub fn from_scheme(scheme: &str) -> Option<Self> {
        match scheme {
            "file" => Some(Self::File),
            "http" => Some(Self::Http),
            "https" => Some(Self::Https),
            "npm" => Some(Self::Npm),
            "jsr" => Some(Self::Jsr),
            _ => None,
        }
    }

    /// Classify a canonical identifier by the text before its first `:`.
    ///
    /// Identifiers without a colon and unrecognized schemes yield `None`.
    #[must_use]
    pub fn classify(identifier: &str) -> Option<Self> {
        let (scheme, _) = identifier.split_once(':')?;
        Self::from_scheme(scheme)
    }

    /// Whether identifiers in this namespace are already canonical as a
    /// bundler-facing path (everything except `file`).
    #[must_use]
    pub fn is_verbatim(self) -> bool {
        !matches!(self, Self::File)
    }
}

impl fmt::Display for Namespace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
