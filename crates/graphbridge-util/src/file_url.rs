//! Conversion between `file:` URLs and filesystem paths.

use std::path::{Path, PathBuf};
use url::Url;

/// Check whether a string carries the `file:` scheme.
#[must_use]
pub fn is_file_url(s: &str) -> bool {
    s.starts_with("file:")
}

/// Convert a `file:` URL into a filesystem path.
///
/// Percent-encoded characters are decoded. Returns `None` if the string is not
/// a valid URL, is not a `file:` URL, or has no local path representation
/// (e.g. a remote host on unix).
#[must_use]
pub fn file_url_to_path(url: &str) -> Option<PathBuf> {
    let url = Url::parse(url).ok()?;
    if url.scheme() != "file" {
        return None;
    }
    url.to_file_path().ok()
}

/// Convert an absolute filesystem path into a `file:` URL string.
///
/// Returns `None` for relative paths.
#[must_use]
pub fn path_to_file_url(path: &Path) -> Option<String> {
    Url::from_file_path(path).ok().map(String::from)
}
