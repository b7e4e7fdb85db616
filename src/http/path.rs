//! URL path translation module
//!
//! Maps a request target onto a path relative to the document root.

use std::path::PathBuf;

/// A request path resolved against the document root
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranslatedPath {
    /// Path relative to the root; empty for the root itself
    pub relative: PathBuf,
    /// Whether the request path ended with `/`
    pub trailing_slash: bool,
}

/// Translate a URL path into a root-relative filesystem path
///
/// Query and fragment are dropped, percent-escapes decoded, and `.`/`..`
/// segments resolved lexically. `..` never climbs above the root.
pub fn translate_path(url_path: &str) -> TranslatedPath {
    let path = url_path
        .split_once('?')
        .map_or(url_path, |(p, _)| p);
    let path = path.split_once('#').map_or(path, |(p, _)| p);
    let trailing_slash = path.trim_end().ends_with('/');

    let decoded = urlencoding::decode_binary(path.as_bytes());
    let decoded = String::from_utf8_lossy(&decoded);

    let mut segments: Vec<&str> = Vec::new();
    for segment in decoded.split('/') {
        match segment {
            "" | "." => {}
            ".." => {
                segments.pop();
            }
            s => segments.push(s),
        }
    }

    TranslatedPath {
        relative: segments.iter().collect(),
        trailing_slash,
    }
}

/// Append `/` to the path component of a request target, keeping the query
///
/// Leading slashes (and backslashes, which browsers read as slashes)
/// collapse to one `/` so the result is never a `//host/...` reference.
pub fn with_trailing_slash(target: &str) -> String {
    let target = target.trim_start_matches(['/', '\\']);
    match target.split_once('?') {
        Some((path, query)) => format!("/{path}/?{query}"),
        None => format!("/{target}/"),
    }
}
