//! Utility functions for docshelf
//!
//! Path and URI helpers shared by the registry adapter, the metadata store
//! and the document loader.

use std::path::{Path, PathBuf};
use std::time::UNIX_EPOCH;

/// Expand a path starting with `~` to the user's home directory
///
/// - `~/something` → `$HOME/something`
/// - `~` → `$HOME`
///
/// Anything else is returned unchanged.
pub fn expand_home(path: &str) -> PathBuf {
    let home = dirs::home_dir().unwrap_or_default();

    if let Some(rest) = path.strip_prefix("~/") {
        home.join(rest)
    } else if path == "~" {
        home
    } else {
        PathBuf::from(path)
    }
}

/// Convert a `file://` URI into a local path, percent-decoding it.
///
/// Returns `None` for any other scheme and for URIs with a non-empty
/// authority other than `localhost`.
pub fn uri_to_path(uri: &str) -> Option<PathBuf> {
    let rest = uri.strip_prefix("file://")?;
    let rest = rest.strip_prefix("localhost").unwrap_or(rest);
    if !rest.starts_with('/') {
        return None;
    }
    let decoded = urlencoding::decode(rest).ok()?;
    Some(PathBuf::from(decoded.into_owned()))
}

/// Build a `file://` URI for an absolute path.
pub fn path_to_uri(path: &Path) -> String {
    let encoded = path
        .to_string_lossy()
        .split('/')
        .map(|segment| urlencoding::encode(segment).into_owned())
        .collect::<Vec<_>>()
        .join("/");
    format!("file://{encoded}")
}

/// Modification time of a local file in whole seconds since the epoch.
///
/// Failures are logged and reported as `None`, which callers treat as a
/// cache miss.
pub fn file_mtime(path: &Path) -> Option<u64> {
    let modified = match std::fs::metadata(path).and_then(|m| m.modified()) {
        Ok(t) => t,
        Err(e) => {
            log::warn!("cannot query modification time of {}: {e}", path.display());
            return None;
        }
    };
    modified
        .duration_since(UNIX_EPOCH)
        .ok()
        .map(|d| d.as_secs())
}

/// Current wall-clock time in seconds since the epoch.
pub fn now_secs() -> u64 {
    chrono::Utc::now().timestamp().max(0) as u64
}
