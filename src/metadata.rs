//! Per-file metadata used as the thumbnail cache index.
//!
//! Fields stored per document URI:
//! - `mtime`: when the cached thumbnail was produced (seconds since epoch)
//! - `thumbnail-path`: where the rendered PNG lives
//! - `no-thumbnail`: set to 1 when the document could not be rendered

use serde::{Deserialize, Serialize};
use std::cell::RefCell;
use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::path::PathBuf;

pub const MTIME_KEY: &str = "mtime";
pub const THUMBNAIL_PATH_KEY: &str = "thumbnail-path";
pub const NO_THUMBNAIL_KEY: &str = "no-thumbnail";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MetadataValue {
    U64(u64),
    Str(String),
}

/// Typed key/value fields keyed by file identity. Some files (remote ones,
/// for instance) are not supported; callers must check `is_supported` first.
pub trait MetadataStore {
    fn is_supported(&self, uri: &str) -> bool;
    fn get_u64(&self, uri: &str, key: &str) -> Option<u64>;
    fn get_string(&self, uri: &str, key: &str) -> Option<String>;
    fn set_u64(&self, uri: &str, key: &str, value: u64);
    fn set_string(&self, uri: &str, key: &str, value: &str);
    fn remove(&self, uri: &str, key: &str);
    /// Every URI that currently has a record.
    fn uris(&self) -> Vec<String>;
    /// Drop the whole record for `uri`.
    fn forget(&self, uri: &str);
}

/// A cached record is fresh only when it carries a stored mtime that is not
/// older than the source file's current mtime. An unknown or zero file
/// mtime always counts as stale.
pub fn is_stale(stored: Option<u64>, file_mtime: Option<u64>) -> bool {
    match (stored, file_mtime) {
        (Some(stored), Some(file)) => file == 0 || stored < file,
        _ => true,
    }
}

type Records = HashMap<String, BTreeMap<String, MetadataValue>>;

/// Metadata kept in a single JSON document, written back after every change.
#[derive(Debug)]
pub struct JsonMetadataStore {
    path: PathBuf,
    records: RefCell<Records>,
}

impl JsonMetadataStore {
    /// Open the store at `path`. A missing or unreadable file starts empty.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let records = match fs::read_to_string(&path) {
            Ok(data) => serde_json::from_str(&data).unwrap_or_else(|e| {
                log::warn!("discarding corrupt metadata store {}: {e}", path.display());
                Records::default()
            }),
            Err(_) => Records::default(),
        };
        Self {
            path,
            records: RefCell::new(records),
        }
    }

    fn save(&self) {
        if let Some(dir) = self.path.parent() {
            let _ = fs::create_dir_all(dir);
        }
        let data = match serde_json::to_string_pretty(&*self.records.borrow()) {
            Ok(d) => d,
            Err(e) => {
                log::warn!("cannot serialize metadata: {e}");
                return;
            }
        };
        if let Err(e) = fs::write(&self.path, data) {
            log::warn!("cannot write metadata store {}: {e}", self.path.display());
        }
    }

    fn set(&self, uri: &str, key: &str, value: MetadataValue) {
        self.records
            .borrow_mut()
            .entry(uri.to_string())
            .or_default()
            .insert(key.to_string(), value);
        self.save();
    }

    fn get(&self, uri: &str, key: &str) -> Option<MetadataValue> {
        self.records.borrow().get(uri)?.get(key).cloned()
    }
}

impl MetadataStore for JsonMetadataStore {
    fn is_supported(&self, uri: &str) -> bool {
        uri.starts_with("file://")
    }

    fn get_u64(&self, uri: &str, key: &str) -> Option<u64> {
        match self.get(uri, key)? {
            MetadataValue::U64(v) => Some(v),
            MetadataValue::Str(_) => None,
        }
    }

    fn get_string(&self, uri: &str, key: &str) -> Option<String> {
        match self.get(uri, key)? {
            MetadataValue::Str(s) => Some(s),
            MetadataValue::U64(_) => None,
        }
    }

    fn set_u64(&self, uri: &str, key: &str, value: u64) {
        self.set(uri, key, MetadataValue::U64(value));
    }

    fn set_string(&self, uri: &str, key: &str, value: &str) {
        self.set(uri, key, MetadataValue::Str(value.to_string()));
    }

    fn remove(&self, uri: &str, key: &str) {
        let removed = {
            let mut records = self.records.borrow_mut();
            let Some(fields) = records.get_mut(uri) else {
                return;
            };
            let removed = fields.remove(key).is_some();
            if fields.is_empty() {
                records.remove(uri);
            }
            removed
        };
        if removed {
            self.save();
        }
    }

    fn uris(&self) -> Vec<String> {
        self.records.borrow().keys().cloned().collect()
    }

    fn forget(&self, uri: &str) {
        let removed = self.records.borrow_mut().remove(uri).is_some();
        if removed {
            self.save();
        }
    }
}
