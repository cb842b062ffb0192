//! Recently-used documents as seen by the start screen.
//!
//! The registry itself (GTK's `recently-used.xbel`) is external; this module
//! only knows how to order and filter what it returns.

use std::cmp::Ordering;

/// Number of documents the start screen shows at most.
pub const MAX_RECENT_VIEW_ITEMS: usize = 20;

/// One entry of the recently-used registry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecentEntry {
    pub uri: String,
    pub display_name: String,
    /// Content type, used to pick the placeholder icon.
    pub mime_type: String,
    /// Last modification of the registry entry, seconds since the epoch.
    pub modified: i64,
    /// Whether this application is among the entry's registered handlers.
    pub app_associated: bool,
    pub is_local: bool,
    pub exists: bool,
}

/// Source of recent entries. Re-queried on every refresh.
pub trait RecentRegistry {
    fn entries(&self) -> Vec<RecentEntry>;
}

/// Ordering used for the grid: app-associated entries first, most recent
/// first among them. Two non-associated entries compare equal and keep
/// whatever order the registry gave them.
pub fn compare_recent_entries(a: &RecentEntry, b: &RecentEntry) -> Ordering {
    match (a.app_associated, b.app_associated) {
        (true, true) => b.modified.cmp(&a.modified),
        (true, false) => Ordering::Less,
        (false, true) => Ordering::Greater,
        (false, false) => Ordering::Equal,
    }
}

/// Sort `entries` and keep at most `cap` that belong to this application
/// and, when local, still exist on disk.
pub fn select_entries(mut entries: Vec<RecentEntry>, cap: usize) -> Vec<RecentEntry> {
    entries.sort_by(compare_recent_entries);
    entries
        .into_iter()
        .filter(|e| e.app_associated)
        .filter(|e| !(e.is_local && !e.exists))
        .take(cap)
        .collect()
}
