//! `RecentRegistry` backed by GTK's shared recently-used list.

use glib::SignalHandlerId;
use gtk4::RecentManager;
use gtk4::prelude::*;

use crate::recent::{RecentEntry, RecentRegistry};

pub struct GtkRecentRegistry {
    manager: RecentManager,
    app_name: String,
}

impl GtkRecentRegistry {
    /// Wrap the default recent manager. Entries count as ours when they list
    /// `glib::application_name()` among their handlers.
    pub fn new() -> Self {
        let app_name = glib::application_name()
            .map(|n| n.to_string())
            .unwrap_or_else(|| env!("CARGO_PKG_NAME").to_string());
        Self {
            manager: RecentManager::default(),
            app_name,
        }
    }

    /// Record a document as opened by this application.
    pub fn add(&self, uri: &str) {
        if !self.manager.add_item(uri) {
            log::warn!("cannot add {uri} to the recent documents list");
        }
    }

    pub fn connect_changed<F: Fn() + 'static>(&self, f: F) -> SignalHandlerId {
        self.manager.connect_changed(move |_| f())
    }

    pub fn disconnect(&self, id: SignalHandlerId) {
        self.manager.disconnect(id);
    }
}

impl Default for GtkRecentRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl RecentRegistry for GtkRecentRegistry {
    fn entries(&self) -> Vec<RecentEntry> {
        self.manager
            .items()
            .into_iter()
            .map(|info| RecentEntry {
                uri: info.uri().to_string(),
                display_name: info.display_name().to_string(),
                mime_type: info.mime_type().to_string(),
                modified: info.modified().to_unix(),
                app_associated: info.has_application(&self.app_name),
                is_local: info.is_local(),
                exists: info.exists(),
            })
            .collect()
    }
}
