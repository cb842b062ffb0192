//! GTK Object wrapper for one recent document
//!
//! `RecentItem` is what the grid's `gio::ListStore` holds. It is a snapshot
//! of a `ListRow`; when the row changes the view swaps in a fresh item.

use glib::Object;
use glib::subclass::prelude::*;
use std::cell::RefCell;

use crate::recent_model::{ListRow, RowIcon};

mod imp {
    use super::*;

    /// Fields copied out of the model row.
    pub struct RecentItemInner {
        pub uri: String,
        pub name: String,
        pub icon: RowIcon,
        /// Last modification of the registry entry, seconds since the epoch.
        pub modified: i64,
        pub selected: bool,
        /// Still waiting on a load or thumbnail job.
        pub busy: bool,
    }

    impl Default for RecentItemInner {
        fn default() -> Self {
            Self {
                uri: String::new(),
                name: String::new(),
                icon: RowIcon::Mime(String::new()),
                modified: 0,
                selected: false,
                busy: false,
            }
        }
    }

    #[derive(Default)]
    pub struct RecentItem {
        pub data: RefCell<RecentItemInner>,
    }

    #[glib::object_subclass]
    impl ObjectSubclass for RecentItem {
        const NAME: &'static str = "DocshelfRecentItem";
        type Type = super::RecentItem;
    }

    impl ObjectImpl for RecentItem {}
}

glib::wrapper! {
    pub struct RecentItem(ObjectSubclass<imp::RecentItem>);
}

impl RecentItem {
    /// Create a new RecentItem mirroring `row`
    pub fn new(row: &ListRow) -> Self {
        let obj: Self = Object::new();

        *obj.imp().data.borrow_mut() = imp::RecentItemInner {
            uri: row.uri.clone(),
            name: row.display_name.clone(),
            icon: row.icon.clone(),
            modified: row.modified,
            selected: row.selected,
            busy: !row.state.is_terminal(),
        };

        obj
    }

    pub fn uri(&self) -> String {
        self.imp().data.borrow().uri.clone()
    }

    pub fn name(&self) -> String {
        self.imp().data.borrow().name.clone()
    }

    /// Cheap: thumbnails are shared behind an `Arc`.
    pub fn icon(&self) -> RowIcon {
        self.imp().data.borrow().icon.clone()
    }

    pub fn modified(&self) -> i64 {
        self.imp().data.borrow().modified
    }

    pub fn selected(&self) -> bool {
        self.imp().data.borrow().selected
    }

    pub fn busy(&self) -> bool {
        self.imp().data.borrow().busy
    }
}
