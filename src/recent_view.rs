//! GTK grid of recently opened documents
//!
//! `RecentView` owns the `RecentModel` and mirrors it into a
//! `gio::ListStore` of `RecentItem`s shown by a `GridView`. It:
//! - refreshes when the recent documents registry changes
//! - drains job completions from the scheduler on the UI thread
//! - turns press/release pairs on a cell into "item activated" callbacks
//!
//! Call `dispose` before the window goes away; it disconnects from the
//! registry, stops the poller and cancels every pending job.

use glib::SignalHandlerId;
use gtk4::prelude::*;
use gtk4::{
    Align, GestureClick, GridView, Image, Label, ListItem, NoSelection, Orientation, PolicyType,
    ScrolledWindow, SignalListItemFactory, gdk, gio,
};
use image::RgbaImage;
use std::cell::RefCell;
use std::rc::Rc;
use std::sync::mpsc::{Receiver, TryRecvError};
use std::time::Duration;

use crate::activation::{PressTracker, activate_on_release};
use crate::config::Config;
use crate::jobs::{JobEvent, JobScheduler};
use crate::metadata::MetadataStore;
use crate::recent_item::RecentItem;
use crate::recent_manager::GtkRecentRegistry;
use crate::recent_model::{ModelChange, RecentModel, RowIcon};
use crate::thumbnail::ThumbnailCache;

/// How often finished jobs are collected from the scheduler.
const POLL_INTERVAL: Duration = Duration::from_millis(30);

type ActivatedHandler = Rc<dyn Fn(&str)>;

/// Upload an RGBA thumbnail as a GDK texture.
fn texture_for(img: &RgbaImage) -> gdk::Texture {
    let (width, height) = img.dimensions();
    let bytes = glib::Bytes::from(img.as_raw().as_slice());
    gdk::MemoryTexture::new(
        width as i32,
        height as i32,
        gdk::MemoryFormat::R8g8b8a8,
        &bytes,
        (width * 4) as usize,
    )
    .upcast()
}

fn format_modified(secs: i64) -> String {
    use chrono::TimeZone;
    chrono::Local
        .timestamp_opt(secs, 0)
        .single()
        .map(|t| t.format("%Y-%m-%d %H:%M").to_string())
        .unwrap_or_default()
}

/// Fill the widgets built in `setup` from `item`.
fn bind_recent_item(item: &RecentItem, image: &Image, label: &Label, cell: &gtk4::Box) {
    match item.icon() {
        RowIcon::Thumbnail(thumb) => image.set_paintable(Some(&texture_for(&thumb))),
        RowIcon::Mime(mime) if !mime.is_empty() => {
            image.set_from_gicon(&gio::content_type_get_icon(&mime))
        }
        RowIcon::Mime(_) => image.set_icon_name(Some("text-x-generic")),
    }
    label.set_text(&item.name());

    let modified = format_modified(item.modified());
    let tooltip = if modified.is_empty() {
        item.uri()
    } else {
        format!("{}\n{}", item.uri(), modified)
    };
    cell.set_tooltip_text(Some(&tooltip));

    if item.selected() {
        cell.add_css_class("selected");
    } else {
        cell.remove_css_class("selected");
    }
    if item.busy() {
        cell.add_css_class("busy");
    } else {
        cell.remove_css_class("busy");
    }
}

#[derive(Clone)]
pub struct RecentView {
    /// Container the grid is swapped into; add this to the window.
    pub root: ScrolledWindow,
    store: gio::ListStore,
    selection: NoSelection,
    grid: Rc<RefCell<Option<GridView>>>,
    model: Rc<RefCell<RecentModel>>,
    registry: Rc<GtkRecentRegistry>,
    changed_handler: Rc<RefCell<Option<SignalHandlerId>>>,
    poller: Rc<RefCell<Option<glib::SourceId>>>,
    tracker: Rc<RefCell<PressTracker>>,
    activated: Rc<RefCell<Vec<ActivatedHandler>>>,
    icon_size: u32,
}

impl RecentView {
    /// Build the view and populate it.
    ///
    /// # Arguments
    /// * `cfg` - item cap, icon size and cache directory
    /// * `registry` - recent documents list; its change signal triggers a refresh
    /// * `metadata` - thumbnail cache index
    /// * `scheduler` - runs load and thumbnail jobs
    /// * `events` - completions from `scheduler`, drained on the UI thread
    pub fn new(
        cfg: &Config,
        registry: Rc<GtkRecentRegistry>,
        metadata: Rc<dyn MetadataStore>,
        scheduler: Rc<dyn JobScheduler>,
        events: Receiver<JobEvent>,
    ) -> Self {
        let model = RecentModel::new(
            registry.clone(),
            metadata,
            ThumbnailCache::new(cfg.cache_dir.join("thumbnails")),
            scheduler,
            cfg.max_items,
            cfg.icon_size,
        );

        let root = ScrolledWindow::builder()
            .hexpand(true)
            .vexpand(true)
            .has_frame(true)
            .hscrollbar_policy(PolicyType::Never)
            .vscrollbar_policy(PolicyType::Automatic)
            .build();

        let store = gio::ListStore::new::<RecentItem>();
        let selection = NoSelection::new(Some(store.clone()));

        let view = Self {
            root,
            store,
            selection,
            grid: Rc::new(RefCell::new(None)),
            model: Rc::new(RefCell::new(model)),
            registry,
            changed_handler: Rc::new(RefCell::new(None)),
            poller: Rc::new(RefCell::new(None)),
            tracker: Rc::new(RefCell::new(PressTracker::new())),
            activated: Rc::new(RefCell::new(Vec::new())),
            icon_size: cfg.icon_size,
        };

        let on_changed = view.clone();
        let handler = view.registry.connect_changed(move || {
            log::debug!("recent documents changed");
            on_changed.refresh();
        });
        *view.changed_handler.borrow_mut() = Some(handler);

        view.start_poller(events);
        view.rebuild();
        view
    }

    /// Register a callback receiving the URI of every activated document.
    pub fn connect_item_activated<F: Fn(&str) + 'static>(&self, f: F) {
        self.activated.borrow_mut().push(Rc::new(f));
    }

    fn emit_item_activated(&self, uri: &str) {
        // Handlers may register more handlers; don't hold the borrow.
        let handlers = self.activated.borrow().clone();
        for handler in handlers {
            handler(uri);
        }
    }

    /// Replace the grid widget with a fresh one and repopulate it.
    pub fn rebuild(&self) {
        if self.grid.borrow_mut().take().is_some() {
            self.root.set_child(None::<&gtk4::Widget>);
        }
        let grid = self.create_grid();
        self.root.set_child(Some(&grid));
        *self.grid.borrow_mut() = Some(grid);
        self.refresh();
    }

    /// Reload the documents from the registry.
    pub fn refresh(&self) {
        let change = self.model.borrow_mut().refresh();
        self.apply_change(change);
        if let Some(grid) = self.grid.borrow().as_ref() {
            grid.set_model(Some(&self.selection));
        }
    }

    /// Release everything tied to this view. Safe to call more than once.
    pub fn dispose(&self) {
        if let Some(id) = self.changed_handler.borrow_mut().take() {
            self.registry.disconnect(id);
        }
        if let Some(id) = self.poller.borrow_mut().take() {
            id.remove();
        }
        self.model.borrow_mut().clear();
        self.store.remove_all();
        self.activated.borrow_mut().clear();
        if self.grid.borrow_mut().take().is_some() {
            self.root.set_child(None::<&gtk4::Widget>);
        }
    }

    fn apply_change(&self, change: ModelChange) {
        let model = self.model.borrow();
        match change {
            ModelChange::Reset => {
                let items: Vec<RecentItem> = model.rows().iter().map(RecentItem::new).collect();
                self.store.splice(0, self.store.n_items(), &items);
            }
            ModelChange::Row(index) => {
                let Some(row) = model.row(index) else {
                    return;
                };
                if (index as u32) < self.store.n_items() {
                    self.store.splice(index as u32, 1, &[RecentItem::new(row)]);
                }
            }
        }
    }

    fn handle_event(&self, event: JobEvent) {
        let change = self.model.borrow_mut().handle_event(event);
        if let Some(change) = change {
            self.apply_change(change);
        }
    }

    /// Drain scheduler events on the main loop until the view is disposed.
    fn start_poller(&self, events: Receiver<JobEvent>) {
        let view = self.clone();
        let source = glib::timeout_add_local(POLL_INTERVAL, move || {
            loop {
                match events.try_recv() {
                    Ok(event) => view.handle_event(event),
                    Err(TryRecvError::Empty) => return glib::ControlFlow::Continue,
                    Err(TryRecvError::Disconnected) => {
                        *view.poller.borrow_mut() = None;
                        return glib::ControlFlow::Break;
                    }
                }
            }
        });
        *self.poller.borrow_mut() = Some(source);
    }

    fn on_press(&self, n_press: i32, position: u32) {
        self.tracker.borrow_mut().press(n_press, Some(position));
    }

    fn on_release(&self, n_press: i32, cell: Option<u32>) {
        let uri = {
            let mut tracker = self.tracker.borrow_mut();
            let mut model = self.model.borrow_mut();
            activate_on_release(&mut tracker, &mut model, n_press, cell)
        };
        let Some(uri) = uri else {
            return;
        };
        if let Some(position) = cell {
            self.apply_change(ModelChange::Row(position as usize));
        }
        log::debug!("activated {uri}");
        self.emit_item_activated(&uri);
    }

    fn create_grid(&self) -> GridView {
        let factory = SignalListItemFactory::new();
        let icon_size = self.icon_size as i32;

        let view = self.clone();
        factory.connect_setup(move |_, obj| {
            let Some(list_item) = obj.downcast_ref::<ListItem>() else {
                return;
            };

            let cell = gtk4::Box::new(Orientation::Vertical, 6);
            cell.add_css_class("recent-cell");
            cell.set_margin_top(6);
            cell.set_margin_bottom(6);
            cell.set_margin_start(6);
            cell.set_margin_end(6);

            let image = Image::new();
            image.set_pixel_size(icon_size);
            image.set_halign(Align::Center);
            cell.append(&image);

            let label = Label::new(None);
            label.set_ellipsize(gtk4::pango::EllipsizeMode::Middle);
            label.set_max_width_chars(18);
            label.set_justify(gtk4::Justification::Center);
            cell.append(&label);

            let click = GestureClick::new();
            click.set_button(1);
            let item_ref = list_item.downgrade();
            let press_view = view.clone();
            click.connect_pressed(move |_, n_press, _, _| {
                if let Some(item) = item_ref.upgrade() {
                    press_view.on_press(n_press, item.position());
                }
            });
            let item_ref = list_item.downgrade();
            let cell_ref = cell.downgrade();
            let release_view = view.clone();
            click.connect_released(move |_, n_press, x, y| {
                let Some(item) = item_ref.upgrade() else {
                    return;
                };
                // Releases outside the pressed cell land on no known cell.
                let inside = cell_ref.upgrade().is_some_and(|w| w.contains(x, y));
                release_view.on_release(n_press, inside.then(|| item.position()));
            });
            cell.add_controller(click);

            list_item.set_child(Some(&cell));
        });

        factory.connect_bind(|_, obj| {
            let Some(list_item) = obj.downcast_ref::<ListItem>() else {
                return;
            };
            let Some(item) = list_item.item().and_downcast::<RecentItem>() else {
                return;
            };
            let Some(cell) = list_item.child().and_downcast::<gtk4::Box>() else {
                return;
            };
            let Some(image) = cell.first_child().and_downcast::<Image>() else {
                return;
            };
            let Some(label) = image.next_sibling().and_downcast::<Label>() else {
                return;
            };
            bind_recent_item(&item, &image, &label, &cell);
        });

        let grid = GridView::new(Some(self.selection.clone()), Some(factory));
        grid.add_css_class("content-view");
        grid.set_max_columns(8);
        grid.set_single_click_activate(false);
        grid.set_vexpand(true);
        grid
    }
}
