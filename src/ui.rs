use crate::actions::{install_window_actions, open_document};
use crate::config::Config;
use crate::jobs::JobScheduler;
use crate::metadata::{JsonMetadataStore, MetadataStore};
use crate::recent_manager::GtkRecentRegistry;
use crate::recent_view::RecentView;
use crate::scheduler::{ImageDocumentLoader, ThreadedScheduler};
use crate::toolbar::MinimalToolbar;
use glib::clone;
use gtk4::prelude::*;
use gtk4::{Box as GtkBox, CssProvider, Orientation};
use libadwaita::prelude::AdwApplicationWindowExt;
use libadwaita::{Application, ApplicationWindow};
use std::rc::Rc;
use std::sync::{Arc, mpsc};

fn load_css() {
    let Some(display) = gtk4::gdk::Display::default() else {
        log::warn!("no display; skipping stylesheet");
        return;
    };
    let provider = CssProvider::new();
    provider.load_from_data(include_str!("style.css"));
    gtk4::style_context_add_provider_for_display(
        &display,
        &provider,
        gtk4::STYLE_PROVIDER_PRIORITY_APPLICATION,
    );
}

pub fn build_ui(app: &Application, cfg: &Config) {
    load_css();

    let window = ApplicationWindow::builder()
        .application(app)
        .title("docshelf")
        .default_width(cfg.window_width)
        .default_height(cfg.window_height)
        .build();

    let registry = Rc::new(GtkRecentRegistry::new());
    install_window_actions(&window, registry.clone());

    let (tx, rx) = mpsc::channel();
    let scheduler: Rc<dyn JobScheduler> =
        Rc::new(ThreadedScheduler::new(Arc::new(ImageDocumentLoader), tx));
    let metadata: Rc<dyn MetadataStore> =
        Rc::new(JsonMetadataStore::open(cfg.cache_dir.join("metadata.json")));

    let recent_view = RecentView::new(cfg, registry.clone(), metadata, scheduler, rx);
    recent_view.connect_item_activated(clone!(
        #[strong]
        registry,
        move |uri| open_document(&registry, uri)
    ));

    let root = GtkBox::new(Orientation::Vertical, 0);
    root.add_css_class("start-box");

    // The actions were installed above, so this only fails on a logic error.
    match MinimalToolbar::new(&window) {
        Ok(toolbar) => root.append(toolbar.widget()),
        Err(e) => log::error!("toolbar unavailable: {e}"),
    }
    root.append(&recent_view.root);
    window.set_content(Some(&root));

    window.connect_close_request(clone!(
        #[strong]
        recent_view,
        move |_| {
            recent_view.dispose();
            glib::Propagation::Proceed
        }
    ));
    app.connect_shutdown(clone!(
        #[strong]
        recent_view,
        move |_| recent_view.dispose()
    ));

    window.present();
}
