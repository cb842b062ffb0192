//! Window actions behind the toolbar buttons and document activation.

use glib::clone;
use gtk4::prelude::*;
use gtk4::{FileDialog, FileFilter, gio};
use libadwaita::prelude::AdwDialogExt;
use libadwaita::{AboutDialog, ApplicationWindow};
use std::rc::Rc;

use crate::recent_manager::GtkRecentRegistry;
use crate::toolbar::{ACTION_ABOUT, ACTION_CLOSE, ACTION_OPEN};

/// Hand a document to the desktop's default handler.
pub fn open_uri(uri: &str) {
    if let Err(e) = std::process::Command::new("xdg-open").arg(uri).spawn() {
        log::error!("Failed to open {uri} with xdg-open: {e}");
    }
}

/// Record `uri` as recently used by us, then open it.
pub fn open_document(registry: &GtkRecentRegistry, uri: &str) {
    registry.add(uri);
    open_uri(uri);
}

fn document_filter() -> gio::ListStore {
    let documents = FileFilter::new();
    documents.set_name(Some("Documents"));
    for mime in [
        "application/pdf",
        "application/postscript",
        "image/vnd.djvu",
        "image/tiff",
        "image/*",
    ] {
        documents.add_mime_type(mime);
    }
    let all = FileFilter::new();
    all.set_name(Some("All files"));
    all.add_pattern("*");

    let filters = gio::ListStore::new::<FileFilter>();
    filters.append(&documents);
    filters.append(&all);
    filters
}

fn show_open_dialog(window: &ApplicationWindow, registry: Rc<GtkRecentRegistry>) {
    let dialog = FileDialog::builder()
        .title("Open Document")
        .modal(true)
        .filters(&document_filter())
        .build();
    dialog.open(Some(window), gio::Cancellable::NONE, move |result| match result {
        Ok(file) => open_document(&registry, &file.uri()),
        Err(e) => log::debug!("open dialog closed: {e}"),
    });
}

fn show_about(window: &ApplicationWindow) {
    let dialog = AboutDialog::builder()
        .application_name("docshelf")
        .application_icon("x-office-document")
        .version(env!("CARGO_PKG_VERSION"))
        .comments(env!("CARGO_PKG_DESCRIPTION"))
        .build();
    dialog.present(Some(window));
}

/// Register `win.open`, `win.about` and `win.close` on `window`.
pub fn install_window_actions(window: &ApplicationWindow, registry: Rc<GtkRecentRegistry>) {
    let open = gio::SimpleAction::new(ACTION_OPEN, None);
    open.connect_activate(clone!(
        #[weak]
        window,
        move |_, _| show_open_dialog(&window, registry.clone())
    ));
    window.add_action(&open);

    let about = gio::SimpleAction::new(ACTION_ABOUT, None);
    about.connect_activate(clone!(
        #[weak]
        window,
        move |_, _| show_about(&window)
    ));
    window.add_action(&about);

    let close = gio::SimpleAction::new(ACTION_CLOSE, None);
    close.connect_activate(clone!(
        #[weak]
        window,
        move |_, _| window.close()
    ));
    window.add_action(&close);
}
