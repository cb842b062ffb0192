//! Minimal toolbar for the start window
//!
//! Three icon-only buttons bound to window actions:
//! - open a document (left)
//! - about and close (right, after a flexible spacer)
//!
//! The bar sits inside a `WindowHandle`, so it doubles as a title bar the
//! window can be dragged by.

use gtk4::prelude::*;
use gtk4::{Align, Box as GtkBox, Button, Image, Orientation, WindowHandle, gio};

use crate::error::{Error, Result};

pub const ACTION_OPEN: &str = "open";
pub const ACTION_ABOUT: &str = "about";
pub const ACTION_CLOSE: &str = "close";

/// Pixel size of toolbar-sized icons.
pub const TOOLBAR_ICON_PX: i32 = 24;
/// Pixel size of menu-sized icons, which the buttons actually draw.
pub const MENU_ICON_PX: i32 = 16;

/// Margin that centres a menu-sized icon in a toolbar-sized slot.
pub fn icon_margin(toolbar_px: i32, menu_px: i32) -> i32 {
    (f64::from(toolbar_px - menu_px) / 2.0).floor() as i32
}

/// Create an icon-only button activating `win.<action>`
///
/// # Arguments
/// * `action` - Name of the window action the button triggers
/// * `icon_name` - Themed icon shown on the button
/// * `tooltip` - Text shown on hover, since the button has no label
fn make_icon_button(action: &str, icon_name: &str, tooltip: &str) -> Button {
    let margin = icon_margin(TOOLBAR_ICON_PX, MENU_ICON_PX);

    let image = Image::from_icon_name(icon_name);
    image.set_pixel_size(MENU_ICON_PX);
    image.set_margin_top(margin);
    image.set_margin_bottom(margin);
    image.set_margin_start(margin);
    image.set_margin_end(margin);

    let btn = Button::new();
    btn.add_css_class("toolbar-button");
    btn.set_child(Some(&image));
    btn.set_action_name(Some(&format!("win.{action}")));
    btn.set_tooltip_text(Some(tooltip));
    btn.set_focus_on_click(false);
    btn
}

pub struct MinimalToolbar {
    root: WindowHandle,
}

impl MinimalToolbar {
    /// Build the toolbar for `window`
    ///
    /// Fails when the window does not provide the `open`, `about` and
    /// `close` actions the buttons are bound to.
    pub fn new(window: &impl IsA<gio::ActionMap>) -> Result<Self> {
        for action in [ACTION_OPEN, ACTION_ABOUT, ACTION_CLOSE] {
            if window.lookup_action(action).is_none() {
                return Err(Error::MissingAction(action));
            }
        }

        let bar = GtkBox::new(Orientation::Horizontal, 0);
        // Styled like a menubar so the theme treats it as a drag area.
        bar.add_css_class("toolbar");
        bar.add_css_class("menubar");
        bar.set_hexpand(true);

        let open = make_icon_button(ACTION_OPEN, "document-open-symbolic", "Open a document");
        bar.append(&open);

        let spacer = GtkBox::new(Orientation::Horizontal, 0);
        spacer.set_hexpand(true);
        bar.append(&spacer);

        let about = make_icon_button(ACTION_ABOUT, "help-about-symbolic", "About");
        about.set_halign(Align::End);
        about.set_margin_end(6);
        bar.append(&about);

        let close = make_icon_button(ACTION_CLOSE, "window-close-symbolic", "Close");
        close.set_halign(Align::End);
        bar.append(&close);

        let root = WindowHandle::new();
        root.set_child(Some(&bar));

        Ok(Self { root })
    }

    pub fn widget(&self) -> &WindowHandle {
        &self.root
    }
}
