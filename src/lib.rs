//! docshelf: a GTK4 start screen for document viewers.
//!
//! Toolkit-free pieces (`recent`, `metadata`, `thumbnail`, `jobs`,
//! `scheduler`, `recent_model`, `activation`) hold the logic; `toolbar`,
//! `recent_view`, `recent_item`, `recent_manager`, `actions` and `ui`
//! wire it into GTK.

pub mod actions;
pub mod activation;
pub mod config;
pub mod error;
pub mod jobs;
pub mod logging;
pub mod metadata;
pub mod recent;
pub mod recent_item;
pub mod recent_manager;
pub mod recent_model;
pub mod recent_view;
pub mod scheduler;
pub mod thumbnail;
pub mod toolbar;
pub mod ui;
pub mod utils;
