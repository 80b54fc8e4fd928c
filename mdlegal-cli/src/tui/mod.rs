//! `mdlegal browse`: tabbed terminal dashboard over every list page
//!
//! - One tab per entity, loaded on first visit with skeleton rows
//! - Search, filter cycling and column sort on the active page
//! - Create/edit form and delete confirmation, saved through the service

pub mod app;
pub mod event;
pub mod page;
pub mod terminal;
pub mod ui;

pub use app::{App, Mode};
pub use terminal::run;
