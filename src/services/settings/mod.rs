//! Settings file handling and the mapping from settings to a calendar.

pub mod mapper;
pub mod service;

pub use service::{default_settings_path, load_settings, save_settings};
