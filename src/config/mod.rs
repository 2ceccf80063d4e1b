//! Configuration module
//!
//! This module contains components for loading and validating settings.

mod loader;
mod model;

pub(crate) use loader::find_project_folder;
pub use loader::{default_settings_path, load_settings, parse_settings, resolve_settings};
pub use model::Settings;
