pub mod app_settings;
pub mod directory;
pub mod refresher;
pub mod sources;
