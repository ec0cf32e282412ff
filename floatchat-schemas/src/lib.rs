pub mod api;
pub mod coordinate;
pub mod file_formats;
pub mod profile;
