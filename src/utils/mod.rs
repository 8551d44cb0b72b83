pub mod csv_handler;
pub mod title;

pub use title::{normalize_display_title, normalize_title_key};
