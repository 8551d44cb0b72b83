//! CLI command implementations

mod config_gen;
mod counts;
mod import;
mod record;

pub use config_gen::config_generate;
pub use counts::show_counts;
pub use import::import_views;
pub use record::record_view;
