//! System-level modules
//!
//! Process-wide setup that does not belong to the storage or service layers.

pub mod logging;

pub use logging::init_logging;
