mod config;
mod logging;

pub use config::{load_config, resolve_load_config};
pub use logging::init_logging;
