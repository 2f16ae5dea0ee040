mod errors;
mod generator;
mod logging;
mod root;
mod target;

pub use errors::ConfigError;
pub use generator::{GeneratorConfig, MAX_LABEL_LEN};
pub use logging::LoggingConfig;
pub use root::{CliOverrides, Config};
pub use target::TargetConfig;
