use anyhow::Context;
use dnstap_gen_domain::{CliOverrides, Config, LoadConfig};

pub fn load_config(path: Option<&str>, overrides: CliOverrides) -> anyhow::Result<Config> {
    Config::load(path, overrides).context("Failed to load configuration")
}

/// Validates before any connection is opened.
pub fn resolve_load_config(config: &Config) -> anyhow::Result<LoadConfig> {
    let load = config
        .to_load_config()
        .context("Invalid configuration")?;

    tracing::debug!(
        target = %load.target,
        connections = load.connections,
        records = load.records_per_connection,
        frames_per_connection = load.frames_per_connection(),
        seed = load.seed,
        "Configuration resolved"
    );
    Ok(load)
}
