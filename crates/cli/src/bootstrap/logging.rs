use dnstap_gen_domain::config::LoggingConfig;
use tracing_subscriber::EnvFilter;

/// `RUST_LOG` wins over the configured level. Logs go to stderr so the
/// run report on stdout stays machine-readable.
pub fn init_logging(config: &LoggingConfig) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false);

    if config.is_json() {
        builder.json().init();
    } else {
        builder.init();
    }
}
