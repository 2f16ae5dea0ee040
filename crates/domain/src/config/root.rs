use serde::{Deserialize, Serialize};
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

use super::errors::ConfigError;
use super::generator::{GeneratorConfig, MAX_LABEL_LEN};
use super::logging::LoggingConfig;
use super::target::TargetConfig;
use crate::dns_record::RecordType;
use crate::envelope::DEFAULT_VERSION;
use crate::load_config::{FailurePolicy, LoadConfig, NameSource, QueryTemplate};
use crate::target::{CollectorTarget, TransportKind};

const LOCAL_CONFIG_FILE: &str = "dnstap-generator.toml";

/// Main configuration structure for the generator
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct Config {
    /// Collector address and connection timeouts
    #[serde(default)]
    pub target: TargetConfig,

    /// Traffic shape
    #[serde(default)]
    pub generator: GeneratorConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from file or use defaults
    ///
    /// Priority order:
    /// 1. Explicitly provided path
    /// 2. dnstap-generator.toml in current directory
    /// 3. Default configuration
    ///
    /// Command-line overrides are applied on top in every case.
    pub fn load(path: Option<&str>, cli_overrides: CliOverrides) -> Result<Self, ConfigError> {
        let mut config = if let Some(path) = path {
            Self::from_file(path)?
        } else if std::path::Path::new(LOCAL_CONFIG_FILE).exists() {
            Self::from_file(LOCAL_CONFIG_FILE)?
        } else {
            Self::default()
        };

        config.apply_cli_overrides(cli_overrides);
        Ok(config)
    }

    pub fn from_toml(contents: &str) -> Result<Self, ConfigError> {
        toml::from_str(contents).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    fn from_file(path: &str) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::FileRead(path.to_string(), e.to_string()))?;
        Self::from_toml(&contents)
    }

    fn apply_cli_overrides(&mut self, overrides: CliOverrides) {
        if let Some(transport) = overrides.transport {
            self.target.transport = transport;
        }
        if let Some(address) = overrides.address {
            self.target.address = address;
        }
        if let Some(port) = overrides.port {
            self.target.port = port;
        }
        if let Some(secs) = overrides.handshake_timeout_secs {
            self.target.handshake_timeout_secs = secs;
        }
        if let Some(count) = overrides.count {
            self.generator.count = count;
        }
        if let Some(connections) = overrides.connections {
            self.generator.connections = connections;
        }
        if let Some(min) = overrides.domain_min {
            self.generator.domain_min = min;
        }
        if let Some(max) = overrides.domain_max {
            self.generator.domain_max = max;
        }
        if overrides.qname.is_some() {
            self.generator.qname = overrides.qname;
        }
        if overrides.qtype.is_some() {
            self.generator.qtype = overrides.qtype;
        }
        if overrides.skip_queries {
            self.generator.skip_queries = true;
        }
        if overrides.skip_replies {
            self.generator.skip_replies = true;
        }
        if overrides.seed.is_some() {
            self.generator.seed = overrides.seed;
        }
        if let Some(policy) = overrides.on_error {
            self.generator.on_error = policy;
        }
        if let Some(level) = overrides.log_level {
            self.logging.level = level;
        }
    }

    /// Validate configuration. Runs before any connection is opened.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let generator = &self.generator;

        if generator.connections == 0 {
            return Err(ConfigError::Validation(
                "Connection count must be at least 1".to_string(),
            ));
        }

        if generator.skip_queries && generator.skip_replies && generator.count > 0 {
            return Err(ConfigError::Validation(
                "Both queries and replies are suppressed, nothing would be sent".to_string(),
            ));
        }

        match &generator.qname {
            Some(name) if name.trim().is_empty() => {
                return Err(ConfigError::Validation(
                    "Fixed query name cannot be empty".to_string(),
                ));
            }
            Some(_) => {}
            None => {
                if generator.domain_min == 0 {
                    return Err(ConfigError::Validation(
                        "Minimum domain length must be at least 1".to_string(),
                    ));
                }
                if generator.domain_min > generator.domain_max {
                    return Err(ConfigError::Validation(format!(
                        "Minimum domain length {} exceeds maximum {}",
                        generator.domain_min, generator.domain_max
                    )));
                }
                if generator.domain_max > MAX_LABEL_LEN {
                    return Err(ConfigError::Validation(format!(
                        "Maximum domain length {} exceeds the DNS label limit of {}",
                        generator.domain_max, MAX_LABEL_LEN
                    )));
                }
            }
        }

        if let Some(qtype) = &generator.qtype {
            RecordType::from_str(qtype).map_err(ConfigError::Validation)?;
        }

        if self.target.address.trim().is_empty() {
            return Err(ConfigError::Validation(
                "Collector address cannot be empty".to_string(),
            ));
        }

        if self.target.transport == TransportKind::Tcp && self.target.port == 0 {
            return Err(ConfigError::Validation(
                "Collector port cannot be 0".to_string(),
            ));
        }

        if self.target.connect_timeout_secs == 0 || self.target.handshake_timeout_secs == 0 {
            return Err(ConfigError::Validation(
                "Timeouts must be greater than 0 seconds".to_string(),
            ));
        }

        Ok(())
    }

    pub fn collector_target(&self) -> CollectorTarget {
        match self.target.transport {
            TransportKind::Tcp => CollectorTarget::Tcp {
                host: self.target.address.as_str().into(),
                port: self.target.port,
            },
            TransportKind::Unix => CollectorTarget::Unix {
                path: self.target.address.as_str().into(),
            },
        }
    }

    /// Validate and resolve into the immutable parameters the driver runs on.
    pub fn to_load_config(&self) -> Result<LoadConfig, ConfigError> {
        self.validate()?;

        let generator = &self.generator;
        let record_type = generator
            .qtype
            .as_deref()
            .map(RecordType::from_str)
            .transpose()
            .map_err(ConfigError::Validation)?;

        let name = match &generator.qname {
            Some(name) => NameSource::Fixed(Arc::from(name.trim())),
            None => NameSource::Random {
                min_len: generator.domain_min,
                max_len: generator.domain_max,
            },
        };

        Ok(LoadConfig {
            target: self.collector_target(),
            connections: generator.connections,
            records_per_connection: generator.count,
            template: QueryTemplate { name, record_type },
            skip_queries: generator.skip_queries,
            skip_replies: generator.skip_replies,
            policy: generator.on_error,
            identity: Arc::from(generator.identity.as_str()),
            version: Arc::from(DEFAULT_VERSION),
            seed: generator.seed.unwrap_or_else(time_seed),
            connect_timeout: Duration::from_secs(self.target.connect_timeout_secs),
            handshake_timeout: Duration::from_secs(self.target.handshake_timeout_secs),
        })
    }
}

fn time_seed() -> u64 {
    let now = chrono::Utc::now();
    now.timestamp_nanos_opt()
        .map(|n| n as u64)
        .unwrap_or_else(|| now.timestamp() as u64)
}

/// Command-line overrides for configuration
#[derive(Debug, Default)]
pub struct CliOverrides {
    pub transport: Option<TransportKind>,
    pub address: Option<String>,
    pub port: Option<u16>,
    pub handshake_timeout_secs: Option<u64>,
    pub count: Option<u64>,
    pub connections: Option<usize>,
    pub domain_min: Option<usize>,
    pub domain_max: Option<usize>,
    pub qname: Option<String>,
    pub qtype: Option<String>,
    pub skip_queries: bool,
    pub skip_replies: bool,
    pub seed: Option<u64>,
    pub on_error: Option<FailurePolicy>,
    pub log_level: Option<String>,
}
