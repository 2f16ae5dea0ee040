use crate::target::TransportKind;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TargetConfig {
    #[serde(default)]
    pub transport: TransportKind,

    /// Collector host for tcp, socket path for unix.
    #[serde(default = "default_address")]
    pub address: String,

    #[serde(default = "default_port")]
    pub port: u16,

    #[serde(default = "default_timeout_secs")]
    pub connect_timeout_secs: u64,

    #[serde(default = "default_timeout_secs")]
    pub handshake_timeout_secs: u64,
}

impl Default for TargetConfig {
    fn default() -> Self {
        Self {
            transport: TransportKind::Tcp,
            address: default_address(),
            port: default_port(),
            connect_timeout_secs: default_timeout_secs(),
            handshake_timeout_secs: default_timeout_secs(),
        }
    }
}

fn default_address() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    6000
}

fn default_timeout_secs() -> u64 {
    5
}
