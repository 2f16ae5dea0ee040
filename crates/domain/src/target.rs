use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TransportKind {
    #[default]
    Tcp,
    Unix,
}

impl TransportKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransportKind::Tcp => "tcp",
            TransportKind::Unix => "unix",
        }
    }
}

impl fmt::Display for TransportKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TransportKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "tcp" => Ok(TransportKind::Tcp),
            "unix" => Ok(TransportKind::Unix),
            _ => Err(format!(
                "Unsupported transport '{}' (expected 'tcp' or 'unix')",
                s
            )),
        }
    }
}

/// Where the collector listens.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum CollectorTarget {
    Tcp { host: Arc<str>, port: u16 },
    Unix { path: Arc<str> },
}

impl fmt::Display for CollectorTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CollectorTarget::Tcp { host, port } if host.contains(':') => {
                write!(f, "tcp://[{}]:{}", host, port)
            }
            CollectorTarget::Tcp { host, port } => write!(f, "tcp://{}:{}", host, port),
            CollectorTarget::Unix { path } => write!(f, "unix://{}", path),
        }
    }
}
