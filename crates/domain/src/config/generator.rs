use crate::envelope::DEFAULT_IDENTITY;
use crate::load_config::FailurePolicy;
use serde::{Deserialize, Serialize};

/// Longest label a DNS name may carry.
pub const MAX_LABEL_LEN: usize = 63;

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GeneratorConfig {
    /// Records (query + response pairs) per connection
    #[serde(default = "default_one")]
    pub count: u64,

    #[serde(default = "default_connections")]
    pub connections: usize,

    #[serde(default = "default_domain_min")]
    pub domain_min: usize,

    #[serde(default = "default_domain_max")]
    pub domain_max: usize,

    #[serde(default)]
    pub qname: Option<String>,

    #[serde(default)]
    pub qtype: Option<String>,

    #[serde(default)]
    pub skip_queries: bool,

    #[serde(default)]
    pub skip_replies: bool,

    /// Master seed; unset means time-based
    #[serde(default)]
    pub seed: Option<u64>,

    #[serde(default = "default_identity")]
    pub identity: String,

    #[serde(default)]
    pub on_error: FailurePolicy,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            count: default_one(),
            connections: default_connections(),
            domain_min: default_domain_min(),
            domain_max: default_domain_max(),
            qname: None,
            qtype: None,
            skip_queries: false,
            skip_replies: false,
            seed: None,
            identity: default_identity(),
            on_error: FailurePolicy::FailFast,
        }
    }
}

fn default_one() -> u64 {
    1
}

fn default_connections() -> usize {
    1
}

fn default_domain_min() -> usize {
    10
}

fn default_domain_max() -> usize {
    60
}

fn default_identity() -> String {
    DEFAULT_IDENTITY.to_string()
}
