use crate::dns_record::RecordType;
use crate::target::CollectorTarget;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

/// What the driver does when one connection fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum FailurePolicy {
    /// First failure cancels every sibling connection.
    #[default]
    FailFast,
    /// A failing connection stops alone; the rest run to completion.
    Isolate,
}

impl FailurePolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            FailurePolicy::FailFast => "fail-fast",
            FailurePolicy::Isolate => "isolate",
        }
    }
}

impl fmt::Display for FailurePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FailurePolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "fail-fast" | "failfast" => Ok(FailurePolicy::FailFast),
            "isolate" => Ok(FailurePolicy::Isolate),
            _ => Err(format!(
                "Unknown failure policy '{}' (expected 'fail-fast' or 'isolate')",
                s
            )),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NameSource {
    /// `<label>.<tld>.` with a label length drawn from the inclusive range.
    Random { min_len: usize, max_len: usize },
    /// Used verbatim for every question.
    Fixed(Arc<str>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryTemplate {
    pub name: NameSource,
    /// `None` draws a random supported type per record.
    pub record_type: Option<RecordType>,
}

impl QueryTemplate {
    pub fn random(min_len: usize, max_len: usize) -> Self {
        Self {
            name: NameSource::Random { min_len, max_len },
            record_type: None,
        }
    }

    pub fn fixed(name: impl Into<Arc<str>>, record_type: RecordType) -> Self {
        Self {
            name: NameSource::Fixed(name.into()),
            record_type: Some(record_type),
        }
    }
}

/// Fully resolved, read-only run parameters shared by every worker.
#[derive(Debug, Clone)]
pub struct LoadConfig {
    pub target: CollectorTarget,
    pub connections: usize,
    pub records_per_connection: u64,
    pub template: QueryTemplate,
    pub skip_queries: bool,
    pub skip_replies: bool,
    pub policy: FailurePolicy,
    pub identity: Arc<str>,
    pub version: Arc<str>,
    pub seed: u64,
    pub connect_timeout: Duration,
    pub handshake_timeout: Duration,
}

impl LoadConfig {
    /// Frames a single connection writes when it runs to completion.
    pub fn frames_per_connection(&self) -> u64 {
        let per_record = u64::from(!self.skip_queries) + u64::from(!self.skip_replies);
        self.records_per_connection * per_record
    }
}
