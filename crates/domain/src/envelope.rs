use crate::role::MessageKind;
use crate::socket::{SocketFamily, SocketProtocol};
use chrono::{DateTime, Utc};
use std::net::IpAddr;
use std::sync::Arc;

pub const DEFAULT_IDENTITY: &str = "dnstap-generator";
pub const DEFAULT_VERSION: &str = "-";

pub const RESPONSE_PORT: u16 = 53;
pub const QUERY_PORT_MIN: u16 = 10000;
pub const QUERY_PORT_MAX: u16 = 60000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Timestamp {
    pub secs: u64,
    pub nanos: u32,
}

impl Timestamp {
    pub fn now() -> Self {
        Self::from(Utc::now())
    }
}

impl From<DateTime<Utc>> for Timestamp {
    fn from(dt: DateTime<Utc>) -> Self {
        Self {
            secs: dt.timestamp().max(0) as u64,
            nanos: dt.timestamp_subsec_nanos(),
        }
    }
}

/// Connection metadata shared by both sides of one exchange.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SocketMetadata {
    pub family: SocketFamily,
    pub protocol: SocketProtocol,
    pub query_address: IpAddr,
    pub query_port: u16,
    pub response_address: IpAddr,
    pub response_port: u16,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Envelope {
    pub identity: Arc<str>,
    pub version: Arc<str>,
    pub kind: MessageKind,
    pub socket: SocketMetadata,
    pub timestamp: Timestamp,
    /// DNS wire bytes: the question on the query side, the answer on the
    /// response side.
    pub payload: Vec<u8>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnvelopePair {
    pub query: Envelope,
    pub response: Envelope,
}

impl EnvelopePair {
    pub fn is_correlated(&self) -> bool {
        self.query.kind.is_query()
            && self.query.kind.pairs_with(&self.response.kind)
            && self.query.identity == self.response.identity
            && self.query.version == self.response.version
            && self.query.socket == self.response.socket
            && self.response.timestamp >= self.query.timestamp
    }
}
