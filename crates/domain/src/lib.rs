//! dnstap generator domain layer
pub mod config;
pub mod dns_query;
pub mod dns_record;
pub mod envelope;
pub mod errors;
pub mod load_config;
pub mod report;
pub mod role;
pub mod socket;
pub mod target;

pub use config::{CliOverrides, Config, ConfigError};
pub use dns_query::{DnsExchange, DnsQuery};
pub use dns_record::{RecordType, ResponseCode, ANSWER_TTL, TLDS};
pub use envelope::{Envelope, EnvelopePair, SocketMetadata, Timestamp};
pub use errors::{GeneratorError, WorkerFailure, WorkerPhase};
pub use load_config::{FailurePolicy, LoadConfig, NameSource, QueryTemplate};
pub use report::{throughput, ConnectionReport, RunReport};
pub use role::{Direction, MessageKind, Role};
pub use socket::{SocketFamily, SocketProtocol};
pub use target::{CollectorTarget, TransportKind};
