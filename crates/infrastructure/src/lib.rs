//! Adapters for the dnstap generator ports: hickory-proto DNS encoding,
//! the dnstap protobuf schema and Frame Streams sessions over TCP and
//! Unix sockets.
pub mod dns;
pub mod dnstap;
pub mod framestream;
