use super::schema::{self, Dnstap, DnstapType};
use dnstap_gen_application::ports::EnvelopeEncoder;
use dnstap_gen_domain::{
    Direction, Envelope, GeneratorError, MessageKind, Role, SocketFamily, SocketProtocol,
};
use prost::Message as _;
use std::net::IpAddr;

/// Frame Streams content type announced for dnstap payloads.
pub const CONTENT_TYPE: &str = "protobuf:dnstap.Dnstap";

/// Maps envelopes onto the dnstap protobuf schema.
#[derive(Debug, Default, Clone, Copy)]
pub struct DnstapEncoder;

impl DnstapEncoder {
    pub fn to_record(envelope: &Envelope) -> Dnstap {
        let socket = &envelope.socket;
        let mut message = schema::Message {
            r#type: message_type(envelope.kind) as i32,
            socket_family: Some(socket_family(socket.family) as i32),
            socket_protocol: Some(socket_protocol(socket.protocol) as i32),
            query_address: Some(address_bytes(socket.query_address)),
            response_address: Some(address_bytes(socket.response_address)),
            query_port: Some(u32::from(socket.query_port)),
            response_port: Some(u32::from(socket.response_port)),
            ..Default::default()
        };

        let ts = envelope.timestamp;
        match envelope.kind.direction {
            Direction::Query => {
                message.query_time_sec = Some(ts.secs);
                message.query_time_nsec = Some(ts.nanos);
                message.query_message = Some(envelope.payload.clone());
            }
            Direction::Response => {
                message.response_time_sec = Some(ts.secs);
                message.response_time_nsec = Some(ts.nanos);
                message.response_message = Some(envelope.payload.clone());
            }
        }

        Dnstap {
            identity: Some(envelope.identity.as_bytes().to_vec()),
            version: Some(envelope.version.as_bytes().to_vec()),
            extra: None,
            message: Some(message),
            r#type: DnstapType::Message as i32,
        }
    }

    pub fn decode(payload: &[u8]) -> Result<Dnstap, GeneratorError> {
        Dnstap::decode(payload)
            .map_err(|e| GeneratorError::Encoding(format!("Invalid dnstap payload: {}", e)))
    }
}

impl EnvelopeEncoder for DnstapEncoder {
    fn encode(&self, envelope: &Envelope) -> Result<Vec<u8>, GeneratorError> {
        Ok(Self::to_record(envelope).encode_to_vec())
    }
}

fn message_type(kind: MessageKind) -> schema::MessageType {
    use schema::MessageType as T;
    match (kind.role, kind.direction) {
        (Role::Auth, Direction::Query) => T::AuthQuery,
        (Role::Auth, Direction::Response) => T::AuthResponse,
        (Role::Resolver, Direction::Query) => T::ResolverQuery,
        (Role::Resolver, Direction::Response) => T::ResolverResponse,
        (Role::Client, Direction::Query) => T::ClientQuery,
        (Role::Client, Direction::Response) => T::ClientResponse,
        (Role::Forwarder, Direction::Query) => T::ForwarderQuery,
        (Role::Forwarder, Direction::Response) => T::ForwarderResponse,
    }
}

fn socket_family(family: SocketFamily) -> schema::SocketFamily {
    match family {
        SocketFamily::Inet => schema::SocketFamily::Inet,
        SocketFamily::Inet6 => schema::SocketFamily::Inet6,
    }
}

fn socket_protocol(protocol: SocketProtocol) -> schema::SocketProtocol {
    match protocol {
        SocketProtocol::Udp => schema::SocketProtocol::Udp,
        SocketProtocol::Tcp => schema::SocketProtocol::Tcp,
        SocketProtocol::Dot => schema::SocketProtocol::Dot,
        SocketProtocol::Doh => schema::SocketProtocol::Doh,
    }
}

fn address_bytes(addr: IpAddr) -> Vec<u8> {
    match addr {
        IpAddr::V4(v4) => v4.octets().to_vec(),
        IpAddr::V6(v6) => v6.octets().to_vec(),
    }
}
