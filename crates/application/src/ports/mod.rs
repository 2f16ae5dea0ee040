mod dns_encoder;
mod envelope_encoder;
mod frame_session;

pub use dns_encoder::DnsMessageEncoder;
pub use envelope_encoder::EnvelopeEncoder;
pub use frame_session::{FrameSession, SessionConnector, SessionState};
