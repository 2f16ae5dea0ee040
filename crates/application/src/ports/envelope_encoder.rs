use dnstap_gen_domain::{Envelope, GeneratorError};

/// Serializes one telemetry envelope into a frame payload.
pub trait EnvelopeEncoder: Send + Sync {
    fn encode(&self, envelope: &Envelope) -> Result<Vec<u8>, GeneratorError>;
}
