use super::CorpusGenerator;
use dnstap_gen_domain::envelope::RESPONSE_PORT;
use dnstap_gen_domain::{Envelope, EnvelopePair, MessageKind, SocketMetadata, Timestamp};
use std::sync::Arc;

/// Wraps a question/answer pair into correlated query and response envelopes.
#[derive(Debug, Clone)]
pub struct EnvelopeBuilder {
    identity: Arc<str>,
    version: Arc<str>,
}

impl EnvelopeBuilder {
    pub fn new(identity: impl Into<Arc<str>>, version: impl Into<Arc<str>>) -> Self {
        Self {
            identity: identity.into(),
            version: version.into(),
        }
    }

    pub fn build(
        &self,
        corpus: &mut CorpusGenerator,
        question: Vec<u8>,
        answer: Vec<u8>,
    ) -> EnvelopePair {
        let role = corpus.role();
        let family = corpus.socket_family();
        let socket = SocketMetadata {
            family,
            protocol: corpus.socket_protocol(),
            query_address: corpus.synthetic_address(family),
            query_port: corpus.query_port(),
            response_address: corpus.synthetic_address(family),
            response_port: RESPONSE_PORT,
        };

        let query = Envelope {
            identity: Arc::clone(&self.identity),
            version: Arc::clone(&self.version),
            kind: MessageKind::query(role),
            socket,
            timestamp: Timestamp::now(),
            payload: question,
        };

        // wall clock may step backwards; the response never predates its query
        let response_ts = Timestamp::now().max(query.timestamp);
        let response = Envelope {
            identity: Arc::clone(&self.identity),
            version: Arc::clone(&self.version),
            kind: MessageKind::response(role),
            socket,
            timestamp: response_ts,
            payload: answer,
        };

        EnvelopePair { query, response }
    }
}
