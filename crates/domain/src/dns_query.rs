use super::{RecordType, ResponseCode};
use std::sync::Arc;

#[derive(Debug, Clone)]
pub struct DnsQuery {
    pub domain: Arc<str>,
    pub record_type: RecordType,
}

impl DnsQuery {
    pub fn new(domain: impl Into<Arc<str>>, record_type: RecordType) -> Self {
        Self {
            domain: domain.into(),
            record_type,
        }
    }
}

/// One synthesized question/answer pair in DNS wire format.
#[derive(Debug, Clone)]
pub struct DnsExchange {
    pub query: DnsQuery,
    pub rcode: ResponseCode,
    pub question: Vec<u8>,
    pub answer: Vec<u8>,
}

impl DnsExchange {
    pub fn into_wire(self) -> (Vec<u8>, Vec<u8>) {
        (self.question, self.answer)
    }
}
