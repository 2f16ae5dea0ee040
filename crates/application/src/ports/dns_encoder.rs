use dnstap_gen_domain::{DnsQuery, GeneratorError, ResponseCode};

/// Serializes DNS messages to wire format.
pub trait DnsMessageEncoder: Send + Sync {
    fn encode_question(&self, id: u16, query: &DnsQuery) -> Result<Vec<u8>, GeneratorError>;

    /// Response carrying `query` as its question plus one answer record
    /// whose rdata is `value` in presentation format.
    fn encode_answer(
        &self,
        id: u16,
        query: &DnsQuery,
        value: &str,
        rcode: ResponseCode,
    ) -> Result<Vec<u8>, GeneratorError>;
}
