//! DNS Message Builder
//!
//! Constructs the synthetic question and answer messages in wire format
//! using `hickory-proto`.

use super::record_type_map::RecordTypeMapper;
use dnstap_gen_application::ports::DnsMessageEncoder;
use dnstap_gen_domain::{DnsQuery, GeneratorError, RecordType, ResponseCode, ANSWER_TTL};
use hickory_proto::op::{Message, MessageType, OpCode, Query};
use hickory_proto::rr::rdata::{A, AAAA, CNAME, TXT};
use hickory_proto::rr::{DNSClass, Name, RData, Record};
use hickory_proto::serialize::binary::{BinEncodable, BinEncoder};
use std::net::{Ipv4Addr, Ipv6Addr};
use std::str::FromStr;

/// Builds DNS messages in wire format
pub struct MessageBuilder;

impl MessageBuilder {
    /// Build a standard recursive query with a single question.
    pub fn build_query(
        id: u16,
        domain: &str,
        record_type: RecordType,
    ) -> Result<Vec<u8>, GeneratorError> {
        let query = Self::question(domain, record_type)?;

        let mut message = Message::new(id, MessageType::Query, OpCode::Query);
        message.set_recursion_desired(true);
        message.add_query(query);

        Self::serialize_message(&message)
    }

    /// Build the response to [`build_query`](Self::build_query): same id and
    /// question, one answer record carrying `value`, and `rcode`.
    pub fn build_answer(
        id: u16,
        domain: &str,
        record_type: RecordType,
        value: &str,
        rcode: ResponseCode,
    ) -> Result<Vec<u8>, GeneratorError> {
        let query = Self::question(domain, record_type)?;
        let rdata = Self::rdata(record_type, value)?;
        let answer = Record::from_rdata(query.name().clone(), ANSWER_TTL, rdata);

        let mut message = Message::new(id, MessageType::Response, OpCode::Query);
        message.set_recursion_desired(true);
        message.set_recursion_available(true);
        message.set_response_code(RecordTypeMapper::rcode_to_hickory(rcode));
        message.add_query(query);
        message.add_answer(answer);

        Self::serialize_message(&message)
    }

    fn question(domain: &str, record_type: RecordType) -> Result<Query, GeneratorError> {
        let name = Name::from_str(domain).map_err(|e| {
            GeneratorError::Encoding(format!("Invalid domain '{}': {}", domain, e))
        })?;

        let mut query = Query::new();
        query.set_name(name);
        query.set_query_type(RecordTypeMapper::to_hickory(record_type));
        query.set_query_class(DNSClass::IN);
        Ok(query)
    }

    fn rdata(record_type: RecordType, value: &str) -> Result<RData, GeneratorError> {
        let invalid = |e: &dyn std::fmt::Display| {
            GeneratorError::Encoding(format!(
                "Invalid {} value '{}': {}",
                record_type, value, e
            ))
        };

        let rdata = match record_type {
            RecordType::A => RData::A(A(Ipv4Addr::from_str(value).map_err(|e| invalid(&e))?)),
            RecordType::AAAA => {
                RData::AAAA(AAAA(Ipv6Addr::from_str(value).map_err(|e| invalid(&e))?))
            }
            RecordType::TXT => RData::TXT(TXT::new(vec![value.to_string()])),
            RecordType::CNAME => {
                RData::CNAME(CNAME(Name::from_str(value).map_err(|e| invalid(&e))?))
            }
        };
        Ok(rdata)
    }

    fn serialize_message(message: &Message) -> Result<Vec<u8>, GeneratorError> {
        let mut buf = Vec::with_capacity(512);
        let mut encoder = BinEncoder::new(&mut buf);

        message.emit(&mut encoder).map_err(|e| {
            GeneratorError::Encoding(format!("Failed to serialize DNS message: {}", e))
        })?;

        Ok(buf)
    }
}

/// [`DnsMessageEncoder`] backed by `hickory-proto`.
#[derive(Debug, Default, Clone, Copy)]
pub struct HickoryDnsEncoder;

impl DnsMessageEncoder for HickoryDnsEncoder {
    fn encode_question(&self, id: u16, query: &DnsQuery) -> Result<Vec<u8>, GeneratorError> {
        MessageBuilder::build_query(id, &query.domain, query.record_type)
    }

    fn encode_answer(
        &self,
        id: u16,
        query: &DnsQuery,
        value: &str,
        rcode: ResponseCode,
    ) -> Result<Vec<u8>, GeneratorError> {
        MessageBuilder::build_answer(id, &query.domain, query.record_type, value, rcode)
    }
}
