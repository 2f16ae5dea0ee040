//! Mapping between the generator's closed corpus enums and their
//! `hickory_proto` counterparts.

use dnstap_gen_domain::{RecordType, ResponseCode};
use hickory_proto::op::ResponseCode as HickoryResponseCode;
use hickory_proto::rr::RecordType as HickoryRecordType;

pub struct RecordTypeMapper;

impl RecordTypeMapper {
    pub fn to_hickory(record_type: RecordType) -> HickoryRecordType {
        match record_type {
            RecordType::A => HickoryRecordType::A,
            RecordType::AAAA => HickoryRecordType::AAAA,
            RecordType::TXT => HickoryRecordType::TXT,
            RecordType::CNAME => HickoryRecordType::CNAME,
        }
    }

    pub fn rcode_to_hickory(rcode: ResponseCode) -> HickoryResponseCode {
        match rcode {
            ResponseCode::NoError => HickoryResponseCode::NoError,
            ResponseCode::ServFail => HickoryResponseCode::ServFail,
            ResponseCode::NxDomain => HickoryResponseCode::NXDomain,
            ResponseCode::Refused => HickoryResponseCode::Refused,
        }
    }
}
