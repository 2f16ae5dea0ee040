mod record_type;
mod response_code;

pub use record_type::RecordType;
pub use response_code::ResponseCode;

/// Top-level domains random names are drawn under.
pub const TLDS: [&str; 4] = ["com", "org", "fr", "eu"];

/// TTL stamped on every synthesized answer record.
pub const ANSWER_TTL: u32 = 3600;
