use std::fmt;
use std::str::FromStr;

/// Record types the generator knows how to synthesize an answer for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RecordType {
    A,
    AAAA,
    TXT,
    CNAME,
}

impl RecordType {
    pub const ALL: [RecordType; 4] = [
        RecordType::A,
        RecordType::AAAA,
        RecordType::TXT,
        RecordType::CNAME,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            RecordType::A => "A",
            RecordType::AAAA => "AAAA",
            RecordType::TXT => "TXT",
            RecordType::CNAME => "CNAME",
        }
    }

    /// Rdata placed in the synthesized answer record, in presentation format.
    pub fn canned_value(&self) -> &'static str {
        match self {
            RecordType::A => "127.0.0.1",
            RecordType::AAAA => "::1",
            RecordType::TXT => "dnstapgenerator",
            RecordType::CNAME => "generator.dnstap.",
        }
    }
}

impl fmt::Display for RecordType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for RecordType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "A" => Ok(RecordType::A),
            "AAAA" => Ok(RecordType::AAAA),
            "TXT" => Ok(RecordType::TXT),
            "CNAME" => Ok(RecordType::CNAME),
            _ => Err(format!(
                "Unsupported record type '{}' (expected one of A, AAAA, TXT, CNAME)",
                s
            )),
        }
    }
}
