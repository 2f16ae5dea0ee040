use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResponseCode {
    NoError,
    ServFail,
    NxDomain,
    Refused,
}

impl ResponseCode {
    pub const ALL: [ResponseCode; 4] = [
        ResponseCode::NoError,
        ResponseCode::ServFail,
        ResponseCode::NxDomain,
        ResponseCode::Refused,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ResponseCode::NoError => "NOERROR",
            ResponseCode::ServFail => "SERVFAIL",
            ResponseCode::NxDomain => "NXDOMAIN",
            ResponseCode::Refused => "REFUSED",
        }
    }

    /// RCODE value as carried in the low four bits of the header flags.
    pub fn to_u8(&self) -> u8 {
        match self {
            ResponseCode::NoError => 0,
            ResponseCode::ServFail => 2,
            ResponseCode::NxDomain => 3,
            ResponseCode::Refused => 5,
        }
    }
}

impl fmt::Display for ResponseCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
