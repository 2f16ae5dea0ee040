use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SocketFamily {
    Inet,
    Inet6,
}

impl SocketFamily {
    pub const ALL: [SocketFamily; 2] = [SocketFamily::Inet, SocketFamily::Inet6];

    pub fn as_str(&self) -> &'static str {
        match self {
            SocketFamily::Inet => "INET",
            SocketFamily::Inet6 => "INET6",
        }
    }
}

impl fmt::Display for SocketFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Transport the observed DNS exchange claims to have used. Unrelated to
/// the transport carrying the frames to the collector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SocketProtocol {
    Udp,
    Tcp,
    Doh,
    Dot,
}

impl SocketProtocol {
    pub const ALL: [SocketProtocol; 4] = [
        SocketProtocol::Udp,
        SocketProtocol::Tcp,
        SocketProtocol::Doh,
        SocketProtocol::Dot,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SocketProtocol::Udp => "UDP",
            SocketProtocol::Tcp => "TCP",
            SocketProtocol::Doh => "DOH",
            SocketProtocol::Dot => "DOT",
        }
    }
}

impl fmt::Display for SocketProtocol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
