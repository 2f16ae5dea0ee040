use dnstap_gen_domain::envelope::{QUERY_PORT_MAX, QUERY_PORT_MIN};
use dnstap_gen_domain::{RecordType, ResponseCode, Role, SocketFamily, SocketProtocol, TLDS};
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};

/// The 62 symbols random labels are drawn from.
pub const ALPHANUMERIC: &[u8; 62] =
    b"abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

/// Random draws over the static corpus tables.
///
/// Each connection worker owns its own generator, seeded from the run's
/// master seed, so no generator is ever shared between tasks.
pub struct CorpusGenerator {
    rng: fastrand::Rng,
}

impl CorpusGenerator {
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: fastrand::Rng::with_seed(seed),
        }
    }

    /// Uniform integer in `[min, max]`. Panics if `min > max`.
    pub fn random_int(&mut self, min: i64, max: i64) -> i64 {
        assert!(min <= max, "random_int: empty range {}..={}", min, max);
        self.rng.i64(min..=max)
    }

    /// Alphanumeric string with a length drawn uniformly from `[min_len, max_len]`.
    pub fn random_string(&mut self, min_len: usize, max_len: usize) -> String {
        assert!(
            min_len <= max_len,
            "random_string: empty range {}..={}",
            min_len,
            max_len
        );
        let len = self.rng.usize(min_len..=max_len);
        (0..len)
            .map(|_| ALPHANUMERIC[self.rng.usize(..ALPHANUMERIC.len())] as char)
            .collect()
    }

    fn pick<T: Copy>(&mut self, items: &[T]) -> T {
        items[self.rng.usize(..items.len())]
    }

    pub fn tld(&mut self) -> &'static str {
        self.pick(&TLDS)
    }

    pub fn record_type(&mut self) -> RecordType {
        self.pick(&RecordType::ALL)
    }

    pub fn response_code(&mut self) -> ResponseCode {
        self.pick(&ResponseCode::ALL)
    }

    pub fn role(&mut self) -> Role {
        self.pick(&Role::ALL)
    }

    pub fn socket_family(&mut self) -> SocketFamily {
        self.pick(&SocketFamily::ALL)
    }

    pub fn socket_protocol(&mut self) -> SocketProtocol {
        self.pick(&SocketProtocol::ALL)
    }

    /// `127.0.x.y` for INET, `2001:db8:x::y` for INET6, with x and y in 1..=250.
    pub fn synthetic_address(&mut self, family: SocketFamily) -> IpAddr {
        let x = self.rng.u8(1..=250);
        let y = self.rng.u8(1..=250);
        match family {
            SocketFamily::Inet => IpAddr::V4(Ipv4Addr::new(127, 0, x, y)),
            SocketFamily::Inet6 => IpAddr::V6(Ipv6Addr::new(
                0x2001,
                0x0db8,
                u16::from(x),
                0,
                0,
                0,
                0,
                u16::from(y),
            )),
        }
    }

    pub fn query_port(&mut self) -> u16 {
        self.rng.u16(QUERY_PORT_MIN..=QUERY_PORT_MAX)
    }

    pub fn message_id(&mut self) -> u16 {
        self.rng.u16(..)
    }

    /// Seed for a child generator; successive calls yield distinct seeds.
    pub fn child_seed(&mut self) -> u64 {
        self.rng.u64(..)
    }
}
