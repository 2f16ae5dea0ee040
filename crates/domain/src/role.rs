use std::fmt;

/// Vantage point that observed an exchange. A query envelope and its
/// response envelope always carry the same role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    Client,
    Forwarder,
    Resolver,
    Auth,
}

impl Role {
    pub const ALL: [Role; 4] = [Role::Client, Role::Forwarder, Role::Resolver, Role::Auth];

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Client => "CLIENT",
            Role::Forwarder => "FORWARDER",
            Role::Resolver => "RESOLVER",
            Role::Auth => "AUTH",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Query,
    Response,
}

/// Role plus direction, e.g. `FORWARDER_QUERY`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MessageKind {
    pub role: Role,
    pub direction: Direction,
}

impl MessageKind {
    pub fn query(role: Role) -> Self {
        Self {
            role,
            direction: Direction::Query,
        }
    }

    pub fn response(role: Role) -> Self {
        Self {
            role,
            direction: Direction::Response,
        }
    }

    pub fn is_query(&self) -> bool {
        self.direction == Direction::Query
    }

    /// True when `other` is the opposite side of the same exchange.
    pub fn pairs_with(&self, other: &MessageKind) -> bool {
        self.role == other.role && self.direction != other.direction
    }
}

impl fmt::Display for MessageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let direction = match self.direction {
            Direction::Query => "QUERY",
            Direction::Response => "RESPONSE",
        };
        write!(f, "{}_{}", self.role, direction)
    }
}
