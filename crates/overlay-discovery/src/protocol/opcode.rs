use std::fmt;

use crate::domain::DiscoveryError;

/// Discovery sub-protocol steps.
///
/// The numeric values are part of the wire format and must never change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u32)]
pub enum Opcode {
    /// Liveness probe.
    Ping = 1,
    /// Liveness acknowledgment.
    Pong = 2,
    /// Ask a peer for the nodes it knows nearest to a target.
    LookupRequest = 3,
    /// Nearest-first list of nodes answering a `LookupRequest`.
    LookupResponse = 4,
}

impl Opcode {
    pub fn as_u32(self) -> u32 {
        self as u32
    }
}

impl From<Opcode> for u32 {
    fn from(opcode: Opcode) -> Self {
        opcode as u32
    }
}

impl TryFrom<u32> for Opcode {
    type Error = DiscoveryError;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Self::Ping),
            2 => Ok(Self::Pong),
            3 => Ok(Self::LookupRequest),
            4 => Ok(Self::LookupResponse),
            other => Err(DiscoveryError::UnknownOpcode(other)),
        }
    }
}

impl fmt::Display for Opcode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ping => write!(f, "PING"),
            Self::Pong => write!(f, "PONG"),
            Self::LookupRequest => write!(f, "LOOKUP_REQUEST"),
            Self::LookupResponse => write!(f, "LOOKUP_RESPONSE"),
        }
    }
}
