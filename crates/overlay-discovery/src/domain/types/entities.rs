//! Core Domain Entities for Peer Discovery

use std::fmt;
use std::hash::{Hash, Hasher};

/// Length of a node identity in bytes.
pub const NODE_ID_LEN: usize = 32;

/// 256-bit node identifier.
///
/// The identity half of a [`PeerId`]. All distance computations and all
/// equality checks between peers operate on these bytes.
///
/// # Security
///
/// Equality is constant-time so that identities cannot be recovered
/// byte-by-byte from comparison timing.
// The manual PartialEq is constant-time; hashing the raw bytes stays
// consistent with it because equal ids have equal bytes.
#[allow(clippy::derived_hash_with_manual_eq)]
#[derive(Clone, Copy, Hash)]
pub struct NodeId(pub [u8; NODE_ID_LEN]);

impl PartialEq for NodeId {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        let mut result = 0u8;
        for (a, b) in self.0.iter().zip(other.0.iter()) {
            result |= a ^ b;
        }
        result == 0
    }
}

impl Eq for NodeId {}

impl PartialOrd for NodeId {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for NodeId {
    /// Lexicographic byte order, used to break distance ties.
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.0.cmp(&other.0)
    }
}

impl NodeId {
    /// Create a NodeId from raw 32-byte array.
    pub fn new(bytes: [u8; NODE_ID_LEN]) -> Self {
        Self(bytes)
    }

    /// Build a NodeId from a byte slice, failing unless it is exactly 32 bytes.
    pub fn from_slice(bytes: &[u8]) -> Option<Self> {
        <[u8; NODE_ID_LEN]>::try_from(bytes).ok().map(Self)
    }

    /// Get the underlying bytes for XOR distance calculation.
    pub fn as_bytes(&self) -> &[u8; NODE_ID_LEN] {
        &self.0
    }

    pub fn zero() -> Self {
        Self([0u8; NODE_ID_LEN])
    }

    /// Lowercase hex rendering, used in logs and config files.
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    /// Parse a 64-character hex string.
    pub fn from_hex(s: &str) -> Option<Self> {
        hex::decode(s).ok().and_then(|bytes| Self::from_slice(&bytes))
    }
}

impl fmt::Debug for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // First 8 bytes are enough to tell peers apart in logs
        write!(f, "NodeId({}..)", &self.to_hex()[..16])
    }
}

impl AsRef<[u8]> for NodeId {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

/// Peer identity: a network address paired with identity bytes.
///
/// Two `PeerId`s are equal when their identities are equal, regardless of
/// address. The address is only used to reach the peer through the
/// transport and to resolve inbound envelopes.
#[derive(Debug, Clone)]
pub struct PeerId {
    /// Transport address (e.g. `"127.0.0.1:3000"`).
    pub address: String,
    /// Identity bytes.
    pub id: NodeId,
}

impl PeerId {
    pub fn new(address: impl Into<String>, id: NodeId) -> Self {
        Self {
            address: address.into(),
            id,
        }
    }
}

impl PartialEq for PeerId {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for PeerId {}

impl Hash for PeerId {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Display for PeerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{}", self.address, &self.id.to_hex()[..16])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_node_id_equality() {
        let id1 = NodeId::new([1u8; 32]);
        let id2 = NodeId::new([1u8; 32]);
        let id3 = NodeId::new([2u8; 32]);

        assert_eq!(id1, id2);
        assert_ne!(id1, id3);
    }

    #[test]
    fn test_peer_id_equality_ignores_address() {
        let a = PeerId::new("10.0.0.1:3000", NodeId::new([7u8; 32]));
        let b = PeerId::new("10.0.0.2:4000", NodeId::new([7u8; 32]));
        let c = PeerId::new("10.0.0.1:3000", NodeId::new([8u8; 32]));

        assert_eq!(a, b);
        assert_ne!(a, c);

        let set: HashSet<PeerId> = [a, b, c].into_iter().collect();
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn test_node_id_hex_round_trip() {
        let mut bytes = [0u8; 32];
        bytes[0] = 0xAB;
        bytes[31] = 0x01;
        let id = NodeId::new(bytes);

        let hex = id.to_hex();
        assert_eq!(hex.len(), 64);
        assert!(hex.starts_with("ab"));
        assert_eq!(NodeId::from_hex(&hex), Some(id));
        assert_eq!(NodeId::from_hex(&hex.to_uppercase()), Some(id));
    }

    #[test]
    fn test_node_id_rejects_bad_input() {
        assert!(NodeId::from_hex("abcd").is_none());
        assert!(NodeId::from_hex(&"zz".repeat(32)).is_none());
        assert!(NodeId::from_hex(&"ab".repeat(33)).is_none());
        assert!(NodeId::from_hex(&"a".repeat(63)).is_none());
        assert!(NodeId::from_slice(&[0u8; 31]).is_none());
        assert!(NodeId::from_slice(&[0u8; 33]).is_none());
        assert_eq!(NodeId::from_slice(&[0u8; 32]), Some(NodeId::zero()));
    }
}
