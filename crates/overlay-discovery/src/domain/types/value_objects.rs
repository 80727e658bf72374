//! Value Objects for Peer Discovery

use super::entities::NODE_ID_LEN;
use crate::domain::routing_table::DEFAULT_BUCKET_SIZE;

/// XOR distance between two identities.
///
/// Stored big-endian, so the derived lexicographic `Ord` is the same as
/// comparing the distances as unsigned 256-bit integers. Smaller is closer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Distance(pub [u8; NODE_ID_LEN]);

impl Distance {
    pub fn new(bytes: [u8; NODE_ID_LEN]) -> Self {
        Self(bytes)
    }

    /// Distance from a node to itself.
    pub fn zero() -> Self {
        Self([0u8; NODE_ID_LEN])
    }

    /// Largest possible distance (used as sentinel value)
    pub fn max() -> Self {
        Self([0xFF; NODE_ID_LEN])
    }

    pub fn as_bytes(&self) -> &[u8; NODE_ID_LEN] {
        &self.0
    }

    /// Number of leading zero bits, i.e. the length of the shared prefix.
    pub fn leading_zeros(&self) -> u32 {
        let mut zeros = 0;
        for byte in &self.0 {
            if *byte == 0 {
                zeros += 8;
            } else {
                return zeros + byte.leading_zeros();
            }
        }
        zeros
    }
}

/// Configuration for the discovery service and its lookups.
///
/// The three `disable_*` toggles turn a message category into a no-op: no
/// reply is produced, but the sender is still refreshed in the routing table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiscoveryConfig {
    /// Bucket size, and the result count for lookups and lookup replies (default: 16)
    pub k: usize,
    /// Concurrency factor for lookup rounds (default: 8)
    pub alpha: usize,
    /// Ignore inbound Ping (liveness probe)
    pub disable_ping: bool,
    /// Ignore inbound Pong (liveness ack); no lookup is launched
    pub disable_pong: bool,
    /// Ignore inbound LookupRequest
    pub disable_lookup: bool,
}

impl Default for DiscoveryConfig {
    fn default() -> Self {
        Self {
            k: DEFAULT_BUCKET_SIZE,
            alpha: 8,
            disable_ping: false,
            disable_pong: false,
            disable_lookup: false,
        }
    }
}

impl DiscoveryConfig {
    /// Create a config suitable for testing (smaller values)
    pub fn for_testing() -> Self {
        Self {
            k: 4,
            alpha: 2,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_k(mut self, k: usize) -> Self {
        self.k = k;
        self
    }

    #[must_use]
    pub fn with_alpha(mut self, alpha: usize) -> Self {
        self.alpha = alpha;
        self
    }
}
