//! Thread-safe routing table.

use parking_lot::RwLock;
use tracing::debug;

use crate::domain::{KBucket, NodeId, PeerId, RoutingTable};
use crate::ports::RoutingTableStore;

/// `RoutingTable` behind a `parking_lot::RwLock`.
///
/// Every port method takes the lock once, so each call is atomic. Locks are
/// never held across an await point.
#[derive(Debug)]
pub struct SharedRoutingTable {
    inner: RwLock<RoutingTable>,
}

impl SharedRoutingTable {
    /// Create an empty table for `local` with bucket capacity `k`.
    pub fn new(local: PeerId, k: usize) -> Self {
        Self::from_table(RoutingTable::new(local, k))
    }

    pub fn from_table(table: RoutingTable) -> Self {
        Self {
            inner: RwLock::new(table),
        }
    }

    /// Copy of one bucket, for inspection.
    pub fn bucket(&self, index: usize) -> Option<KBucket> {
        self.inner.read().get_bucket(index).cloned()
    }
}

impl RoutingTableStore for SharedRoutingTable {
    fn self_id(&self) -> PeerId {
        self.inner.read().self_id().clone()
    }

    fn upsert(&self, peer: PeerId) {
        let evicted = self.inner.write().upsert(peer);
        if let Some(evicted) = evicted {
            debug!(peer = %evicted, "Evicted least recently seen peer");
        }
    }

    fn register_address(&self, peer: PeerId) {
        self.inner.write().register_address(peer);
    }

    fn lookup_remote_address(&self, address: &str) -> Option<PeerId> {
        self.inner.read().lookup_remote_address(address)
    }

    fn find_closest_peers(&self, target: &NodeId, count: usize) -> Vec<PeerId> {
        self.inner.read().find_closest_peers(target, count)
    }

    fn peer_exists(&self, peer: &PeerId) -> bool {
        self.inner.read().peer_exists(peer)
    }

    fn remove_peer(&self, peer: &PeerId) -> bool {
        self.inner.write().remove_peer(peer)
    }

    fn peer_addresses(&self) -> Vec<String> {
        self.inner.read().peer_addresses()
    }

    fn peer_count(&self) -> usize {
        self.inner.read().peer_count()
    }
}
