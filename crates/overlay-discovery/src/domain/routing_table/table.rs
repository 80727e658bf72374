//! Main RoutingTable implementation.

use std::collections::HashMap;

use crate::domain::{bucket_for_peer, compare_by_distance, NodeId, PeerId};

use super::bucket::KBucket;
use super::config::NUM_BUCKETS;

/// The main routing table implementing the Kademlia DHT.
///
/// # Invariants
/// - The local identity is never a bucket member.
/// - Each bucket holds at most `k` peers.
/// - Every bucket member has an entry in the address directory. The
///   directory may also hold the local identity and peers the transport has
///   announced but that have not yet exchanged a message.
///
/// All methods take the table by reference; callers that share a table
/// across tasks wrap it (see `adapters::SharedRoutingTable`).
#[derive(Debug)]
pub struct RoutingTable {
    /// Our own identity (immutable after creation)
    local: PeerId,
    /// 256 k-buckets, one for each possible shared-prefix length
    buckets: Vec<KBucket>,
    /// Address → identity, for resolving inbound envelopes
    addresses: HashMap<String, PeerId>,
    /// Per-bucket capacity
    k: usize,
}

impl RoutingTable {
    /// Create a routing table for `local` with bucket capacity `k`.
    pub fn new(local: PeerId, k: usize) -> Self {
        let buckets = (0..NUM_BUCKETS).map(|_| KBucket::new()).collect();
        let mut addresses = HashMap::new();
        addresses.insert(local.address.clone(), local.clone());

        Self {
            local,
            buckets,
            addresses,
            k: k.max(1),
        }
    }

    /// Get our local identity
    pub fn self_id(&self) -> &PeerId {
        &self.local
    }

    /// Get total peer count across all buckets
    pub fn peer_count(&self) -> usize {
        self.buckets.iter().map(|b| b.len()).sum()
    }

    /// Insert or refresh a peer.
    ///
    /// A known peer moves to the most recently seen position of its bucket.
    /// A new peer joining a full bucket evicts the least recently seen
    /// member, which is returned. Upserting the local identity is a no-op.
    pub fn upsert(&mut self, peer: PeerId) -> Option<PeerId> {
        if peer == self.local {
            return None;
        }

        let idx = bucket_for_peer(&self.local.id, &peer.id);
        let k = self.k;
        let bucket = &mut self.buckets[idx];

        if bucket.contains(&peer) {
            if let Some(previous) = bucket.refresh(peer.clone()) {
                if previous.address != peer.address {
                    self.addresses.remove(&previous.address);
                }
            }
            self.addresses.insert(peer.address.clone(), peer);
            return None;
        }

        let evicted = if bucket.is_full(k) {
            bucket.evict_oldest()
        } else {
            None
        };
        bucket.push(peer.clone());

        if let Some(ref old) = evicted {
            self.forget_address(old);
        }
        self.addresses.insert(peer.address.clone(), peer);

        evicted
    }

    /// Record a peer's address without making it a bucket member.
    ///
    /// Used when the transport completes a handshake so that the first
    /// message from that peer can be resolved.
    pub fn register_address(&mut self, peer: PeerId) {
        if peer == self.local {
            return;
        }
        self.addresses.insert(peer.address.clone(), peer);
    }

    /// Resolve an address to a known identity (including our own).
    pub fn lookup_remote_address(&self, address: &str) -> Option<PeerId> {
        self.addresses.get(address).cloned()
    }

    /// Check whether a peer is a bucket member.
    pub fn peer_exists(&self, peer: &PeerId) -> bool {
        if *peer == self.local {
            return false;
        }
        let idx = bucket_for_peer(&self.local.id, &peer.id);
        self.buckets[idx].contains(peer)
    }

    /// Remove a peer from its bucket and the address directory.
    ///
    /// An address registered for a peer that never joined a bucket is
    /// dropped too. Returns `false` if the peer was not a bucket member.
    pub fn remove_peer(&mut self, peer: &PeerId) -> bool {
        if *peer == self.local {
            return false;
        }
        let idx = bucket_for_peer(&self.local.id, &peer.id);
        let removed = self.buckets[idx].remove_peer(peer);
        self.forget_address(removed.as_ref().unwrap_or(peer));
        removed.is_some()
    }

    /// Find the `count` closest bucket members to `target`, nearest first.
    pub fn find_closest_peers(&self, target: &NodeId, count: usize) -> Vec<PeerId> {
        let mut all_peers: Vec<&PeerId> = self
            .buckets
            .iter()
            .flat_map(|b| b.peers().iter())
            .collect();

        all_peers.sort_by(|a, b| compare_by_distance(a, b, target));

        all_peers.into_iter().take(count).cloned().collect()
    }

    /// Addresses of every bucket member.
    pub fn peer_addresses(&self) -> Vec<String> {
        self.buckets
            .iter()
            .flat_map(|b| b.peers().iter())
            .map(|p| p.address.clone())
            .collect()
    }

    /// Get a reference to a bucket by index
    pub fn get_bucket(&self, index: usize) -> Option<&KBucket> {
        self.buckets.get(index)
    }

    /// Drop an address entry only if it still points at `peer`.
    fn forget_address(&mut self, peer: &PeerId) {
        if self.addresses.get(&peer.address) == Some(peer) {
            self.addresses.remove(&peer.address);
        }
    }
}
