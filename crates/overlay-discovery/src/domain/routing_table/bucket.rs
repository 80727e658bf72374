//! K-Bucket implementation for Kademlia routing.

use crate::domain::PeerId;

/// A k-bucket storing up to k peers at a specific distance range.
///
/// Peers are kept in recency order: the front is the least recently seen,
/// the back the most recently seen. When the bucket is full the front entry
/// is the eviction candidate.
#[derive(Debug, Clone, Default)]
pub struct KBucket {
    pub(crate) peers: Vec<PeerId>,
}

impl KBucket {
    /// Create a new empty k-bucket
    pub fn new() -> Self {
        Self { peers: Vec::new() }
    }

    pub fn len(&self) -> usize {
        self.peers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.peers.is_empty()
    }

    pub fn is_full(&self, k: usize) -> bool {
        self.peers.len() >= k
    }

    /// Get all peers in this bucket, least recently seen first
    pub fn peers(&self) -> &[PeerId] {
        &self.peers
    }

    /// Append a peer in the most recently seen position (assumes not full)
    pub(crate) fn push(&mut self, peer: PeerId) {
        self.peers.push(peer);
    }

    /// Remove a peer by identity.
    pub(crate) fn remove_peer(&mut self, peer: &PeerId) -> Option<PeerId> {
        self.peers
            .iter()
            .position(|p| p == peer)
            .map(|pos| self.peers.remove(pos))
    }

    /// Evict the least recently seen peer.
    pub(crate) fn evict_oldest(&mut self) -> Option<PeerId> {
        if self.peers.is_empty() {
            None
        } else {
            Some(self.peers.remove(0))
        }
    }

    /// Move a peer to the most recently seen position, adopting the address
    /// it was last seen at. Returns the replaced entry.
    pub(crate) fn refresh(&mut self, peer: PeerId) -> Option<PeerId> {
        let previous = self.remove_peer(&peer)?;
        self.peers.push(peer);
        Some(previous)
    }

    pub(crate) fn contains(&self, peer: &PeerId) -> bool {
        self.peers.iter().any(|p| p == peer)
    }
}
