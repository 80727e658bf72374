//! Peer sorting and selection.

use std::cmp::Ordering;

use super::distance::xor_distance;
use crate::domain::{NodeId, PeerId};

/// Order two peers by XOR distance to `target`, closest first.
///
/// Equal distances fall back to lexicographic identity order so repeated
/// queries over an unchanged table always return the same sequence.
pub fn compare_by_distance(a: &PeerId, b: &PeerId, target: &NodeId) -> Ordering {
    xor_distance(&a.id, target)
        .cmp(&xor_distance(&b.id, target))
        .then_with(|| a.id.cmp(&b.id))
}

/// Sort peers by XOR distance from a target node (closest first).
pub fn sort_peers_by_distance(peers: &[PeerId], target: &NodeId) -> Vec<PeerId> {
    let mut sorted = peers.to_vec();
    sorted.sort_by(|a, b| compare_by_distance(a, b, target));
    sorted
}

/// Find the k closest peers to a target from a list
///
/// # Returns
/// Up to k peers sorted by distance (closest first)
pub fn find_k_closest(peers: &[PeerId], target: &NodeId, k: usize) -> Vec<PeerId> {
    let sorted = sort_peers_by_distance(peers, target);
    sorted.into_iter().take(k).collect()
}
