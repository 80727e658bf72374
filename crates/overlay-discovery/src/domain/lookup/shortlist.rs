use std::collections::BTreeMap;

use crate::domain::{xor_distance, Distance, NodeId, PeerId};

#[derive(Debug, Clone)]
struct Candidate {
    peer: PeerId,
    queried: bool,
}

/// Candidate set for one iterative lookup.
///
/// Candidates are keyed by `(distance to target, identity)`, so iteration is
/// nearest first with ties broken by identity bytes, and a peer reported by
/// several responders is stored once. The local identity is never admitted.
#[derive(Debug, Clone)]
pub struct LookupShortlist {
    target: NodeId,
    local: NodeId,
    candidates: BTreeMap<(Distance, NodeId), Candidate>,
}

impl LookupShortlist {
    /// Seed a shortlist with the peers the routing table already knows.
    pub fn new(target: NodeId, local: NodeId, seeds: impl IntoIterator<Item = PeerId>) -> Self {
        let mut shortlist = Self {
            target,
            local,
            candidates: BTreeMap::new(),
        };
        shortlist.merge(seeds);
        shortlist
    }

    pub fn len(&self) -> usize {
        self.candidates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }

    /// Add a candidate. Returns `true` if it was not already known.
    pub fn insert(&mut self, peer: PeerId) -> bool {
        if peer.id == self.local {
            return false;
        }
        let key = (xor_distance(&peer.id, &self.target), peer.id);
        if self.candidates.contains_key(&key) {
            return false;
        }
        self.candidates.insert(
            key,
            Candidate {
                peer,
                queried: false,
            },
        );
        true
    }

    /// Merge a batch of reported peers; returns how many were new.
    pub fn merge(&mut self, peers: impl IntoIterator<Item = PeerId>) -> usize {
        peers
            .into_iter()
            .map(|peer| self.insert(peer))
            .filter(|added| *added)
            .count()
    }

    /// Take up to `alpha` of the closest unqueried candidates and mark them
    /// queried.
    pub fn next_batch(&mut self, alpha: usize) -> Vec<PeerId> {
        self.candidates
            .values_mut()
            .filter(|c| !c.queried)
            .take(alpha)
            .map(|c| {
                c.queried = true;
                c.peer.clone()
            })
            .collect()
    }

    pub fn has_unqueried(&self) -> bool {
        self.candidates.values().any(|c| !c.queried)
    }

    /// Distance of the closest candidate, queried or not.
    pub fn closest_distance(&self) -> Option<Distance> {
        self.candidates.keys().next().map(|(distance, _)| *distance)
    }

    /// Whether the closest candidate is now strictly closer than `previous`.
    pub fn improved_on(&self, previous: Option<Distance>) -> bool {
        match (self.closest_distance(), previous) {
            (Some(now), Some(before)) => now < before,
            (Some(_), None) => true,
            (None, _) => false,
        }
    }

    /// The `k` nearest candidates, nearest first.
    pub fn nearest(&self, k: usize) -> Vec<PeerId> {
        self.candidates
            .values()
            .take(k)
            .map(|c| c.peer.clone())
            .collect()
    }
}
