//! Iterative nearest-node search.

use futures::future::join_all;
use tracing::{debug, warn};

use crate::domain::{LookupShortlist, PeerId};
use crate::ports::{RoutingTableStore, SendHandler};
use crate::protocol::{DiscoveryMessage, LookupNodeRequest, Opcode, DISCOVERY_SERVICE_ID};
use crate::service::DiscoveryService;

/// Find up to `k` peers nearest to `target`.
///
/// Seeds from the routing table, then queries unqueried candidates `alpha` at
/// a time, merging each round's replies into the shortlist. Stops once a
/// round fails to improve on the closest distance known before it, or when
/// nothing is left to query.
///
/// The routing table is only read here. Callers decide what to absorb.
///
/// # Arguments
///
/// * `routes` - Routing table supplying seeds and our own identity
/// * `send_handler` - Transport used for `LookupRequest` queries
/// * `target` - Peer whose neighbourhood is searched
/// * `k` - Result size
/// * `alpha` - Queries in flight per round
///
/// # Returns
///
/// At most `k` peers, nearest first, never including ourselves. Peers
/// that fail to answer are skipped.
pub async fn find_node<R, S>(
    routes: &R,
    send_handler: &S,
    target: &PeerId,
    k: usize,
    alpha: usize,
) -> Vec<PeerId>
where
    R: RoutingTableStore + ?Sized,
    S: SendHandler + ?Sized,
{
    let local = routes.self_id();
    let seeds = routes.find_closest_peers(&target.id, k);
    let mut shortlist = LookupShortlist::new(target.id, local.id, seeds);

    let request = DiscoveryMessage::LookupRequest(LookupNodeRequest {
        target: Some(target.clone()),
    });
    let payload = match request.encode() {
        Ok(payload) => payload,
        Err(e) => {
            warn!(error = %e, "Failed to encode lookup request");
            return shortlist.nearest(k);
        }
    };

    let mut round = 0usize;
    loop {
        let batch = shortlist.next_batch(alpha.max(1));
        if batch.is_empty() {
            break;
        }
        round += 1;

        let best_before = shortlist.closest_distance();
        let queries: Vec<_> = batch
            .iter()
            .map(|peer| query_peer(send_handler, peer, payload.clone()))
            .collect();
        let replies = join_all(queries).await;

        let added: usize = replies.into_iter().map(|peers| shortlist.merge(peers)).sum();
        debug!(
            target = %target,
            round,
            queried = batch.len(),
            added,
            "Lookup round complete"
        );

        if !shortlist.improved_on(best_before) {
            break;
        }
    }

    shortlist.nearest(k)
}

/// Ask one peer for its neighbours of the lookup target.
///
/// Any failure yields an empty list; a single unresponsive peer never
/// aborts a lookup.
async fn query_peer<S>(send_handler: &S, peer: &PeerId, payload: Vec<u8>) -> Vec<PeerId>
where
    S: SendHandler + ?Sized,
{
    let body = match send_handler.request(peer, Opcode::LookupRequest, payload).await {
        Ok(body) => body,
        Err(e) => {
            debug!(peer = %peer, error = %e, "Lookup query failed");
            return Vec::new();
        }
    };

    if body.service != DISCOVERY_SERVICE_ID {
        debug!(peer = %peer, service = body.service, "Lookup reply for another service");
        return Vec::new();
    }

    match DiscoveryMessage::decode(body.opcode, &body.payload) {
        Ok(DiscoveryMessage::LookupResponse(response)) => response.peers,
        Ok(other) => {
            debug!(peer = %peer, opcode = other.opcode(), "Unexpected lookup reply");
            Vec::new()
        }
        Err(e) => {
            debug!(peer = %peer, error = %e, "Undecodable lookup reply");
            Vec::new()
        }
    }
}

impl<S: SendHandler, R: RoutingTableStore> DiscoveryService<S, R> {
    /// Run a lookup for `target` and absorb the result into the routing table.
    ///
    /// # Returns
    ///
    /// The peers the lookup converged on, nearest first.
    pub async fn lookup(&self, target: &PeerId) -> Vec<PeerId> {
        let found = find_node(
            self.routes.as_ref(),
            self.send_handler.as_ref(),
            target,
            self.config.k,
            self.config.alpha,
        )
        .await;

        for peer in &found {
            self.routes.upsert(peer.clone());
        }
        found
    }
}
