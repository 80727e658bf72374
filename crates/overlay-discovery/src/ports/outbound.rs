//! # Driven Ports (Outbound SPI)
//!
//! Interfaces the host application provides to the discovery service.

use async_trait::async_trait;

use crate::domain::{DiscoveryConfig, NodeId, PeerId, TransportError};
use crate::protocol::{MessageBody, Opcode};

/// Delivers a request to a peer and yields its reply.
///
/// Used both for pings issued during bootstrap and for the lookup engine's
/// queries. Timeouts and retries are the implementation's responsibility.
///
/// # Thread Safety
///
/// Lookups issue up to α requests concurrently, so implementations must be
/// `Send + Sync`.
#[async_trait]
pub trait SendHandler: Send + Sync {
    /// Send `payload` tagged with `opcode` to `target`.
    ///
    /// # Returns
    ///
    /// The reply body, or a transport failure. A peer that handled the
    /// request without answering yields `TransportError::NoReply`.
    async fn request(
        &self,
        target: &PeerId,
        opcode: Opcode,
        payload: Vec<u8>,
    ) -> Result<MessageBody, TransportError>;
}

/// Routing table as seen by the discovery service.
///
/// # Atomicity
///
/// Each method must be atomic and safe to call from several dispatch paths
/// at once. Nothing stronger is required: a concurrent `remove_peer` and
/// `upsert` of the same peer may land in either order.
pub trait RoutingTableStore: Send + Sync {
    /// Our own identity.
    fn self_id(&self) -> PeerId;

    /// Insert or refresh a peer. Idempotent.
    fn upsert(&self, peer: PeerId);

    /// Make a peer's address resolvable without adding it to a bucket.
    fn register_address(&self, peer: PeerId);

    /// Resolve an address to a known identity, including our own.
    fn lookup_remote_address(&self, address: &str) -> Option<PeerId>;

    /// Up to `count` known peers, nearest to `target` first.
    fn find_closest_peers(&self, target: &NodeId, count: usize) -> Vec<PeerId>;

    fn peer_exists(&self, peer: &PeerId) -> bool;

    /// Remove a peer. Returns `false` if it was not present.
    fn remove_peer(&self, peer: &PeerId) -> bool;

    /// Addresses of every known peer.
    fn peer_addresses(&self) -> Vec<String>;

    fn peer_count(&self) -> usize;
}

/// Abstract interface for configuration loading.
pub trait ConfigProvider: Send + Sync {
    /// Peers to ping when the node starts.
    fn get_bootstrap_peers(&self) -> Vec<PeerId>;

    /// Discovery configuration (bucket size, concurrency, category toggles).
    fn get_discovery_config(&self) -> DiscoveryConfig;
}
