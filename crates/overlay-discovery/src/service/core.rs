use std::sync::Arc;

use crate::adapters::SharedRoutingTable;
use crate::domain::{DiscoveryConfig, NodeId, PeerId};
use crate::ports::{RoutingTableStore, SendHandler};

/// Discovery service: validates and dispatches inbound discovery messages
/// and drives lookups through the injected `SendHandler`.
///
/// The service owns no locks. Concurrent dispatch paths share the routing
/// table through `RoutingTableStore`, whose calls are individually atomic.
///
/// # Example
///
/// ```rust,ignore
/// use std::sync::Arc;
/// use overlay_discovery::{DiscoveryConfig, DiscoveryService, NodeId, PeerId};
///
/// let me = PeerId::new("10.0.0.1:3000", NodeId::new([1u8; 32]));
/// let service = DiscoveryService::new(Arc::new(transport), me, DiscoveryConfig::default());
///
/// service.bootstrap(&seeds).await;
/// let addresses = service.peer_addresses();
/// ```
pub struct DiscoveryService<S, R = SharedRoutingTable>
where
    S: SendHandler,
    R: RoutingTableStore,
{
    /// Routing table (driven port)
    pub(crate) routes: Arc<R>,
    /// Outbound requests (driven port)
    pub(crate) send_handler: Arc<S>,
    pub(crate) config: DiscoveryConfig,
}

impl<S: SendHandler> DiscoveryService<S> {
    /// Create a service with a fresh routing table for `self_id`.
    ///
    /// The table's bucket capacity is `config.k`.
    pub fn new(send_handler: Arc<S>, self_id: PeerId, config: DiscoveryConfig) -> Self {
        let routes = Arc::new(SharedRoutingTable::new(self_id, config.k));
        Self::with_routes(send_handler, routes, config)
    }
}

impl<S: SendHandler, R: RoutingTableStore> DiscoveryService<S, R> {
    /// Create a service over an existing routing table implementation.
    pub fn with_routes(send_handler: Arc<S>, routes: Arc<R>, config: DiscoveryConfig) -> Self {
        Self {
            routes,
            send_handler,
            config,
        }
    }

    /// Get the routing table.
    pub fn routes(&self) -> &Arc<R> {
        &self.routes
    }

    pub fn config(&self) -> &DiscoveryConfig {
        &self.config
    }

    pub fn self_id(&self) -> PeerId {
        self.routes.self_id()
    }

    /// Up to `count` known peers nearest to `target`, nearest first.
    pub fn find_closest_peers(&self, target: &NodeId, count: usize) -> Vec<PeerId> {
        self.routes.find_closest_peers(target, count)
    }

    /// Addresses of every peer in the routing table.
    pub fn peer_addresses(&self) -> Vec<String> {
        self.routes.peer_addresses()
    }
}
