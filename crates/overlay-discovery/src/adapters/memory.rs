//! In-process transport.
//!
//! Routes requests between discovery nodes living in one process. Used by
//! the integration tests and the demo node; a real deployment supplies its
//! own `SendHandler` over the network.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::RwLock;
use tracing::debug;

use crate::domain::{PeerId, TransportError};
use crate::ports::{DiscoveryApi, SendHandler};
use crate::protocol::{Message, MessageBody, Opcode};

struct Endpoint {
    peer: PeerId,
    node: Arc<dyn DiscoveryApi>,
}

/// Registry of in-process nodes keyed by address.
///
/// Nodes hold a `MemoryTransport` that points back at the network, so a
/// registered node stays alive until it is disconnected.
#[derive(Default)]
pub struct InMemoryNetwork {
    endpoints: RwLock<HashMap<String, Endpoint>>,
}

impl InMemoryNetwork {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make `node` reachable at `peer.address`, replacing any previous node.
    pub fn register(&self, peer: PeerId, node: Arc<dyn DiscoveryApi>) {
        self.endpoints
            .write()
            .insert(peer.address.clone(), Endpoint { peer, node });
    }

    /// A transport that sends on behalf of `local`.
    pub fn transport(self: &Arc<Self>, local: PeerId) -> MemoryTransport {
        MemoryTransport {
            local,
            network: Arc::clone(self),
        }
    }

    /// Take the node at `address` offline and tell every remaining node.
    ///
    /// # Returns
    ///
    /// `false` if no node was registered at `address`.
    pub fn disconnect(&self, address: &str) -> bool {
        let (gone, remaining) = {
            let mut endpoints = self.endpoints.write();
            let Some(gone) = endpoints.remove(address) else {
                return false;
            };
            let remaining: Vec<_> = endpoints.values().map(|e| Arc::clone(&e.node)).collect();
            (gone.peer, remaining)
        };

        debug!(peer = %gone, notified = remaining.len(), "Node disconnected");
        for node in remaining {
            node.peer_disconnect(&gone);
        }
        true
    }

    pub fn contains(&self, address: &str) -> bool {
        self.endpoints.read().contains_key(address)
    }

    pub fn len(&self) -> usize {
        self.endpoints.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.endpoints.read().is_empty()
    }

    fn node(&self, address: &str) -> Option<Arc<dyn DiscoveryApi>> {
        self.endpoints
            .read()
            .get(address)
            .map(|endpoint| Arc::clone(&endpoint.node))
    }

    /// Deliver one request from `from` to `to` and map the outcome.
    ///
    /// The remote node is told about the caller first, the way a real
    /// transport announces a peer after its handshake.
    async fn deliver(
        &self,
        from: &PeerId,
        to: &PeerId,
        opcode: Opcode,
        payload: Vec<u8>,
    ) -> Result<MessageBody, TransportError> {
        let node = self
            .node(&to.address)
            .ok_or_else(|| TransportError::Unreachable(to.address.clone()))?;

        node.peer_connect(from.clone());

        let message = Message::new(
            from.clone(),
            to.clone(),
            MessageBody::discovery(opcode.as_u32(), payload),
        );
        match node.receive_message(&message).await {
            Ok(Some(reply)) => Ok(reply),
            Ok(None) => Err(TransportError::NoReply),
            Err(e) => Err(TransportError::Rejected(e.to_string())),
        }
    }
}

/// `SendHandler` that delivers through an `InMemoryNetwork`.
#[derive(Clone)]
pub struct MemoryTransport {
    local: PeerId,
    network: Arc<InMemoryNetwork>,
}

#[async_trait]
impl SendHandler for MemoryTransport {
    async fn request(
        &self,
        target: &PeerId,
        opcode: Opcode,
        payload: Vec<u8>,
    ) -> Result<MessageBody, TransportError> {
        self.network
            .deliver(&self.local, target, opcode, payload)
            .await
    }
}
