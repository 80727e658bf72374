//! Test utilities for peer discovery.
//!
//! Mock `SendHandler` implementations for deterministic testing.
//! Enable with the `test-utils` feature flag.
//!
//! # Example
//!
//! ```rust,ignore
//! use overlay_discovery::test_utils::ScriptedTransport;
//! use overlay_discovery::{NodeId, PeerId};
//!
//! let responder = PeerId::new("10.0.0.1:3000", NodeId::new([1u8; 32]));
//! let neighbour = PeerId::new("10.0.0.2:3000", NodeId::new([2u8; 32]));
//!
//! let transport = ScriptedTransport::new().with_neighbours(&responder, vec![neighbour]);
//! assert!(transport.requests().is_empty());
//! ```

use std::collections::HashMap;

use async_trait::async_trait;
use parking_lot::Mutex;

use crate::domain::{PeerId, TransportError};
use crate::ports::SendHandler;
use crate::protocol::{DiscoveryMessage, LookupNodeResponse, MessageBody, Opcode};

/// One request seen by a `ScriptedTransport`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedRequest {
    pub target: PeerId,
    pub opcode: Opcode,
    pub payload: Vec<u8>,
}

/// A transport that answers from a script.
///
/// - `Ping` to any scripted peer yields `Pong`
/// - `LookupRequest` yields the peer's canned neighbour list
/// - anything sent to an unscripted peer fails with `Unreachable`
///
/// Every request is recorded, answered or not.
#[derive(Debug, Default)]
pub struct ScriptedTransport {
    neighbours: HashMap<PeerId, Vec<PeerId>>,
    requests: Mutex<Vec<RecordedRequest>>,
}

impl ScriptedTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Script `peer` to answer lookups with `neighbours`.
    #[must_use]
    pub fn with_neighbours(mut self, peer: &PeerId, neighbours: Vec<PeerId>) -> Self {
        self.neighbours.insert(peer.clone(), neighbours);
        self
    }

    /// All requests received so far, in order.
    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().clone()
    }

    /// Targets of requests carrying `opcode`, in order.
    pub fn targets_of(&self, opcode: Opcode) -> Vec<PeerId> {
        self.requests
            .lock()
            .iter()
            .filter(|r| r.opcode == opcode)
            .map(|r| r.target.clone())
            .collect()
    }
}

#[async_trait]
impl SendHandler for ScriptedTransport {
    async fn request(
        &self,
        target: &PeerId,
        opcode: Opcode,
        payload: Vec<u8>,
    ) -> Result<MessageBody, TransportError> {
        self.requests.lock().push(RecordedRequest {
            target: target.clone(),
            opcode,
            payload,
        });

        let Some(neighbours) = self.neighbours.get(target) else {
            return Err(TransportError::Unreachable(target.address.clone()));
        };

        let reply = match opcode {
            Opcode::Ping => DiscoveryMessage::Pong,
            Opcode::LookupRequest => DiscoveryMessage::LookupResponse(LookupNodeResponse {
                peers: neighbours.clone(),
            }),
            Opcode::Pong | Opcode::LookupResponse => return Err(TransportError::NoReply),
        };
        reply
            .into_body()
            .map_err(|e| TransportError::Rejected(e.to_string()))
    }
}

/// A transport on which every request fails.
#[derive(Debug, Clone)]
pub struct FailingTransport {
    error: TransportError,
}

impl FailingTransport {
    pub fn new(error: TransportError) -> Self {
        Self { error }
    }
}

impl Default for FailingTransport {
    fn default() -> Self {
        Self::new(TransportError::Timeout)
    }
}

#[async_trait]
impl SendHandler for FailingTransport {
    async fn request(
        &self,
        _target: &PeerId,
        _opcode: Opcode,
        _payload: Vec<u8>,
    ) -> Result<MessageBody, TransportError> {
        Err(self.error.clone())
    }
}
