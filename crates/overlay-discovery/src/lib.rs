//! # Overlay Peer Discovery
//!
//! The peer-discovery sub-protocol of a peer-to-peer overlay. A node uses it to
//! find, validate and keep fresh a bounded set of neighbors, tracked in a
//! Kademlia-style XOR-distance routing table.
//!
//! ## Architecture
//!
//! The crate follows Hexagonal Architecture with:
//! - **Domain Layer:** XOR distance, k-buckets, routing table, lookup shortlist
//! - **Protocol Layer:** opcodes, message envelopes and payload records
//! - **Ports Layer:** `DiscoveryApi` (driving), `SendHandler` / `RoutingTableStore` (driven)
//! - **Service Layer:** inbound dispatch state machine and iterative lookup engine
//! - **Adapters Layer:** shared routing table, in-memory transport, config providers
//!
//! ## Message Flow
//!
//! ```text
//! Message ──validate──→ resolve sender/recipient ──decode──→ dispatch
//!                                                              │
//!      Ping ──→ Pong reply                                     │
//!      Pong ──→ iterative lookup (target = sender) ──→ upsert ─┤
//!      LookupRequest ──→ LookupResponse (K nearest)            │
//!      LookupResponse ──→ consumed by the awaiting lookup      │
//! ```
//!
//! ## Example
//!
//! ```rust
//! use overlay_discovery::{NodeId, PeerId, RoutingTable};
//!
//! let local = PeerId::new("127.0.0.1:3000", NodeId::new([0u8; 32]));
//! let mut table = RoutingTable::new(local, 16);
//!
//! let peer = PeerId::new("127.0.0.1:3001", NodeId::new([1u8; 32]));
//! table.upsert(peer.clone());
//!
//! assert!(table.peer_exists(&peer));
//! assert_eq!(table.lookup_remote_address("127.0.0.1:3001"), Some(peer));
//! ```

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod protocol;
pub mod service;

/// Test utilities (ScriptedTransport, FailingTransport)
/// Requires feature: `test-utils`
#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

// Domain
pub use domain::{
    bucket_for_peer, find_k_closest, sort_peers_by_distance, xor_distance, DiscoveryConfig,
    DiscoveryError, Distance, KBucket, LookupShortlist, NodeId, PeerId, RoutingTable,
    TransportError, NUM_BUCKETS,
};

// Protocol
pub use protocol::{
    DiscoveryMessage, LookupNodeRequest, LookupNodeResponse, Message, MessageBody, Opcode,
    WirePeer, DISCOVERY_SERVICE_ID, WIRE_VERSION,
};

// Ports
pub use ports::{ConfigProvider, DiscoveryApi, RoutingTableStore, SendHandler};

// Service
pub use service::{find_node, DiscoveryService};

// Adapters
pub use adapters::{InMemoryNetwork, MemoryTransport, SharedRoutingTable, StaticConfigProvider};

#[cfg(feature = "config-file")]
pub use adapters::{ConfigError, TomlConfigProvider};
