//! # Ports Layer - Hexagonal Architecture Boundaries
//!
//! - **Driving Ports (Inbound):** what the transport calls into
//! - **Driven Ports (Outbound):** what the service needs from its host
//!
//! ## Concurrency
//!
//! Inbound messages may be dispatched concurrently. The service holds no
//! locks of its own, so every `RoutingTableStore` call must be atomic on
//! its own; the service never relies on two calls observing the same state.

pub mod inbound;
pub mod outbound;

pub use inbound::DiscoveryApi;
pub use outbound::{ConfigProvider, RoutingTableStore, SendHandler};
