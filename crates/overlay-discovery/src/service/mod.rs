//! # Discovery Service
//!
//! Wires the domain routing table and lookup shortlist to the ports.
//!
//! - `api`: the `DiscoveryApi` entry points (receive, connect, disconnect)
//! - `dispatch`: the opcode state machine behind `receive_message`
//! - `lookup`: the iterative nearest-node search
//! - `bootstrap`: initial contact with seed peers

// Semantic submodules
mod api;
mod bootstrap;
mod core;
mod dispatch;
mod lookup;

// Re-export public API
pub use self::core::DiscoveryService;
pub use lookup::find_node;
