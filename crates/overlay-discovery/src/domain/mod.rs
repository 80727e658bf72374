//! Domain Layer - Pure business logic with no I/O
//!
//! This module contains the core Kademlia logic including:
//! - Node identifiers and full 256-bit XOR distance
//! - Routing table with k-buckets and an address directory
//! - Lookup shortlist bookkeeping for the iterative search

pub mod lookup;
pub mod routing_table;
pub mod services;
/// Core domain types (entities, values, errors)
pub mod types;

pub use lookup::*;
pub use routing_table::*;
pub use services::*;
pub use types::*;
