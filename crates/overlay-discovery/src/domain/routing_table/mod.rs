//! Routing Table Implementation
//!
//! Kademlia routing table: 256 k-buckets indexed by the first bit in which a
//! peer's id differs from the local id, plus an address directory used to
//! resolve inbound envelopes.

// Semantic submodules
mod bucket;
mod config;
mod table;

// Re-export public API
pub use bucket::KBucket;
pub use config::{DEFAULT_BUCKET_SIZE, NUM_BUCKETS};
pub use table::RoutingTable;
