//! Routing table constants and configuration.

/// Number of k-buckets (one per bit of NodeId)
pub const NUM_BUCKETS: usize = 256;

/// Default per-bucket capacity (K)
pub const DEFAULT_BUCKET_SIZE: usize = 16;
