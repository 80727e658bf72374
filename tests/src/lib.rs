//! # Overlay Discovery Test Suite
//!
//! ## Structure
//!
//! ```text
//! tests/src/
//! ├── benchmarks/       # Criterion benchmarks (routing table, lookups)
//! └── integration/      # Multi-node flows over the in-memory network
//! ```
//!
//! ## Running Tests
//!
//! ```bash
//! cargo test -p overlay-tests
//! cargo bench -p overlay-tests
//! ```

pub mod benchmarks;
pub mod integration;
