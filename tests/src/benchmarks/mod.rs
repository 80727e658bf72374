//! # Discovery Benchmarks
//!
//! Routing table and lookup benchmarks, registered by
//! `benches/discovery_benchmarks.rs`.

pub mod discovery;
