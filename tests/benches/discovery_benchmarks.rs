//! # Overlay Discovery Benchmarks
//!
//! | Area | Operation |
//! |------|-----------|
//! | Distance | XOR distance, bucket index |
//! | Routing table | K-closest query, upsert burst |
//! | Lookup | Iterative lookup over an in-memory overlay |

use criterion::{criterion_group, criterion_main};

use overlay_tests::benchmarks::discovery::{bench_distance, bench_lookup, bench_routing_table};

criterion_group!(benches, bench_distance, bench_routing_table, bench_lookup);
criterion_main!(benches);
