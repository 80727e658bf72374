//! # Peer Discovery Benchmarks
//!
//! - XOR distance and bucket index computation
//! - Nearest-peer queries against a densely populated routing table
//! - Full iterative lookups across an in-memory overlay
//!
//! Identities are random, so bucket occupancy follows the usual Kademlia
//! shape: half the peers fall in bucket 0, a quarter in bucket 1, and so on.

use std::sync::Arc;
use std::time::Duration;

use criterion::{black_box, BenchmarkId, Criterion, Throughput};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use overlay_discovery::{
    bucket_for_peer, xor_distance, DiscoveryConfig, DiscoveryService, InMemoryNetwork,
    MemoryTransport, NodeId, PeerId, RoutingTable,
};

fn random_peer(rng: &mut StdRng, index: usize) -> PeerId {
    PeerId::new(format!("10.{}.{}.1:3000", index / 256, index % 256), NodeId::new(rng.gen()))
}

pub fn bench_distance(c: &mut Criterion) {
    let mut group = c.benchmark_group("discovery/distance");

    let a = NodeId::new([0xAB; 32]);
    let b = NodeId::new([0xCD; 32]);
    group.bench_function("xor_distance", |bench| {
        bench.iter(|| black_box(xor_distance(black_box(&a), black_box(&b))))
    });

    // Identities sharing a long prefix walk most of the array
    let mut near = [0xAB; 32];
    near[31] = 0xAA;
    let near = NodeId::new(near);
    group.bench_function("bucket_for_peer_long_prefix", |bench| {
        bench.iter(|| black_box(bucket_for_peer(black_box(&a), black_box(&near))))
    });

    group.finish();
}

pub fn bench_routing_table(c: &mut Criterion) {
    let mut group = c.benchmark_group("discovery/routing_table");
    group.measurement_time(Duration::from_secs(10));

    let mut rng = StdRng::seed_from_u64(42);
    let local = random_peer(&mut rng, 0);

    for population in [100usize, 1000, 4000] {
        let mut table = RoutingTable::new(local.clone(), 16);
        for i in 0..population {
            table.upsert(random_peer(&mut rng, i + 1));
        }
        let target = NodeId::new(rng.gen());

        group.bench_with_input(
            BenchmarkId::new("find_16_closest", population),
            &table,
            |bench, table| bench.iter(|| black_box(table.find_closest_peers(&target, 16))),
        );
    }

    let burst: Vec<PeerId> = (0..1000).map(|i| random_peer(&mut rng, i + 1)).collect();
    group.throughput(Throughput::Elements(burst.len() as u64));
    group.bench_function("upsert_1000_burst", |bench| {
        bench.iter(|| {
            let mut table = RoutingTable::new(local.clone(), 16);
            for peer in &burst {
                table.upsert(peer.clone());
            }
            black_box(table.peer_count())
        })
    });

    group.finish();
}

pub fn bench_lookup(c: &mut Criterion) {
    let mut group = c.benchmark_group("discovery/lookup");
    group.measurement_time(Duration::from_secs(10));

    let runtime = match tokio::runtime::Builder::new_current_thread().build() {
        Ok(runtime) => runtime,
        Err(e) => {
            eprintln!("skipping lookup benchmarks: {}", e);
            return;
        }
    };
    let mut rng = StdRng::seed_from_u64(7);

    for size in [16usize, 64] {
        let network = Arc::new(InMemoryNetwork::new());
        let nodes: Vec<Arc<DiscoveryService<MemoryTransport>>> = (0..size)
            .map(|i| {
                let peer = random_peer(&mut rng, i);
                let transport = Arc::new(network.transport(peer.clone()));
                let node = Arc::new(DiscoveryService::new(
                    transport,
                    peer.clone(),
                    DiscoveryConfig::default(),
                ));
                network.register(peer, node.clone());
                node
            })
            .collect();

        let seed = [nodes[0].self_id()];
        runtime.block_on(async {
            for node in nodes.iter().skip(1) {
                node.bootstrap(&seed).await;
            }
        });

        let requester = &nodes[size - 1];
        let target = random_peer(&mut rng, size);
        group.bench_with_input(BenchmarkId::new("random_target", size), &size, |bench, _| {
            bench.iter(|| black_box(runtime.block_on(requester.lookup(&target))))
        });
    }

    group.finish();
}
