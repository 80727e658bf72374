//! # Overlay Node
//!
//! Runs a simulated overlay of discovery nodes wired through an in-process
//! network, bootstraps them off a seed and reports how well their routing
//! tables converge.
//!
//! ## Startup Sequence
//!
//! 1. Load configuration (TOML file if given, defaults otherwise)
//! 2. Spawn `--nodes` discovery services with random identities
//! 3. Bootstrap every node except the seed
//! 4. Refresh each node with a self-lookup
//! 5. Optionally take nodes offline and report the survivors
//!
//! `RUST_LOG` overrides `--log-level`.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{ensure, Context, Result};
use clap::Parser;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use overlay_discovery::{
    ConfigProvider, DiscoveryConfig, DiscoveryService, InMemoryNetwork, MemoryTransport, NodeId,
    PeerId, RoutingTableStore, StaticConfigProvider, TomlConfigProvider,
};

type Node = Arc<DiscoveryService<MemoryTransport>>;

/// Simulated overlay running the discovery protocol in one process
#[derive(Parser, Debug)]
#[command(name = "overlay-node")]
#[command(about = "Simulate peer discovery across an in-process overlay")]
struct Args {
    /// Number of nodes in the overlay
    #[arg(short, long, default_value = "32")]
    nodes: usize,

    /// First port; node i listens on 127.0.0.1:<base-port + i>
    #[arg(long, default_value = "3000")]
    base_port: u16,

    /// TOML config with [discovery] and [bootstrap] sections
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override the bucket size
    #[arg(short)]
    k: Option<usize>,

    /// Override the lookup concurrency factor
    #[arg(short)]
    alpha: Option<usize>,

    /// Seed for identity generation, for reproducible runs
    #[arg(long)]
    seed: Option<u64>,

    /// Nodes to take offline after bootstrap
    #[arg(long, default_value = "0")]
    drop: usize,

    /// Default log level when RUST_LOG is unset
    #[arg(long, default_value = "info")]
    log_level: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&args.log_level))
        .context("invalid log level")?;
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    ensure!(args.nodes >= 2, "an overlay needs at least two nodes");
    ensure!(args.drop < args.nodes, "cannot drop every node");

    let (config, configured_seeds) = load_config(&args)?;
    info!(
        nodes = args.nodes,
        k = config.k,
        alpha = config.alpha,
        "Starting simulated overlay"
    );

    let mut rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let network = Arc::new(InMemoryNetwork::new());
    let nodes = spawn_nodes(&network, &mut rng, &args, &config)?;

    // Configured seeds first; node 0 is always a seed
    let mut seeds = configured_seeds;
    seeds.push(nodes[0].self_id());

    for node in nodes.iter().skip(1) {
        let accepted = node.bootstrap(&seeds).await;
        if accepted == 0 {
            warn!(address = %node.self_id().address, "No bootstrap peer answered");
        }
    }

    for node in &nodes {
        node.lookup(&node.self_id()).await;
    }
    report(&nodes);

    if args.drop > 0 {
        for node in nodes.iter().skip(args.nodes - args.drop) {
            network.disconnect(&node.self_id().address);
        }
        let survivors = &nodes[..args.nodes - args.drop];
        info!(dropped = args.drop, "Took nodes offline");
        report(survivors);
    }

    let target = PeerId::new("unassigned", NodeId::new(rng.gen()));
    let found = nodes[0].lookup(&target).await;
    info!(
        target = %target,
        found = ?found.iter().map(ToString::to_string).collect::<Vec<_>>(),
        "Lookup for random identity"
    );

    Ok(())
}

fn load_config(args: &Args) -> Result<(DiscoveryConfig, Vec<PeerId>)> {
    let (mut config, seeds) = match &args.config {
        Some(path) => {
            let provider = TomlConfigProvider::load(path)
                .with_context(|| format!("loading {}", path.display()))?;
            (provider.get_discovery_config(), provider.get_bootstrap_peers())
        }
        None => {
            let provider = StaticConfigProvider::new();
            (provider.get_discovery_config(), provider.get_bootstrap_peers())
        }
    };

    if let Some(k) = args.k {
        config = config.with_k(k);
    }
    if let Some(alpha) = args.alpha {
        config = config.with_alpha(alpha);
    }
    ensure!(config.k > 0 && config.alpha > 0, "k and alpha must be positive");

    Ok((config, seeds))
}

fn spawn_nodes(
    network: &Arc<InMemoryNetwork>,
    rng: &mut StdRng,
    args: &Args,
    config: &DiscoveryConfig,
) -> Result<Vec<Node>> {
    (0..args.nodes)
        .map(|i| {
            let port = u16::try_from(i)
                .ok()
                .and_then(|i| args.base_port.checked_add(i))
                .context("port range exhausted")?;
            let peer = PeerId::new(format!("127.0.0.1:{}", port), NodeId::new(rng.gen()));
            let transport = Arc::new(network.transport(peer.clone()));
            let node = Arc::new(DiscoveryService::new(transport, peer.clone(), config.clone()));
            network.register(peer, node.clone());
            Ok(node)
        })
        .collect()
}

fn report(nodes: &[Node]) {
    let sizes: Vec<usize> = nodes.iter().map(|n| n.routes().peer_count()).collect();
    let total: usize = sizes.iter().sum();
    let min = sizes.iter().copied().min().unwrap_or(0);
    let max = sizes.iter().copied().max().unwrap_or(0);

    info!(
        nodes = nodes.len(),
        min_peers = min,
        max_peers = max,
        mean_peers = total as f64 / nodes.len().max(1) as f64,
        "Routing table sizes"
    );
}
