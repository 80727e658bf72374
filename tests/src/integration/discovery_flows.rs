//! # Discovery Flows
//!
//! Nodes are real `DiscoveryService`s talking through `MemoryTransport`, so
//! every request goes through `peer_connect` and `receive_message` on the
//! remote side exactly as a network transport would drive them.
//!
//! ## Flows Tested:
//!
//! 1. **Bootstrap**: ping a seed, then learn its neighbourhood
//! 2. **Iterative lookup**: walk a chain of peers towards an unknown target
//! 3. **Disconnect**: a dropped node disappears from every routing table
//! 4. **Category toggles**: disabled ping/lookup still refresh the sender

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use overlay_discovery::{
        DiscoveryConfig, DiscoveryService, InMemoryNetwork, MemoryTransport, NodeId, PeerId,
        RoutingTableStore,
    };

    type Node = Arc<DiscoveryService<MemoryTransport>>;

    // =============================================================================
    // TEST FIXTURES
    // =============================================================================

    fn make_peer(val: u8) -> PeerId {
        let mut bytes = [0u8; 32];
        bytes[0] = val;
        PeerId::new(format!("10.0.0.{}:3000", val), NodeId::new(bytes))
    }

    fn spawn(network: &Arc<InMemoryNetwork>, val: u8, config: DiscoveryConfig) -> Node {
        let peer = make_peer(val);
        let transport = Arc::new(network.transport(peer.clone()));
        let node = Arc::new(DiscoveryService::new(transport, peer.clone(), config));
        network.register(peer, node.clone());
        node
    }

    fn knows(node: &Node, val: u8) -> bool {
        node.routes().peer_exists(&make_peer(val))
    }

    // =============================================================================
    // FLOW 1: Bootstrap
    // =============================================================================

    #[tokio::test]
    async fn test_second_joiner_learns_first_through_seed() {
        let network = Arc::new(InMemoryNetwork::new());
        let seed = spawn(&network, 0x40, DiscoveryConfig::for_testing());
        let first = spawn(&network, 0x10, DiscoveryConfig::for_testing());
        let second = spawn(&network, 0x11, DiscoveryConfig::for_testing());

        assert_eq!(first.bootstrap(&[seed.self_id()]).await, 1);
        assert_eq!(second.bootstrap(&[seed.self_id()]).await, 1);

        // The seed heard from both joiners
        assert!(knows(&seed, 0x10));
        assert!(knows(&seed, 0x11));

        // The second joiner learned the first from the seed's lookup reply
        assert!(knows(&second, 0x40));
        assert!(knows(&second, 0x10));

        // Nothing ever told the first joiner about the second
        assert!(knows(&first, 0x40));
        assert_eq!(first.routes().peer_count(), 1);
    }

    #[tokio::test]
    async fn test_bootstrap_against_offline_seed_learns_nothing() {
        let network = Arc::new(InMemoryNetwork::new());
        let node = spawn(&network, 0x10, DiscoveryConfig::for_testing());

        let accepted = node.bootstrap(&[make_peer(0x40)]).await;

        assert_eq!(accepted, 0);
        assert_eq!(node.routes().peer_count(), 0);
    }

    #[tokio::test]
    async fn test_overlay_of_twenty_converges_on_lookup() {
        let network = Arc::new(InMemoryNetwork::new());
        let config = DiscoveryConfig::default().with_k(32);
        let nodes: Vec<Node> = (1..=20).map(|val| spawn(&network, val, config.clone())).collect();
        let seed = nodes[0].self_id();

        for node in nodes.iter().skip(1) {
            assert_eq!(node.bootstrap(&[seed.clone()]).await, 1);
        }

        assert_eq!(nodes[0].routes().peer_count(), 19);
        for node in &nodes {
            if node.self_id() != seed {
                assert!(node.routes().peer_exists(&seed));
            }
        }

        // Node 2 joined first and only ever met the seed
        assert_eq!(nodes[1].routes().peer_count(), 1);

        let found = nodes[1].lookup(&make_peer(20)).await;

        assert_eq!(found.first(), Some(&make_peer(20)));
        assert!(!found.contains(&make_peer(2)));
        assert!(knows(&nodes[1], 20));
    }

    // =============================================================================
    // FLOW 2: Iterative Lookup
    // =============================================================================

    #[tokio::test]
    async fn test_lookup_walks_chain_towards_target() {
        let network = Arc::new(InMemoryNetwork::new());
        let a = spawn(&network, 0x80, DiscoveryConfig::for_testing());
        let b = spawn(&network, 0x10, DiscoveryConfig::for_testing());
        let c = spawn(&network, 0x03, DiscoveryConfig::for_testing());
        let d = spawn(&network, 0x01, DiscoveryConfig::for_testing());
        a.routes().upsert(b.self_id());
        b.routes().upsert(c.self_id());
        c.routes().upsert(d.self_id());

        let found = a.lookup(&d.self_id()).await;

        assert_eq!(found, vec![d.self_id(), c.self_id(), b.self_id()]);
        assert!(knows(&a, 0x03));
        assert!(knows(&a, 0x01));

        // Every node that answered refreshed the requester
        assert!(knows(&b, 0x80));
        assert!(knows(&c, 0x80));
        assert!(knows(&d, 0x80));
    }

    // =============================================================================
    // FLOW 3: Disconnect
    // =============================================================================

    #[tokio::test]
    async fn test_disconnect_propagates_to_every_node() {
        let network = Arc::new(InMemoryNetwork::new());
        let seed = spawn(&network, 0x40, DiscoveryConfig::for_testing());
        let first = spawn(&network, 0x10, DiscoveryConfig::for_testing());
        let second = spawn(&network, 0x11, DiscoveryConfig::for_testing());
        first.bootstrap(&[seed.self_id()]).await;
        second.bootstrap(&[seed.self_id()]).await;
        assert!(knows(&second, 0x10));

        assert!(network.disconnect(&first.self_id().address));

        assert!(!knows(&seed, 0x10));
        assert!(!knows(&second, 0x10));
        assert!(knows(&second, 0x40));
        assert_eq!(network.len(), 2);
    }

    // =============================================================================
    // FLOW 4: Category Toggles
    // =============================================================================

    #[tokio::test]
    async fn test_seed_with_lookup_disabled_only_answers_pings() {
        let network = Arc::new(InMemoryNetwork::new());
        let quiet = DiscoveryConfig {
            disable_lookup: true,
            ..DiscoveryConfig::for_testing()
        };
        let seed = spawn(&network, 0x40, quiet);
        let first = spawn(&network, 0x10, DiscoveryConfig::for_testing());
        let second = spawn(&network, 0x11, DiscoveryConfig::for_testing());

        assert_eq!(first.bootstrap(&[seed.self_id()]).await, 1);
        assert_eq!(second.bootstrap(&[seed.self_id()]).await, 1);

        // The seed still refreshed everyone who contacted it
        assert!(knows(&seed, 0x10));
        assert!(knows(&seed, 0x11));
        // ...but shared nothing
        assert!(!knows(&second, 0x10));
        assert_eq!(second.routes().peer_count(), 1);
    }

    #[tokio::test]
    async fn test_seed_with_ping_disabled_refreshes_but_never_answers() {
        let network = Arc::new(InMemoryNetwork::new());
        let quiet = DiscoveryConfig {
            disable_ping: true,
            ..DiscoveryConfig::for_testing()
        };
        let seed = spawn(&network, 0x40, quiet);
        let node = spawn(&network, 0x10, DiscoveryConfig::for_testing());

        let accepted = node.bootstrap(&[seed.self_id()]).await;

        assert_eq!(accepted, 0);
        assert!(knows(&seed, 0x10));
        assert_eq!(node.routes().peer_count(), 0);
    }
}
