//! Tests for the hash ring table.
//!
//! # Test Strategy
//!
//! 1. **Construction**: builder, config, invalid parameters
//! 2. **Lookup**: determinism, successor search, wrap-around
//! 3. **Mutation**: add/remove, empty ring, re-add
//! 4. **Utility**: node listing, token listing

use orbit_core::{
    Error, HashAlgorithm, HashRing, NodeId, RingBuilder, RingConfig, MAX_TOTAL_VNODES,
};

fn shards(n: usize) -> Vec<String> {
    (1..=n).map(|i| format!("shard{}", i)).collect()
}

// ============================================================================
// Construction Tests
// ============================================================================

#[test]
fn test_ring_builder_default() {
    let ring = RingBuilder::new()
        .add_node("node1")
        .add_node("node2")
        .build()
        .unwrap();

    assert_eq!(ring.node_count(), 2);
    // Default is 135 vnodes per node
    assert_eq!(ring.vnode_count(), 270);
    assert_eq!(ring.vnodes_per_node(), 135);
    assert_eq!(ring.algorithm(), HashAlgorithm::Sha256);
}

#[test]
fn test_ring_builder_custom() {
    let ring = RingBuilder::new()
        .with_vnodes(8)
        .with_algorithm(HashAlgorithm::Xxh3_128)
        .add_nodes(["node1", "node2"])
        .build()
        .unwrap();

    assert_eq!(ring.vnode_count(), 16);
    assert_eq!(ring.partitioner().name(), "xxh3-128");
    assert!(ring.tokens().iter().all(|t| t.width() == 32));
}

#[test]
fn test_ring_from_config() {
    let config = RingConfig::new(shards(3))
        .with_vnodes(10)
        .with_algorithm(HashAlgorithm::Sha512);
    let ring = HashRing::from_config(&config).unwrap();

    assert_eq!(ring.node_count(), 3);
    assert_eq!(ring.vnode_count(), 30);
}

#[test]
fn test_invalid_config() {
    let zero_vnodes = RingBuilder::new().with_vnodes(0).add_node("a").build();
    assert!(matches!(zero_vnodes, Err(Error::InvalidConfig(_))));

    let no_nodes = RingBuilder::new().build();
    assert!(matches!(no_nodes, Err(Error::InvalidConfig(_))));
}

#[test]
fn test_oversized_ring_is_rejected() {
    let overflow = HashRing::new(RingConfig::new(["a", "b"]).with_vnodes(usize::MAX));
    assert!(matches!(overflow, Err(Error::InvalidConfig(_))));

    let huge = HashRing::new(RingConfig::new(["a"]).with_vnodes(usize::MAX / 4));
    assert!(matches!(huge, Err(Error::InvalidConfig(_))));

    let too_many = RingBuilder::new()
        .with_vnodes(MAX_TOTAL_VNODES)
        .add_nodes(["a", "b"])
        .build();
    assert!(matches!(too_many, Err(Error::InvalidConfig(_))));
}

// ============================================================================
// Lookup Tests
// ============================================================================

#[test]
fn test_consistent_lookup() {
    let ring = RingBuilder::new().add_nodes(shards(5)).build().unwrap();

    let first = ring.lookup("consistent-key").unwrap().clone();
    for _ in 0..10 {
        assert_eq!(ring.lookup("consistent-key").unwrap(), &first);
    }

    // A second ring built from the same config agrees.
    let again = RingBuilder::new().add_nodes(shards(5)).build().unwrap();
    assert_eq!(again.lookup("consistent-key").unwrap(), &first);
}

#[test]
fn test_lookup_returns_present_node() {
    for algorithm in HashAlgorithm::ALL {
        let ring = RingBuilder::new()
            .with_vnodes(16)
            .with_algorithm(algorithm)
            .add_nodes(shards(3))
            .build()
            .unwrap();

        for i in 0..100 {
            let owner = ring.lookup(&format!("key{}", i)).unwrap();
            assert!(ring.nodes().contains(owner), "{} routed to {}", algorithm, owner);
        }
    }
}

#[test]
fn test_single_node() {
    let ring = RingBuilder::new().with_vnodes(4).add_node("node1").build().unwrap();

    for key in ["key1", "key2", "key3", "very-long-key-name", ""] {
        assert_eq!(ring.lookup(key).unwrap(), "node1");
    }
}

#[test]
fn test_exact_vnode_token_maps_to_its_owner() {
    let ring = RingBuilder::new()
        .with_vnodes(4)
        .add_nodes(["a", "b", "c"])
        .build()
        .unwrap();

    // The key "b#2" hashes to exactly the token of vnode 2 of "b".
    assert_eq!(ring.lookup("b#2").unwrap(), "b");
    assert_eq!(ring.lookup("c#0").unwrap(), "c");
}

#[test]
fn test_wraparound_to_first_token() {
    let ring = RingBuilder::new()
        .with_vnodes(1)
        .add_nodes(["a", "b"])
        .build()
        .unwrap();
    let tokens = ring.tokens();
    let first = tokens.first().unwrap();
    let last = tokens.last().unwrap();

    let past_end = (0..10_000)
        .map(|i| format!("probe{}", i))
        .find(|key| ring.partitioner().partition(key) > *last)
        .expect("some probe hashes past the last token");

    assert_eq!(ring.lookup(&past_end).unwrap(), ring.owner_of(first).unwrap());
}

#[test]
fn test_locate_successor() {
    let ring = RingBuilder::new()
        .with_vnodes(8)
        .add_nodes(["a", "b"])
        .build()
        .unwrap();

    // A vnode's own token resolves to that vnode.
    for token in ring.tokens() {
        assert_eq!(ring.locate(token).unwrap(), ring.owner_of(token).unwrap());
    }
}

// ============================================================================
// Mutation Tests
// ============================================================================

#[test]
fn test_add_node_and_lookup() {
    let mut ring = RingBuilder::new().with_vnodes(4).add_node("node1").build().unwrap();

    assert_eq!(ring.add_node("node2").unwrap(), 4);
    assert_eq!(ring.node_count(), 2);
    assert_eq!(ring.vnode_count(), 8);
    assert!(ring.contains_node("node2"));
}

#[test]
fn test_remove_node() {
    let mut ring = RingBuilder::new()
        .with_vnodes(4)
        .add_nodes(["node1", "node2"])
        .build()
        .unwrap();

    assert!(ring.remove_node("node1"));
    assert_eq!(ring.node_count(), 1);
    assert_eq!(ring.vnode_count(), 4);
    assert_eq!(ring.lookup("some-key").unwrap(), "node2");

    // Removing a non-existent node is a no-op
    let tokens = ring.tokens().to_vec();
    assert!(!ring.remove_node("node999"));
    assert_eq!(ring.tokens(), tokens.as_slice());
}

#[test]
fn test_remove_absent_node_keeps_routing() {
    let mut ring = RingBuilder::new().with_vnodes(32).add_nodes(shards(4)).build().unwrap();
    let keys: Vec<String> = (0..500).map(|i| format!("user{}", i)).collect();
    let before: Vec<NodeId> = keys.iter().map(|k| ring.lookup(k).unwrap().clone()).collect();

    assert!(!ring.remove_node("shard99"));

    let after: Vec<NodeId> = keys.iter().map(|k| ring.lookup(k).unwrap().clone()).collect();
    assert_eq!(before, after);
}

#[test]
fn test_empty_ring_after_removing_all() {
    let mut ring = RingBuilder::new().with_vnodes(4).add_nodes(["a", "b"]).build().unwrap();

    assert!(ring.remove_node("a"));
    assert!(ring.remove_node("b"));
    assert!(ring.is_empty());
    assert_eq!(ring.node_count(), 0);
    assert_eq!(ring.lookup("key"), Err(Error::EmptyRing));
    assert_eq!(ring.distribution(&["key"]), Err(Error::EmptyRing));
}

#[test]
fn test_add_remove_add() {
    let mut ring = RingBuilder::new().with_vnodes(4).add_node("node1").build().unwrap();
    let original = ring.tokens().to_vec();

    assert!(ring.remove_node("node1"));
    assert_eq!(ring.node_count(), 0);

    // Re-adding regenerates exactly the same tokens
    assert_eq!(ring.add_node("node1").unwrap(), 4);
    assert_eq!(ring.tokens(), original.as_slice());
    assert_eq!(ring.lookup("key").unwrap(), "node1");
}

#[test]
fn test_idempotent_add() {
    let mut ring = RingBuilder::new().with_vnodes(4).add_node("node1").build().unwrap();

    // Adding the same node again inserts nothing
    assert_eq!(ring.add_node("node1").unwrap(), 0);
    assert_eq!(ring.vnode_count(), 4);
    assert_eq!(ring.node_count(), 1);
}

// ============================================================================
// Utility Tests
// ============================================================================

#[test]
fn test_get_all_nodes() {
    let ring = RingBuilder::new()
        .with_vnodes(4)
        .add_nodes(["node2", "node1"])
        .build()
        .unwrap();

    let nodes: Vec<&str> = ring.nodes().iter().map(NodeId::as_str).collect();
    assert_eq!(nodes, vec!["node1", "node2"]);
}

#[test]
fn test_get_all_tokens() {
    let ring = RingBuilder::new().with_vnodes(4).add_node("node1").build().unwrap();

    let tokens = ring.tokens();
    assert_eq!(tokens.len(), 4);
    assert!(tokens.windows(2).all(|w| w[0] < w[1]));
    for token in tokens {
        assert_eq!(ring.owner_of(token).unwrap(), "node1");
    }
    assert_eq!(ring.vnodes_of("node1"), 4);
}
