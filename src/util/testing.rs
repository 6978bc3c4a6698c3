//! Test support: one-time tracing setup shared by unit and integration tests.

use std::sync::Once;
use tracing::{debug, info};
use tracing_subscriber::{
    fmt::{self, format::FmtSpan},
    prelude::*,
    EnvFilter,
};

use crate::domain::{build_tree, Forest, Node, NodeId};

static TEST_SETUP: Once = Once::new();

pub fn init_test_setup() {
    TEST_SETUP.call_once(|| {
        setup_test_logging();
        info!("Test Setup complete");
    });
}

fn setup_test_logging() {
    // RUST_LOG wins; otherwise only this crate, at debug
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("dndtree=debug"));

    let subscriber = tracing_subscriber::registry().with(
        fmt::layer()
            .with_test_writer()
            .with_target(true)
            .with_thread_names(false)
            .with_span_events(FmtSpan::CLOSE)
            .with_filter(env_filter),
    );

    // Only set if we haven't already set a global subscriber
    if tracing::dispatcher::has_been_set() {
        debug!("Tracing subscriber already set");
    } else {
        subscriber.try_init().unwrap_or_else(|e| {
            eprintln!("Error: Failed to set up logging: {}", e);
        });
    }
}

/// Flat node list from `(id, parent, label)` triples.
pub fn flat_nodes(spec: &[(NodeId, Option<NodeId>, &str)]) -> Vec<Node<String>> {
    spec.iter()
        .map(|&(id, parent, label)| Node::new(id, parent, label.to_string()))
        .collect()
}

/// Forest `1 -> [2, 3]`, `2 -> [4, 5, 6]`, labelled `n<id>`.
pub fn sample_forest() -> Forest<String> {
    let nodes = flat_nodes(&[
        (1, None, "n1"),
        (2, Some(1), "n2"),
        (3, Some(1), "n3"),
        (4, Some(2), "n4"),
        (5, Some(2), "n5"),
        (6, Some(2), "n6"),
    ]);
    build_tree(nodes).unwrap_or_default()
}

/// `(id, child ids)` per node in pre-order, for compact structural asserts.
pub fn shape<T>(forest: &Forest<T>) -> Vec<(NodeId, Vec<NodeId>)> {
    forest
        .iter()
        .map(|(_, node)| (node.id, node.child_ids()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_test_setup() {
        init_test_setup();
    }

    #[test]
    fn sample_forest_has_expected_shape() {
        let forest = sample_forest();
        assert_eq!(forest.len(), 6);
        assert_eq!(forest.root_ids(), vec![1]);
    }
}
