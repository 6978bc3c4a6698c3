//! Text rendering of trees via `termtree`.

use std::fmt::Display;

use termtree::Tree;
use tracing::instrument;

use crate::domain::forest::Forest;
use crate::domain::node::Node;

pub trait TreeNodeConvert {
    /// Render as a `termtree` tree; `show_ids` prefixes labels with `[id]`.
    fn to_tree_string(&self, show_ids: bool) -> Tree<String>;
}

fn label<T: Display>(node: &Node<T>, show_ids: bool) -> String {
    if show_ids {
        format!("[{}] {}", node.id, node.data)
    } else {
        node.data.to_string()
    }
}

impl<T: Display> TreeNodeConvert for Node<T> {
    #[instrument(level = "trace", skip_all, fields(id = self.id))]
    fn to_tree_string(&self, show_ids: bool) -> Tree<String> {
        let leaves: Vec<_> = self
            .children
            .iter()
            .map(|c| c.to_tree_string(show_ids))
            .collect();

        Tree::new(label(self, show_ids)).with_leaves(leaves)
    }
}

// Roots hang off a synthetic "." node, the way `tree` prints a directory.
impl<T: Display> TreeNodeConvert for Forest<T> {
    fn to_tree_string(&self, show_ids: bool) -> Tree<String> {
        if self.is_empty() {
            return Tree::new("Empty tree".to_string());
        }
        let leaves: Vec<_> = self
            .roots()
            .iter()
            .map(|root| root.to_tree_string(show_ids))
            .collect();
        Tree::new(".".to_string()).with_leaves(leaves)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::build_tree;

    #[test]
    fn renders_nested_labels() {
        let forest = build_tree(vec![
            Node::root(1, "docs"),
            Node::new(2, Some(1), "work"),
        ])
        .unwrap();

        let text = forest.to_tree_string(true).to_string();

        assert!(text.starts_with(".\n"));
        assert!(text.contains("[1] docs"));
        assert!(text.contains("[2] work"));
    }

    #[test]
    fn empty_forest_renders_placeholder() {
        let forest: Forest<String> = Forest::default();
        assert_eq!(forest.to_tree_string(false).to_string().trim(), "Empty tree");
    }
}
