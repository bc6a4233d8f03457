//! Node id generation.
//!
//! Every node id is `<prefix><integer>` with a strictly increasing integer.
//! The generator is owned by the editing session (one per tree), seeded once
//! from the maximum suffix found in a freshly loaded tree, and never reuses
//! an integer within the tree's lifetime, including across deletions.

use pagecraft_core::{Node, NodeId};

pub const DEFAULT_KEY_PREFIX: &str = "wc";

#[derive(Debug, Clone)]
pub struct KeyGenerator {
    prefix: String,
    counter: u64,
}

impl Default for KeyGenerator {
    fn default() -> Self {
        Self::new(DEFAULT_KEY_PREFIX)
    }
}

impl KeyGenerator {
    pub fn new(prefix: impl Into<String>) -> Self {
        KeyGenerator {
            prefix: prefix.into(),
            counter: 0,
        }
    }

    /// Raise the counter to at least `max`. Called once per loaded tree with
    /// the maximum numeric suffix found by the whole-tree scan; an empty tree
    /// leaves the counter at 0.
    pub fn seed(&mut self, max: u64) {
        self.counter = self.counter.max(max);
    }

    pub fn counter(&self) -> u64 {
        self.counter
    }

    /// Next fresh id, strictly greater than anything issued or scanned.
    pub fn next_id(&mut self) -> NodeId {
        self.counter += 1;
        NodeId::new(format!("{}{}", self.prefix, self.counter))
    }

    /// Assign fresh ids to a subtree, root first then children in order.
    pub fn assign(&mut self, node: &mut Node) {
        node.id = self.next_id();
        if let Some(children) = node.children.as_mut() {
            for child in children {
                self.assign(child);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_are_monotonic() {
        let mut keys = KeyGenerator::default();
        assert_eq!(keys.next_id().as_str(), "wc1");
        assert_eq!(keys.next_id().as_str(), "wc2");
        assert_eq!(keys.next_id().as_str(), "wc3");
    }

    #[test]
    fn seed_never_lowers_the_counter() {
        let mut keys = KeyGenerator::default();
        keys.seed(7);
        keys.seed(3);
        assert_eq!(keys.next_id().as_str(), "wc8");
    }

    #[test]
    fn assign_walks_the_whole_subtree() {
        let mut keys = KeyGenerator::default();
        keys.seed(2);

        let mut part = Node::new("Row")
            .with_child(Node::new("Text"))
            .with_child(Node::new("Image"));
        keys.assign(&mut part);

        assert_eq!(part.id.as_str(), "wc3");
        let ids: Vec<_> = part
            .child_nodes()
            .iter()
            .map(|c| c.id.as_str().to_string())
            .collect();
        assert_eq!(ids, vec!["wc4", "wc5"]);
    }

    #[test]
    fn custom_prefix_is_respected() {
        let mut keys = KeyGenerator::new("node");
        assert_eq!(keys.next_id().as_str(), "node1");
    }
}
