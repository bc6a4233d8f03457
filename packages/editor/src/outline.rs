//! Derived outline view for a tree widget.
//!
//! Maps the page tree to label/visibility records, one per node. This is a
//! presentation-only projection and is never written back to the persisted
//! tree.

use pagecraft_core::{Catalog, Node, NodeId};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OutlineNode {
    pub id: NodeId,
    /// `<catalog display name>(<numeric id suffix>)`, e.g. `Banner(3)`.
    pub label: String,
    pub visible: bool,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<OutlineNode>,
}

pub fn outline<C: Catalog>(tree: &[Node], catalog: &C) -> Vec<OutlineNode> {
    tree.iter().map(|node| outline_node(node, catalog)).collect()
}

fn outline_node<C: Catalog>(node: &Node, catalog: &C) -> OutlineNode {
    let display_name = catalog
        .lookup(&node.component_name)
        .map(|entry| entry.display_name.as_str())
        .unwrap_or(node.component_name.as_str());
    let suffix = node
        .id
        .numeric_suffix()
        .map(|n| n.to_string())
        .unwrap_or_default();

    OutlineNode {
        id: node.id.clone(),
        label: format!("{display_name}({suffix})"),
        visible: !node.is_hidden(),
        children: outline(node.child_nodes(), catalog),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pagecraft_core::{CatalogEntry, ComponentMenu};

    #[test]
    fn labels_combine_display_name_and_suffix() {
        let menu =
            ComponentMenu::new().with_entry("Banner", CatalogEntry::new("Carousel banner"));
        let tree = vec![Node::new("Banner")
            .with_id("wc3")
            .with_child(Node::new("Unknown").with_id("wc4").with_hidden(true))];

        let view = outline(&tree, &menu);

        assert_eq!(view[0].label, "Carousel banner(3)");
        assert!(view[0].visible);
        // Unknown components fall back to their raw name
        assert_eq!(view[0].children[0].label, "Unknown(4)");
        assert!(!view[0].children[0].visible);
    }
}
