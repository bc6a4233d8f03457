//! The locate-and-apply dispatcher.
//!
//! Every structural operation on a page tree goes through [`locate_and_apply`]:
//! one traversal that finds the target node by id and applies a tagged
//! operation at its parent's children sequence. Nesting in hand-built pages
//! stays shallow, so a simple explicit worklist is enough.
//!
//! The worklist is seeded with a synthetic root wrapping the top-level
//! sequence and popped from the end, so sibling batches are consumed LIFO.
//! Callers must not assume a global left-to-right breadth-first order; the
//! only guarantee is "first match in traversal order wins", and ids are
//! unique so ties cannot occur.

use crate::keys::KeyGenerator;
use pagecraft_core::{Node, NodeId};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

/// Which mapping of the matched node an edit writes into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum EditSection {
    Style,
    Props,
}

/// One key/value write from a property panel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldEdit {
    pub key: String,
    pub value: Value,
}

impl FieldEdit {
    pub fn new(key: impl Into<String>, value: impl Into<Value>) -> Self {
        FieldEdit {
            key: key.into(),
            value: value.into(),
        }
    }
}

/// Where a dragged subtree lands relative to the drop target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DropRelation {
    /// New last child of the target.
    Inside,
    /// Sibling immediately before the target.
    Before,
    /// Sibling immediately after the target.
    After,
}

/// Tagged operation consumed by the dispatcher. Each variant carries exactly
/// the payload it needs.
#[derive(Debug)]
pub enum TreeOp<'k> {
    /// Flip the matched node's `hidden` flag (set if clear, clear if set).
    ToggleVisibility,

    /// Return a snapshot of the matched node; the tree is untouched.
    Locate,

    /// Write each edit into the matched node's style or props mapping.
    ApplyEdits {
        section: EditSection,
        edits: Vec<FieldEdit>,
    },

    /// Detach the matched node from its parent and return it. The subtree
    /// keeps its ids and may be re-inserted elsewhere (drag payload).
    Delete,

    /// Assign fresh ids to `subtree` and append it to the matched node's
    /// children, creating the sequence if absent.
    Insert {
        subtree: Node,
        keys: &'k mut KeyGenerator,
    },

    /// Move the matched node among its siblings by `offset`, clamped to the
    /// valid index range. Out-of-range offsets clamp rather than error.
    Reposition { offset: isize },

    /// Attach an already-keyed subtree relative to the matched node.
    DragRelocate {
        subtree: Node,
        relation: DropRelation,
    },

    /// Parent and visible siblings of the matched node, for the alignment
    /// ruler overlay.
    RulerContext,

    /// Visit every node, seed `keys` with the maximum numeric id suffix, and
    /// return that maximum. Ignores the target; must run once per freshly
    /// loaded tree before any insert.
    ScanMaxSuffix { keys: &'k mut KeyGenerator },
}

impl TreeOp<'_> {
    fn tag(&self) -> &'static str {
        match self {
            TreeOp::ToggleVisibility => "toggle_visibility",
            TreeOp::Locate => "locate",
            TreeOp::ApplyEdits { .. } => "apply_edits",
            TreeOp::Delete => "delete",
            TreeOp::Insert { .. } => "insert",
            TreeOp::Reposition { .. } => "reposition",
            TreeOp::DragRelocate { .. } => "drag_relocate",
            TreeOp::RulerContext => "ruler_context",
            TreeOp::ScanMaxSuffix { .. } => "scan_max_suffix",
        }
    }
}

/// Context for drawing alignment guides around the matched node.
#[derive(Debug, Clone, PartialEq)]
pub struct RulerView {
    /// Containing node, or `None` when the match is top-level.
    pub parent: Option<Node>,
    /// Visible siblings, excluding the matched node itself.
    pub siblings: Vec<Node>,
}

/// What an operation produced.
#[derive(Debug, PartialEq)]
pub enum TreeOutcome {
    /// The tree was mutated in place.
    Mutated,
    Located(Node),
    Removed(Node),
    Inserted(NodeId),
    Ruler(RulerView),
    MaxSuffix(u64),
}

/// Locate `target` and apply `op` at its parent.
///
/// Returns `None` when the target id is absent (the tree is left unchanged);
/// `ScanMaxSuffix` ignores the target and always succeeds.
pub fn locate_and_apply(
    tree: &mut Vec<Node>,
    target: Option<&NodeId>,
    op: TreeOp<'_>,
) -> Option<TreeOutcome> {
    debug!(op = op.tag(), target = target.map(|t| t.as_str()), "tree op");

    let scanning = matches!(op, TreeOp::ScanMaxSuffix { .. });
    let mut max_suffix: u64 = 0;
    // (path to the container, index of the match in its children)
    let mut found: Option<(Vec<usize>, usize)> = None;

    // Worklist of index paths to container nodes; the empty path is the
    // synthetic root wrapping the top-level sequence.
    let mut worklist: Vec<Vec<usize>> = vec![Vec::new()];

    'search: while let Some(path) = worklist.pop() {
        let children = children_at(tree, &path);

        for (index, child) in children.iter().enumerate() {
            if scanning {
                if let Some(suffix) = child.id.numeric_suffix() {
                    max_suffix = max_suffix.max(suffix);
                }
            } else if target.map(|t| t == &child.id).unwrap_or(false) {
                found = Some((path, index));
                break 'search;
            }

            let mut child_path = path.clone();
            child_path.push(index);
            worklist.push(child_path);
        }
    }

    let op = match op {
        TreeOp::ScanMaxSuffix { keys } => {
            keys.seed(max_suffix);
            return Some(TreeOutcome::MaxSuffix(max_suffix));
        }
        other => other,
    };

    let (path, index) = found?;

    let outcome = match op {
        TreeOp::ToggleVisibility => {
            let child = &mut children_vec_at(tree, &path)[index];
            child.hidden = if child.is_hidden() { None } else { Some(true) };
            TreeOutcome::Mutated
        }

        TreeOp::Locate => TreeOutcome::Located(children_at(tree, &path)[index].clone()),

        TreeOp::ApplyEdits { section, edits } => {
            let child = &mut children_vec_at(tree, &path)[index];
            let map = match section {
                EditSection::Style => &mut child.style,
                EditSection::Props => &mut child.props,
            };
            for edit in edits {
                map.insert(edit.key, edit.value);
            }
            TreeOutcome::Mutated
        }

        TreeOp::Delete => {
            let children = children_vec_at(tree, &path);
            TreeOutcome::Removed(children.remove(index))
        }

        TreeOp::Insert { mut subtree, keys } => {
            keys.assign(&mut subtree);
            let id = subtree.id.clone();
            children_vec_at(tree, &path)[index]
                .children_mut()
                .push(subtree);
            TreeOutcome::Inserted(id)
        }

        TreeOp::Reposition { offset } => {
            let children = children_vec_at(tree, &path);
            let last = children.len() as isize - 1;
            let node = children.remove(index);
            let dest = (index as isize + offset).clamp(0, last) as usize;
            children.insert(dest, node);
            TreeOutcome::Mutated
        }

        TreeOp::DragRelocate { subtree, relation } => {
            let children = children_vec_at(tree, &path);
            match relation {
                DropRelation::Inside => children[index].children_mut().push(subtree),
                DropRelation::Before => children.insert(index, subtree),
                DropRelation::After => children.insert(index + 1, subtree),
            }
            TreeOutcome::Mutated
        }

        TreeOp::RulerContext => {
            let parent = if path.is_empty() {
                None
            } else {
                Some(node_at(tree, &path).clone())
            };
            let siblings = children_at(tree, &path)
                .iter()
                .enumerate()
                .filter(|(i, sibling)| *i != index && !sibling.is_hidden())
                .map(|(_, sibling)| sibling.clone())
                .collect();
            TreeOutcome::Ruler(RulerView { parent, siblings })
        }

        // Handled above.
        TreeOp::ScanMaxSuffix { .. } => unreachable!(),
    };

    Some(outcome)
}

/// Children slice of the container at `path` (the tree itself for the
/// synthetic root).
fn children_at<'t>(tree: &'t [Node], path: &[usize]) -> &'t [Node] {
    let mut nodes = tree;
    for &i in path {
        nodes = nodes[i].child_nodes();
    }
    nodes
}

/// Mutable children sequence of the container at `path`. Paths only ever
/// point at containers discovered through existing children.
fn children_vec_at<'t>(tree: &'t mut Vec<Node>, path: &[usize]) -> &'t mut Vec<Node> {
    let mut nodes = tree;
    for &i in path {
        nodes = nodes[i].children_mut();
    }
    nodes
}

/// The container node at a non-empty `path`.
fn node_at<'t>(tree: &'t [Node], path: &[usize]) -> &'t Node {
    let (last, rest) = path.split_last().unwrap();
    &children_at(tree, rest)[*last]
}
