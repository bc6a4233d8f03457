//! # Edit session
//!
//! Owns one page tree and everything whose lifetime matches it: the key
//! generator, the catalog handle, the current selection, and a version
//! counter that increments on every successful mutation.
//!
//! The session is the policy layer over the raw dispatcher: it validates
//! capability and cycle constraints *before* mutating, so a rejected
//! operation always leaves the tree exactly as it was.

use crate::errors::EditorError;
use crate::keys::KeyGenerator;
use crate::outline::{outline, OutlineNode};
use crate::part::build_part;
use crate::search::{
    locate_and_apply, DropRelation, EditSection, FieldEdit, RulerView, TreeOp, TreeOutcome,
};
use pagecraft_core::{Catalog, Node, NodeId, PageDocument, PartConfig};
use tracing::{debug, warn};

pub struct EditSession<C> {
    tree: Vec<Node>,
    keys: KeyGenerator,
    catalog: C,
    version: u64,
    selected: Option<NodeId>,
    pid: Option<String>,
    page: Option<String>,
}

impl<C: Catalog> EditSession<C> {
    /// Take ownership of a freshly loaded tree. Runs the whole-tree suffix
    /// scan exactly once so subsequent inserts cannot collide with existing
    /// ids.
    pub fn load(tree: Vec<Node>, catalog: C) -> Self {
        Self::load_with_generator(tree, catalog, KeyGenerator::default())
    }

    pub fn load_with_generator(mut tree: Vec<Node>, catalog: C, mut keys: KeyGenerator) -> Self {
        if let Some(TreeOutcome::MaxSuffix(max)) =
            locate_and_apply(&mut tree, None, TreeOp::ScanMaxSuffix { keys: &mut keys })
        {
            debug!(max_suffix = max, "seeded key generator");
        }

        EditSession {
            tree,
            keys,
            catalog,
            version: 0,
            selected: None,
            pid: None,
            page: None,
        }
    }

    pub fn from_document(doc: PageDocument, catalog: C) -> Self {
        let mut session = Self::load(doc.tree, catalog);
        session.pid = doc.pid;
        session.page = doc.page;
        session
    }

    /// Persisted form of the current state. Derived views (outline labels,
    /// render boxes) are never part of this.
    pub fn to_document(&self) -> PageDocument {
        PageDocument {
            pid: self.pid.clone(),
            page: self.page.clone(),
            tree: self.tree.clone(),
        }
    }

    pub fn tree(&self) -> &[Node] {
        &self.tree
    }

    pub fn version(&self) -> u64 {
        self.version
    }

    pub fn catalog(&self) -> &C {
        &self.catalog
    }

    pub fn selected(&self) -> Option<&NodeId> {
        self.selected.as_ref()
    }

    /// Snapshot of a node by id.
    pub fn locate(&mut self, id: &NodeId) -> Result<Node, EditorError> {
        match locate_and_apply(&mut self.tree, Some(id), TreeOp::Locate) {
            Some(TreeOutcome::Located(node)) => Ok(node),
            _ => Err(EditorError::NodeNotFound(id.clone())),
        }
    }

    /// Select a node, returning its snapshot.
    pub fn select(&mut self, id: &NodeId) -> Result<Node, EditorError> {
        let node = self.locate(id)?;
        self.selected = Some(id.clone());
        Ok(node)
    }

    pub fn toggle_visibility(&mut self, id: &NodeId) -> Result<(), EditorError> {
        match locate_and_apply(&mut self.tree, Some(id), TreeOp::ToggleVisibility) {
            Some(TreeOutcome::Mutated) => {
                self.version += 1;
                Ok(())
            }
            _ => Err(EditorError::NodeNotFound(id.clone())),
        }
    }

    pub fn edit_style(&mut self, id: &NodeId, edits: Vec<FieldEdit>) -> Result<(), EditorError> {
        self.apply_edits(id, EditSection::Style, edits)
    }

    pub fn edit_props(&mut self, id: &NodeId, edits: Vec<FieldEdit>) -> Result<(), EditorError> {
        self.apply_edits(id, EditSection::Props, edits)
    }

    fn apply_edits(
        &mut self,
        id: &NodeId,
        section: EditSection,
        edits: Vec<FieldEdit>,
    ) -> Result<(), EditorError> {
        match locate_and_apply(
            &mut self.tree,
            Some(id),
            TreeOp::ApplyEdits { section, edits },
        ) {
            Some(TreeOutcome::Mutated) => {
                self.version += 1;
                Ok(())
            }
            _ => Err(EditorError::NodeNotFound(id.clone())),
        }
    }

    /// Detach a node and return the subtree (ids intact, reusable as a drag
    /// payload).
    pub fn delete(&mut self, id: &NodeId) -> Result<Node, EditorError> {
        match locate_and_apply(&mut self.tree, Some(id), TreeOp::Delete) {
            Some(TreeOutcome::Removed(node)) => {
                if self
                    .selected
                    .as_ref()
                    .map(|sel| node.contains(sel))
                    .unwrap_or(false)
                {
                    self.selected = None;
                }
                self.version += 1;
                Ok(node)
            }
            _ => Err(EditorError::NodeNotFound(id.clone())),
        }
    }

    /// Build a part from the catalog and insert it under `target`.
    ///
    /// The target's catalog entry must allow children; the check runs before
    /// any mutation.
    pub fn insert_part(
        &mut self,
        target: &NodeId,
        config: &PartConfig,
    ) -> Result<NodeId, EditorError> {
        let parent = self.locate(target)?;
        self.require_child_capability(&parent)?;

        let part = build_part(config, &self.catalog)?;
        match locate_and_apply(
            &mut self.tree,
            Some(target),
            TreeOp::Insert {
                subtree: part,
                keys: &mut self.keys,
            },
        ) {
            Some(TreeOutcome::Inserted(id)) => {
                self.version += 1;
                Ok(id)
            }
            _ => Err(EditorError::NodeNotFound(target.clone())),
        }
    }

    /// Move a node among its siblings; out-of-range offsets clamp.
    pub fn reposition(&mut self, id: &NodeId, offset: isize) -> Result<(), EditorError> {
        match locate_and_apply(&mut self.tree, Some(id), TreeOp::Reposition { offset }) {
            Some(TreeOutcome::Mutated) => {
                self.version += 1;
                Ok(())
            }
            _ => Err(EditorError::NodeNotFound(id.clone())),
        }
    }

    /// Relocate `dragged` relative to `target`.
    ///
    /// Atomic: the dragged node is only detached after the target has been
    /// found, the capability check has passed (for `Inside`), and the drop
    /// is known not to land inside the dragged subtree itself.
    pub fn drag(
        &mut self,
        dragged: &NodeId,
        target: &NodeId,
        relation: DropRelation,
    ) -> Result<(), EditorError> {
        let dragged_node = self.locate(dragged)?;
        if dragged_node.contains(target) {
            warn!(
                dragged = dragged.as_str(),
                target = target.as_str(),
                "drop rejected: cycle"
            );
            return Err(EditorError::CycleDetected {
                dragged: dragged.clone(),
                target: target.clone(),
            });
        }

        let target_node = self.locate(target)?;
        if relation == DropRelation::Inside {
            self.require_child_capability(&target_node)?;
        }

        let removed = match locate_and_apply(&mut self.tree, Some(dragged), TreeOp::Delete) {
            Some(TreeOutcome::Removed(node)) => node,
            _ => return Err(EditorError::NodeNotFound(dragged.clone())),
        };

        match locate_and_apply(
            &mut self.tree,
            Some(target),
            TreeOp::DragRelocate {
                subtree: removed,
                relation,
            },
        ) {
            Some(TreeOutcome::Mutated) => {
                self.version += 1;
                Ok(())
            }
            // The target was validated above and the model is single
            // threaded; keep the error path anyway.
            _ => Err(EditorError::NodeNotFound(target.clone())),
        }
    }

    /// Parent and visible siblings of a node, for the alignment overlay.
    pub fn ruler_context(&mut self, id: &NodeId) -> Result<RulerView, EditorError> {
        match locate_and_apply(&mut self.tree, Some(id), TreeOp::RulerContext) {
            Some(TreeOutcome::Ruler(view)) => Ok(view),
            _ => Err(EditorError::NodeNotFound(id.clone())),
        }
    }

    /// Derived tree-widget view of the current tree.
    pub fn outline(&self) -> Vec<OutlineNode> {
        outline(&self.tree, &self.catalog)
    }

    fn require_child_capability(&self, node: &Node) -> Result<(), EditorError> {
        let entry = self
            .catalog
            .lookup(&node.component_name)
            .ok_or_else(|| EditorError::UnknownComponent(node.component_name.clone()))?;
        if !entry.has_child_capability {
            return Err(EditorError::ChildrenNotAllowed(node.component_name.clone()));
        }
        Ok(())
    }
}
