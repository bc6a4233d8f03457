//! The page compiler: JSON tree → render tree + mount driving.

use crate::lazy::{LazyBoundary, LazyGate};
use crate::render::{MountCell, MountedComponent, RenderBox, RenderChild, PAGE_ENV};
use crate::resolver::ComponentResolver;
use crate::style::{computed_style, is_truthy, placeholder_height};
use futures_util::future::join_all;
use pagecraft_core::{Node, NodeId, PropMap};
use std::collections::HashSet;
use std::sync::RwLock;
use tracing::{debug, warn};

/// Compiled form of one tree snapshot: the render roots plus the mount work
/// the driver still has to perform.
pub struct CompiledPage {
    pub roots: Vec<RenderChild>,
    tasks: Vec<MountTask>,
}

impl CompiledPage {
    pub fn pending_mounts(&self) -> usize {
        self.tasks.iter().filter(|t| !t.cell.is_mounted()).count()
    }

    /// Find a render child by node id.
    pub fn find(&self, id: &NodeId) -> Option<&RenderChild> {
        fn walk<'a>(children: &'a [RenderChild], id: &NodeId) -> Option<&'a RenderChild> {
            for child in children {
                if &child.node.id == id {
                    return Some(child);
                }
                if let Some(found) = walk(&child.node.children, id) {
                    return Some(found);
                }
            }
            None
        }
        walk(&self.roots, id)
    }
}

struct MountTask {
    id: NodeId,
    component_name: String,
    props: PropMap,
    cell: MountCell,
    gate: Option<LazyGate>,
}

pub struct PageCompiler<R> {
    resolver: R,
    /// Ids present in the most recently compiled tree. Resolutions landing
    /// after their node disappeared are discarded; a re-inserted node (drag)
    /// is live again and mounts normally.
    live: RwLock<HashSet<NodeId>>,
}

impl<R: ComponentResolver> PageCompiler<R> {
    pub fn new(resolver: R) -> Self {
        PageCompiler {
            resolver,
            live: RwLock::new(HashSet::new()),
        }
    }

    /// Build the render tree for a tree snapshot and refresh the live set.
    ///
    /// Synchronous: every box starts as a placeholder. Hidden nodes are
    /// absent from the output entirely, children included.
    pub fn compile(&self, tree: &[Node]) -> CompiledPage {
        // The live set must always match the latest tree, even after a
        // panicked holder poisoned the lock; stale ids would let discarded
        // resolutions commit.
        let mut live = self
            .live
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        live.clear();
        let mut stack: Vec<&Node> = tree.iter().collect();
        while let Some(node) = stack.pop() {
            live.insert(node.id.clone());
            stack.extend(node.child_nodes());
        }
        drop(live);

        let mut tasks = Vec::new();
        let roots = compile_level(tree, &mut tasks);
        debug!(boxes = tasks.len(), "compiled page");
        CompiledPage { roots, tasks }
    }

    /// Drive every mount to completion: eager nodes resolve immediately,
    /// lazy nodes first await their gate. Resolutions are independent; one
    /// failure or slow load never blocks another.
    pub async fn mount(&self, page: &CompiledPage) {
        join_all(page.tasks.iter().map(|task| self.run(task))).await;
    }

    async fn run(&self, task: &MountTask) {
        if let Some(gate) = &task.gate {
            gate.entered().await;
        }

        match self.resolver.resolve(&task.component_name).await {
            Ok(module) => {
                if !self.is_live(&task.id) {
                    debug!(id = task.id.as_str(), "node gone before mount; discarding");
                    return;
                }
                task.cell.commit(MountedComponent {
                    module,
                    props: task.props.clone(),
                    env: PAGE_ENV,
                });
            }
            Err(err) => {
                // Placeholder stays up; retrying is the resolver's business.
                warn!(
                    id = task.id.as_str(),
                    component = task.component_name.as_str(),
                    error = %err,
                    "component resolution failed"
                );
            }
        }
    }

    fn is_live(&self, id: &NodeId) -> bool {
        self.live
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .contains(id)
    }
}

fn compile_level(nodes: &[Node], tasks: &mut Vec<MountTask>) -> Vec<RenderChild> {
    nodes
        .iter()
        .filter(|node| !node.is_hidden())
        .map(|node| {
            let children = compile_level(node.child_nodes(), tasks);

            let boundary = node
                .props
                .get("lazy")
                .map(is_truthy)
                .unwrap_or(false)
                .then(|| LazyBoundary {
                    placeholder_height: placeholder_height(&node.style),
                    gate: LazyGate::new(),
                });

            let cell = MountCell::new();
            tasks.push(MountTask {
                id: node.id.clone(),
                component_name: node.component_name.clone(),
                props: node.props.clone(),
                cell: cell.clone(),
                gate: boundary.as_ref().map(|b| b.gate.clone()),
            });

            RenderChild {
                boundary,
                node: RenderBox {
                    id: node.id.clone(),
                    style: computed_style(&node.style),
                    mount: cell,
                    children,
                },
            }
        })
        .collect()
}
