//! End-to-end compiler tests with a stub resolver.

use async_trait::async_trait;
use pagecraft_compiler::{
    ComponentModule, ComponentResolver, MountState, PageCompiler, ResolveError, ViewportEvent,
    PAGE_ENV,
};
use pagecraft_core::{Node, NodeId};
use serde_json::json;
use std::collections::HashSet;

/// Resolves every component immediately, except the names it is told to
/// fail.
struct StubResolver {
    failing: HashSet<String>,
}

impl StubResolver {
    fn new() -> Self {
        StubResolver {
            failing: HashSet::new(),
        }
    }

    fn failing(names: &[&str]) -> Self {
        StubResolver {
            failing: names.iter().map(|n| n.to_string()).collect(),
        }
    }
}

#[async_trait]
impl ComponentResolver for StubResolver {
    async fn resolve(&self, component_name: &str) -> Result<ComponentModule, ResolveError> {
        if self.failing.contains(component_name) {
            return Err(ResolveError::LoadFailed {
                name: component_name.to_string(),
                reason: "network error".to_string(),
            });
        }
        Ok(ComponentModule::new(component_name))
    }
}

fn id(s: &str) -> NodeId {
    NodeId::new(s)
}

#[tokio::test]
async fn eager_nodes_mount_with_env_marker_and_props() {
    let tree = vec![Node::new("Banner")
        .with_id("wc1")
        .with_prop("interval", 3)];

    let compiler = PageCompiler::new(StubResolver::new());
    let page = compiler.compile(&tree);

    // placeholder until mounted
    let child = page.find(&id("wc1")).unwrap();
    assert!(!child.is_lazy());
    assert_eq!(child.node.mount.snapshot(), MountState::Pending);

    compiler.mount(&page).await;

    match page.find(&id("wc1")).unwrap().node.mount.snapshot() {
        MountState::Mounted(mounted) => {
            assert_eq!(mounted.module, ComponentModule::new("Banner"));
            assert_eq!(mounted.env, PAGE_ENV);
            assert_eq!(mounted.props["interval"], json!(3));
        }
        MountState::Pending => panic!("expected mounted component"),
    }
}

#[tokio::test]
async fn hidden_nodes_are_fully_absent_from_the_output() {
    let tree = vec![
        Node::new("Banner").with_id("wc1").with_hidden(true),
        Node::new("Text").with_id("wc2"),
    ];

    let compiler = PageCompiler::new(StubResolver::new());
    let page = compiler.compile(&tree);

    assert!(page.find(&id("wc1")).is_none());
    assert!(page.find(&id("wc2")).is_some());
    assert_eq!(page.roots.len(), 1);
}

#[tokio::test]
async fn lazy_boundary_takes_its_height_from_style() {
    let tree = vec![
        Node::new("Banner")
            .with_id("wc1")
            .with_prop("lazy", true)
            .with_style("height", "120px"),
        Node::new("Text").with_id("wc2").with_prop("lazy", true),
    ];

    let compiler = PageCompiler::new(StubResolver::new());
    let page = compiler.compile(&tree);

    let banner = page.find(&id("wc1")).unwrap();
    assert_eq!(banner.boundary.as_ref().unwrap().placeholder_height, 120.0);

    // no height configured: minimal positive placeholder
    let text = page.find(&id("wc2")).unwrap();
    assert_eq!(text.boundary.as_ref().unwrap().placeholder_height, 1.0);
}

#[tokio::test]
async fn lazy_nodes_wait_for_their_gate() {
    let tree = vec![Node::new("Banner").with_id("wc1").with_prop("lazy", true)];

    let compiler = PageCompiler::new(StubResolver::new());
    let page = compiler.compile(&tree);
    let gate = page
        .find(&id("wc1"))
        .unwrap()
        .boundary
        .as_ref()
        .unwrap()
        .gate
        .clone();

    assert!(!gate.is_released());
    assert_eq!(page.pending_mounts(), 1);

    // `Left` must not release the gate; `Entered` must, exactly once.
    gate.observe(ViewportEvent::Left);
    assert!(!gate.is_released());
    gate.observe(ViewportEvent::Entered);

    compiler.mount(&page).await;
    assert!(page.find(&id("wc1")).unwrap().node.mount.is_mounted());
    assert_eq!(page.pending_mounts(), 0);
}

#[tokio::test]
async fn viewport_event_before_any_mount_waiter_is_not_dropped() {
    let tree = vec![Node::new("Banner").with_id("wc1").with_prop("lazy", true)];

    let compiler = PageCompiler::new(StubResolver::new());
    let page = compiler.compile(&tree);

    // The observer reports Entered before mount() has subscribed any
    // waiter; the event must stick rather than vanish.
    let boundary = page.find(&id("wc1")).unwrap().boundary.as_ref().unwrap();
    boundary.gate.observe(ViewportEvent::Entered);
    assert!(boundary.gate.is_released());

    compiler.mount(&page).await;
    assert!(page.find(&id("wc1")).unwrap().node.mount.is_mounted());
}

#[tokio::test]
async fn mount_in_progress_wakes_when_the_gate_releases() {
    let tree = vec![Node::new("Banner").with_id("wc1").with_prop("lazy", true)];

    let compiler = PageCompiler::new(StubResolver::new());
    let page = compiler.compile(&tree);
    let gate = page
        .find(&id("wc1"))
        .unwrap()
        .boundary
        .as_ref()
        .unwrap()
        .gate
        .clone();

    // mount() is polled first and parks on the gate; the release must wake
    // it and let the node resolve.
    tokio::join!(compiler.mount(&page), async {
        gate.observe(ViewportEvent::Entered);
    });

    assert!(page.find(&id("wc1")).unwrap().node.mount.is_mounted());
    assert_eq!(page.pending_mounts(), 0);
}

#[tokio::test]
async fn lazy_false_resolves_without_a_boundary() {
    let tree = vec![Node::new("Banner").with_id("wc1").with_prop("lazy", false)];

    let compiler = PageCompiler::new(StubResolver::new());
    let page = compiler.compile(&tree);

    assert!(!page.find(&id("wc1")).unwrap().is_lazy());

    compiler.mount(&page).await;
    assert!(page.find(&id("wc1")).unwrap().node.mount.is_mounted());
}

#[tokio::test]
async fn resolution_failure_stays_in_placeholder_state() {
    let tree = vec![
        Node::new("Broken").with_id("wc1"),
        Node::new("Banner").with_id("wc2"),
    ];

    let compiler = PageCompiler::new(StubResolver::failing(&["Broken"]));
    let page = compiler.compile(&tree);
    compiler.mount(&page).await;

    // one failure never blocks the other node
    assert_eq!(
        page.find(&id("wc1")).unwrap().node.mount.snapshot(),
        MountState::Pending
    );
    assert!(page.find(&id("wc2")).unwrap().node.mount.is_mounted());
}

#[tokio::test]
async fn in_flight_resolution_of_a_deleted_node_is_discarded() {
    let tree = vec![
        Node::new("Banner").with_id("wc1"),
        Node::new("Text").with_id("wc2"),
    ];

    let compiler = PageCompiler::new(StubResolver::new());
    let stale = compiler.compile(&tree);

    // wc1 is deleted before its mount completes; recompiling refreshes the
    // live set.
    let trimmed = vec![Node::new("Text").with_id("wc2")];
    let _current = compiler.compile(&trimmed);

    compiler.mount(&stale).await;

    assert_eq!(
        stale.find(&id("wc1")).unwrap().node.mount.snapshot(),
        MountState::Pending
    );
    assert!(stale.find(&id("wc2")).unwrap().node.mount.is_mounted());
}

#[tokio::test]
async fn a_dragged_node_reinserted_elsewhere_still_mounts() {
    let tree = vec![Node::new("Row")
        .with_id("wc1")
        .with_child(Node::new("Banner").with_id("wc2"))];

    let compiler = PageCompiler::new(StubResolver::new());
    let stale = compiler.compile(&tree);

    // wc2 moves to the top level; it is still present, so its in-flight
    // resolution must land.
    let moved = vec![
        Node::new("Row").with_id("wc1"),
        Node::new("Banner").with_id("wc2"),
    ];
    let _current = compiler.compile(&moved);

    compiler.mount(&stale).await;
    assert!(stale.find(&id("wc2")).unwrap().node.mount.is_mounted());
}

#[tokio::test]
async fn background_image_is_forwarded_as_a_computed_reference() {
    let tree = vec![Node::new("Banner")
        .with_id("wc1")
        .with_style("backgroundImage", "cdn/banner.png")
        .with_style("color", "#fff")];

    let compiler = PageCompiler::new(StubResolver::new());
    let page = compiler.compile(&tree);

    let style = &page.find(&id("wc1")).unwrap().node.style;
    assert_eq!(style["backgroundImage"], json!("url(cdn/banner.png)"));
    assert_eq!(style["color"], json!("#fff"));
}

#[tokio::test]
async fn children_compile_recursively_under_their_parent_box() {
    let tree = vec![Node::new("Row")
        .with_id("wc1")
        .with_child(Node::new("Text").with_id("wc2"))
        .with_child(Node::new("Banner").with_id("wc3").with_hidden(true))];

    let compiler = PageCompiler::new(StubResolver::new());
    let page = compiler.compile(&tree);

    let row = page.find(&id("wc1")).unwrap();
    let child_ids: Vec<_> = row
        .node
        .children
        .iter()
        .map(|c| c.node.id.as_str())
        .collect();
    assert_eq!(child_ids, vec!["wc2"]);
}
