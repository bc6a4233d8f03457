//! Render tree produced by the compiler.
//!
//! A [`RenderBox`] is the placeholder wrapper around one component instance:
//! it exists as soon as the page compiles, sized by the node's computed
//! style, while the component implementation arrives asynchronously through
//! its [`MountCell`].

use crate::lazy::LazyBoundary;
use crate::resolver::ComponentModule;
use pagecraft_core::{NodeId, PropMap, StyleMap};
use std::sync::{Arc, RwLock};

/// Marker injected into every mounted component's props.
pub const PAGE_ENV: &str = "page";

/// A component implementation mounted into its box, with the forwarded props
/// and the environment marker.
#[derive(Debug, Clone, PartialEq)]
pub struct MountedComponent {
    pub module: ComponentModule,
    pub props: PropMap,
    pub env: &'static str,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub enum MountState {
    /// Implementation not resolved (yet, or ever, on resolver failure): the
    /// box renders as an inert placeholder with no inner content.
    #[default]
    Pending,
    Mounted(MountedComponent),
}

/// Shared slot the mount driver writes into once resolution completes.
#[derive(Debug, Clone, Default)]
pub struct MountCell {
    inner: Arc<RwLock<MountState>>,
}

impl MountCell {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn snapshot(&self) -> MountState {
        self.inner
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    pub fn is_mounted(&self) -> bool {
        matches!(self.snapshot(), MountState::Mounted(_))
    }

    pub(crate) fn commit(&self, mounted: MountedComponent) {
        *self
            .inner
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner()) = MountState::Mounted(mounted);
    }
}

/// One visible node's renderable form.
#[derive(Debug, Clone)]
pub struct RenderBox {
    pub id: NodeId,
    /// Computed style (background reference normalized).
    pub style: StyleMap,
    pub mount: MountCell,
    pub children: Vec<RenderChild>,
}

/// A render box plus its optional deferred-mount boundary.
#[derive(Debug, Clone)]
pub struct RenderChild {
    pub boundary: Option<LazyBoundary>,
    pub node: RenderBox,
}

impl RenderChild {
    pub fn is_lazy(&self) -> bool {
        self.boundary.is_some()
    }
}
