//! Deferred-mount gating for lazy nodes.
//!
//! A lazy node's resolution is held behind a [`LazyGate`] until the viewport
//! observer reports that its placeholder entered the viewport. The gate is
//! one-shot: once released it never re-defers, even if the node later leaves
//! the viewport again.

use std::sync::Arc;
use tokio::sync::watch;

/// Event delivered by the viewport-observer collaborator, one per lazy
/// boundary. Only `Entered` is consumed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewportEvent {
    Entered,
    Left,
}

#[derive(Debug, Clone)]
pub struct LazyGate {
    tx: Arc<watch::Sender<bool>>,
}

impl Default for LazyGate {
    fn default() -> Self {
        Self::new()
    }
}

impl LazyGate {
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(false);
        LazyGate { tx: Arc::new(tx) }
    }

    /// Feed a viewport event into the gate. `Left` is ignored; the gate
    /// never re-defers once released.
    pub fn observe(&self, event: ViewportEvent) {
        if event == ViewportEvent::Entered {
            self.release();
        }
    }

    pub fn release(&self) {
        // send_replace stores the value even when nobody is subscribed yet;
        // an Entered event must never be lost to a waiter that arrives late.
        self.tx.send_replace(true);
    }

    pub fn is_released(&self) -> bool {
        *self.tx.borrow()
    }

    /// Resolves once the gate has been released. Returns immediately if it
    /// already has.
    pub async fn entered(&self) {
        let mut rx = self.tx.subscribe();
        while !*rx.borrow_and_update() {
            if rx.changed().await.is_err() {
                return;
            }
        }
    }
}

/// Deferred-mount wrapper around a lazy node, sized by the numeric prefix of
/// the node's configured `style.height` so the placeholder occupies realistic
/// space before the component mounts.
#[derive(Debug, Clone)]
pub struct LazyBoundary {
    pub placeholder_height: f64,
    pub gate: LazyGate,
}
