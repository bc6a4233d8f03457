//! Asynchronous component resolution.
//!
//! The compiler never loads component code itself; it asks an external
//! resolver collaborator (a module loader, a network fetch, a test stub).

use async_trait::async_trait;
use thiserror::Error;

/// Opaque handle to a loaded component implementation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComponentModule {
    pub name: String,
}

impl ComponentModule {
    pub fn new(name: impl Into<String>) -> Self {
        ComponentModule { name: name.into() }
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ResolveError {
    #[error("no implementation registered for component '{0}'")]
    NotFound(String),

    #[error("failed to load component '{name}': {reason}")]
    LoadFailed { name: String, reason: String },
}

/// Supplied by the component-loading collaborator. Failures leave the node
/// in its placeholder state; the compiler does not retry.
#[async_trait]
pub trait ComponentResolver: Send + Sync {
    async fn resolve(&self, component_name: &str) -> Result<ComponentModule, ResolveError>;
}
