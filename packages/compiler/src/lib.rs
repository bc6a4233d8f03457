//! # Pagecraft Compiler
//!
//! Compiles a page's JSON configuration tree into a render tree.
//!
//! ## Purpose
//!
//! Each visible [`pagecraft_core::Node`] becomes a [`RenderBox`]: a placeholder
//! wrapper sized by the node's style, whose component implementation is
//! resolved asynchronously and mounted into the box once loaded. Hidden nodes
//! produce no output at all. Nodes flagged `lazy` sit behind a one-shot
//! deferred-mount gate released by a viewport-visibility signal, so off-screen
//! components are not fetched until scrolled near.
//!
//! ## Degradation contract
//!
//! Resolution failure is never fatal to the render path: the box simply stays
//! in its placeholder state. Retry policy, if any, belongs to the resolver
//! collaborator.
//!
//! Per-node resolutions are independent; one slow or failing component never
//! blocks another. If a node is deleted while its resolution is in flight,
//! the result is discarded on arrival; a node re-inserted by a drag is live
//! again and mounts normally.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use pagecraft_compiler::PageCompiler;
//!
//! let compiler = PageCompiler::new(resolver);
//! let page = compiler.compile(session.tree());
//! compiler.mount(&page).await;
//! ```

mod compile;
mod lazy;
mod render;
mod resolver;
mod style;

pub use compile::{CompiledPage, PageCompiler};
pub use lazy::{LazyBoundary, LazyGate, ViewportEvent};
pub use render::{MountCell, MountState, MountedComponent, RenderBox, RenderChild, PAGE_ENV};
pub use resolver::{ComponentModule, ComponentResolver, ResolveError};
pub use style::{computed_style, placeholder_height};
