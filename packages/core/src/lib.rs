//! # Pagecraft Core
//!
//! Shared data model for the Pagecraft page builder.
//!
//! A page is a JSON tree of component configurations. Each [`Node`] names a
//! component from an external catalog and carries its style, props, and
//! ordered children. The editor crate mutates this tree; the compiler crate
//! renders it.
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │ core: Node tree + catalog + page document   │
//! └─────────────────────────────────────────────┘
//!            ↓                        ↓
//! ┌──────────────────────┐ ┌──────────────────────┐
//! │ editor: tree ops     │ │ compiler: tree →     │
//! │ (insert/drag/edit)   │ │ render tree          │
//! └──────────────────────┘ └──────────────────────┘
//! ```
//!
//! The persisted form is plain nested JSON records; everything derived for
//! presentation (outline labels, render boxes) lives outside this crate and
//! is never written back.

mod catalog;
mod node;
mod page;

pub use catalog::{Catalog, CatalogEntry, ComponentMenu, PartConfig};
pub use node::{Node, NodeId, PropMap, StyleMap};
pub use page::PageDocument;
