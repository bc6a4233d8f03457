//! # Pagecraft Editor
//!
//! Tree editing engine for Pagecraft pages.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │ core: Node tree + catalog                   │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ editor: session + tree operations           │
//! │  - One locate-and-apply dispatcher          │
//! │  - Key generation (unique node ids)         │
//! │  - Part building from catalog defaults      │
//! │  - Capability/cycle validation              │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ compiler: tree → render tree                │
//! └─────────────────────────────────────────────┘
//! ```
//!
//! ## Core principles
//!
//! 1. **The JSON tree is the source of truth**: every edit is a mutation of
//!    the tree; rendering is a derived view.
//! 2. **One search strategy**: all operations go through a single traversal
//!    that locates a node by id and applies a tagged operation at its parent.
//! 3. **Validated before mutated**: capability and cycle checks run before
//!    anything is detached, so a rejected operation leaves the tree intact.
//! 4. **No global key state**: each session owns its [`KeyGenerator`], so
//!    independent trees never share a counter.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use pagecraft_editor::{EditSession, FieldEdit};
//! use pagecraft_core::{ComponentMenu, PartConfig};
//!
//! let mut session = EditSession::load(tree, menu);
//! let new_id = session.insert_part(&target, &PartConfig::new("Banner"))?;
//! session.edit_style(&new_id, vec![FieldEdit::new("height", "240px")])?;
//! ```

mod errors;
mod keys;
mod outline;
mod part;
mod search;
mod session;

pub use errors::EditorError;
pub use keys::{KeyGenerator, DEFAULT_KEY_PREFIX};
pub use outline::{outline, OutlineNode};
pub use part::build_part;
pub use search::{
    locate_and_apply, DropRelation, EditSection, FieldEdit, RulerView, TreeOp, TreeOutcome,
};
pub use session::EditSession;

// Re-export the data model for convenience
pub use pagecraft_core::{Catalog, CatalogEntry, ComponentMenu, Node, NodeId, PartConfig};
