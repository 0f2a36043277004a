#![forbid(unsafe_code)]

//! Core: item ids, input events, the tree index contract, and tree-order
//! algorithms for Arbor.
//!
//! # Primary responsibilities
//!
//! - **Index**: the read-only [`TreeIndex`](index::TreeIndex) contract hosts
//!   implement over their own tree, plus derived navigation queries.
//! - **Tree**: an arena [`ItemTree`](tree::ItemTree) implementing the contract.
//! - **Order**: document (pre-order) comparison of two arbitrary items.
//! - **Range**: selectable items between two endpoints.
//! - **Event**: the input events forwarded to selection callbacks.
//!
//! # Design principles
//!
//! - **No I/O**: everything is pure data + logic over borrowed indexes.
//! - **Ids, not pointers**: callers hold [`ItemId`](id::ItemId)s and re-query
//!   the index on every operation.
//! - **`#![forbid(unsafe_code)]`**: safety enforced at compile time.

pub mod event;
pub mod id;
pub mod index;
pub mod logging;
pub mod order;
pub mod range;
pub mod tree;

pub use event::{
    InputEvent, KeyCode, KeyEvent, KeyEventKind, Modifiers, MouseButton, MouseEvent,
    MouseEventKind,
};
pub use id::ItemId;
pub use index::TreeIndex;
pub use order::{compare_document_order, order_pair};
pub use range::range_between;
pub use tree::{ItemTree, TreeError, TreeItem};

// Re-export tracing macros at crate root for ergonomic use.
#[cfg(feature = "tracing")]
pub use logging::{debug, debug_span, trace, trace_span, warn};
