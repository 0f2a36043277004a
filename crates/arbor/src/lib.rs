#![forbid(unsafe_code)]

//! Arbor public facade crate.
//!
//! Re-exports the tree index contract, the arena tree and the selection
//! engine, and offers a lightweight prelude for day-to-day usage.
//!
//! ```
//! use arbor::prelude::*;
//!
//! let tree = ItemTree::from_items(vec![
//!     TreeItem::new("src").child(TreeItem::new("main.rs")),
//!     TreeItem::new("Cargo.toml"),
//! ])?;
//!
//! let mut engine = SelectionEngine::new(SelectionConfig::multi());
//! engine.select(&InputEvent::Programmatic, &"main.rs".into(), false, &tree);
//! assert!(engine.is_selected(&"main.rs".into()));
//! # Ok::<(), arbor::Error>(())
//! ```

use std::fmt;

// --- Core re-exports -------------------------------------------------------

pub use arbor_core::event::{
    InputEvent, KeyCode, KeyEvent, KeyEventKind, Modifiers, MouseButton, MouseEvent,
    MouseEventKind,
};
pub use arbor_core::id::ItemId;
pub use arbor_core::index::TreeIndex;
pub use arbor_core::order::{compare_document_order, order_pair};
pub use arbor_core::range::{range_between, range_from_first, range_to_last};
pub use arbor_core::tree::{ItemTree, TreeError, TreeItem};

// --- Selection re-exports --------------------------------------------------

pub use arbor_select::pointer::{handle_checkbox_toggle, handle_click};
pub use arbor_select::{
    ExpansionRequest, KeyOutcome, KeyboardConfig, KeyboardNavigator, SelectionChange,
    SelectionConfig, SelectionEngine, SelectionListeners, SelectionMode, SelectionPropagation,
    SelectionValue,
};

// --- Errors ---------------------------------------------------------------

/// Top-level error type for Arbor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Structural misuse of an [`ItemTree`].
    Tree(TreeError),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Tree(err) => write!(f, "{err}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Tree(err) => Some(err),
        }
    }
}

impl From<TreeError> for Error {
    fn from(err: TreeError) -> Self {
        Self::Tree(err)
    }
}

/// Standard result type for Arbor APIs.
pub type Result<T> = std::result::Result<T, Error>;

// --- Prelude --------------------------------------------------------------

pub mod prelude {
    pub use crate::{
        Error, InputEvent, ItemId, ItemTree, KeyCode, KeyEvent, KeyboardNavigator, Modifiers,
        MouseEvent, Result, SelectionConfig, SelectionEngine, SelectionListeners,
        SelectionValue, TreeIndex, TreeItem,
    };

    pub use crate::{core, select};
}

pub use arbor_core as core;
pub use arbor_select as select;
