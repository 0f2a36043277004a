#![forbid(unsafe_code)]

//! Selection engine for Arbor tree views.
//!
//! # Primary responsibilities
//!
//! - **Value**: single- and multi-select values and their set view.
//! - **Model**: controlled and uncontrolled ownership of the value.
//! - **Transition**: pure single/multi/range/select-all/arrow-step transitions.
//! - **Propagate**: optional selection propagation to descendants and parents.
//! - **Engine**: commits transitions and notifies listeners.
//! - **Keyboard / Pointer**: map input events onto engine operations.
//!
//! # Role in Arbor
//!
//! `arbor-select` sits on top of `arbor-core`. It never owns the tree: every
//! operation borrows a [`TreeIndex`](arbor_core::TreeIndex) for the duration
//! of the call and holds only item ids between calls.

pub mod config;
pub mod engine;
pub mod keyboard;
pub mod model;
pub mod notify;
pub mod pointer;
pub mod propagate;
pub mod session;
pub mod transition;
pub mod value;

pub use config::{SelectionConfig, SelectionPropagation};
pub use engine::SelectionEngine;
pub use keyboard::{ExpansionRequest, KeyOutcome, KeyboardConfig, KeyboardNavigator};
pub use model::{SelectionModel, ValueSource};
pub use notify::{ItemToggleCallback, SelectionChange, SelectionChangeCallback, SelectionListeners};
pub use session::SelectionSession;
pub use transition::SelectionState;
pub use value::{SelectedSet, SelectionMode, SelectionValue};

#[allow(unused_imports)]
pub(crate) use arbor_core::{debug, trace, warn};
