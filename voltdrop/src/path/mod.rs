//! Map-Measured Path Module
//!
//! The user can derive the circuit length by drawing a route on the map
//! instead of typing it. This module keeps the drawn path, its geodesic
//! length, and the shared parameter store in lockstep:
//!
//! - [`store::PathStore`] serializes the path into the shared
//!   parameters (the `path` and `length` keys) and restores it.
//! - [`editor::PathEditor`] is the gesture-driven state machine that
//!   mutates the path and persists every mutation synchronously.

pub mod editor;
pub mod store;

pub use editor::{EditorMode, PathEditor};
pub use store::{PathState, PathStore};
