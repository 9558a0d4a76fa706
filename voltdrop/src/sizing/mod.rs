//! Conductor Sizing Module
//!
//! Implements the K-factor voltage-drop method: a per-unit-length
//! resistance/reactance factor table per conductor material and wiring
//! method, plus the pure calculation layer that resolves a circuit's
//! electrical parameters to the smallest adequate gauge.

pub mod engine;
pub mod table;

pub use engine::*;
pub use table::*;
