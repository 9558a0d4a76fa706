//! Path Editor
//!
//! Gesture-driven state machine over the drawn path. Every accepted
//! mutation recomputes the geodesic length and persists path and length
//! together, synchronously, before the next gesture can run.
//!
//! While disabled the editor is inert: gestures are ignored and nothing
//! is written to the shared store, because the user is expected to be
//! typing the length by hand and an editor write would clobber it.

use crate::geo::{path_length, GeoPoint};
use crate::map::{GestureBinding, MapEvent};
use crate::path::store::{PathState, PathStore};

/// Editor lifecycle states.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditorMode {
    /// No vertices; waiting for the first click.
    Idle,
    /// At least one vertex; accepting further points.
    Drawing,
    /// Map-length mode is off; the path is preserved but not mutated.
    Disabled,
}

/// Interactive controller binding map gestures to path mutations.
#[derive(Debug)]
pub struct PathEditor {
    store: PathStore,
    state: PathState,
    mode: EditorMode,
}

impl PathEditor {
    /// Restore the editor from the store. `enabled` reflects the
    /// "use map for length" toggle.
    pub fn new(store: PathStore, enabled: bool) -> Self {
        let state = store.load();
        let mode = if !enabled {
            EditorMode::Disabled
        } else if state.is_empty() {
            EditorMode::Idle
        } else {
            EditorMode::Drawing
        };
        Self { store, state, mode }
    }

    pub fn mode(&self) -> EditorMode {
        self.mode
    }

    pub fn path(&self) -> &[GeoPoint] {
        &self.state.path
    }

    pub fn length_m(&self) -> f64 {
        self.state.length_m
    }

    /// Append a vertex (map click). Returns whether the gesture was
    /// accepted.
    pub fn add_vertex(&mut self, point: GeoPoint) -> bool {
        if self.mode == EditorMode::Disabled {
            return false;
        }
        self.state.path.push(point);
        self.recompute_and_save();
        self.mode = EditorMode::Drawing;
        true
    }

    /// Replace an existing vertex (drag). Out-of-range indices are
    /// ignored.
    pub fn move_vertex(&mut self, index: usize, point: GeoPoint) -> bool {
        if self.mode == EditorMode::Disabled || index >= self.state.path.len() {
            return false;
        }
        self.state.path[index] = point;
        self.recompute_and_save();
        true
    }

    /// Delete a vertex. Removal of the last vertex forces the length to
    /// exactly zero and performs the empty-path save (length "0.00",
    /// path key removed) in the same store update as the removal.
    pub fn remove_vertex(&mut self, index: usize) -> bool {
        if self.mode == EditorMode::Disabled || index >= self.state.path.len() {
            return false;
        }
        self.state.path.remove(index);
        if self.state.path.is_empty() {
            self.state.length_m = 0.0;
            self.mode = EditorMode::Idle;
            self.store.save(&self.state);
        } else {
            self.recompute_and_save();
        }
        true
    }

    /// Empty the path unconditionally (right-click or Escape).
    pub fn clear_all(&mut self) -> bool {
        if self.mode == EditorMode::Disabled {
            return false;
        }
        self.state.path.clear();
        self.state.length_m = 0.0;
        self.mode = EditorMode::Idle;
        self.store.save(&self.state);
        true
    }

    /// Toggle map-length mode.
    ///
    /// Disabling makes the editor inert without touching the store.
    /// Enabling reloads the path from the store: the path, not the
    /// possibly hand-edited length value, is the unit of truth once
    /// editing resumes.
    pub fn set_enabled(&mut self, enabled: bool) {
        if !enabled {
            self.mode = EditorMode::Disabled;
            return;
        }
        self.state = self.store.load();
        self.mode = if self.state.is_empty() {
            EditorMode::Idle
        } else {
            EditorMode::Drawing
        };
    }

    /// Apply one map gesture.
    pub fn handle_event(&mut self, event: MapEvent) {
        match event {
            MapEvent::Click(point) => {
                self.add_vertex(point);
            }
            MapEvent::RightClick | MapEvent::EscapeKey => {
                self.clear_all();
            }
            MapEvent::VertexMoved { index, point } => {
                self.move_vertex(index, point);
            }
            MapEvent::VertexRemoved { index } => {
                self.remove_vertex(index);
            }
        }
    }

    /// Drain a gesture binding and apply every pending event in order.
    pub fn pump(&mut self, binding: &mut GestureBinding) {
        for event in binding.drain() {
            self.handle_event(event);
        }
    }

    fn recompute_and_save(&mut self) {
        self.state.length_m = path_length(&self.state.path);
        self.store.save(&self.state);
    }
}
