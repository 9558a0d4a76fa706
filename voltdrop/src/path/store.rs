//! Path State Store
//!
//! The single authoritative holder of the drawn path, exposed to the
//! rest of the application only through the shared parameter store. The
//! `path` key carries a percent-encoded JSON array of `{lat,lng}`
//! vertices; the `length` key carries the geodesic length with exactly
//! two decimals.
//!
//! Empty-path semantics: the `path` key is removed outright (short
//! shareable links, unambiguous "no custom path") and `length` is
//! written as the literal `"0.00"`.

use percent_encoding::{percent_decode_str, utf8_percent_encode, NON_ALPHANUMERIC};

use crate::geo::{path_length, GeoPoint};
use crate::params::{keys, SharedParams};

/// The drawn path and its derived length.
///
/// `length_m` is always the geodesic length of `path` as of the last
/// mutation; the two are never allowed to drift.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PathState {
    pub path: Vec<GeoPoint>,
    pub length_m: f64,
}

impl PathState {
    /// Build a state from vertices, deriving the length.
    pub fn from_vertices(path: Vec<GeoPoint>) -> Self {
        let length_m = path_length(&path);
        Self { path, length_m }
    }

    pub fn is_empty(&self) -> bool {
        self.path.is_empty()
    }
}

/// Serializes [`PathState`] into the shared parameter store and back.
#[derive(Debug, Clone)]
pub struct PathStore {
    params: SharedParams,
}

impl PathStore {
    pub fn new(params: SharedParams) -> Self {
        Self { params }
    }

    /// Access the underlying shared parameters.
    pub fn params(&self) -> &SharedParams {
        &self.params
    }

    /// Restore the path from the store.
    ///
    /// An absent or malformed `path` value yields the empty state; a
    /// corrupted bookmark must never take the page down. The length is
    /// re-derived from the decoded vertices rather than trusted from the
    /// `length` key, because that key may have been hand-edited while
    /// map measuring was off.
    pub fn load(&self) -> PathState {
        let raw = {
            let params = self.params.lock().expect("param store poisoned");
            params.get(keys::PATH).map(str::to_owned)
        };
        let Some(raw) = raw else {
            return PathState::default();
        };

        let decoded = match percent_decode_str(&raw).decode_utf8() {
            Ok(d) => d.into_owned(),
            Err(e) => {
                tracing::warn!("path parameter is not valid UTF-8, treating as empty: {}", e);
                return PathState::default();
            }
        };
        match serde_json::from_str::<Vec<GeoPoint>>(&decoded) {
            Ok(path) => PathState::from_vertices(path),
            Err(e) => {
                tracing::warn!("path parameter is not a vertex array, treating as empty: {}", e);
                PathState::default()
            }
        }
    }

    /// Persist the state. Both keys are written inside one store update,
    /// so no other writer can observe a path without its matching
    /// length. Saving the same state twice is byte-identical.
    pub fn save(&self, state: &PathState) {
        let mut params = self.params.lock().expect("param store poisoned");
        if state.path.is_empty() {
            params.update(|p| {
                p.remove(keys::PATH);
                p.insert(keys::LENGTH.to_string(), "0.00".to_string());
            });
            return;
        }

        // Vertex serialization cannot fail for plain lat/lng floats.
        let json = serde_json::to_string(&state.path).expect("geo points serialize");
        let encoded = utf8_percent_encode(&json, NON_ALPHANUMERIC).to_string();
        let length = format!("{:.2}", state.length_m);
        params.update(|p| {
            p.insert(keys::PATH.to_string(), encoded.clone());
            p.insert(keys::LENGTH.to_string(), length.clone());
        });
    }
}
