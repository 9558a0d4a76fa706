//! Shared Application Parameters
//!
//! A small injectable key-value store standing in for the URL query
//! string that makes calculator state shareable and bookmarkable. Both
//! the calculator inputs and the map-measured path live here, so the
//! sizing side and the path side can never disagree about the circuit
//! length.
//!
//! Serialization is deterministic (keys sorted, stable percent
//! encoding), which makes repeated saves byte-identical. Writers follow
//! last-write-wins; there is no merging of concurrent edits.

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};

use percent_encoding::{percent_decode_str, utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use tokio::sync::broadcast;

/// Query-string component encoding: unreserved characters pass through,
/// everything else is percent-encoded.
const QUERY_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

/// Well-known parameter keys used by the calculator and the path editor.
pub mod keys {
    pub const AMPS: &str = "amps";
    pub const VOLTS: &str = "volts";
    pub const LENGTH: &str = "length";
    pub const PERCENTAGE_DROP: &str = "percentage_drop";
    pub const PHASE: &str = "phase";
    pub const MATERIAL: &str = "material";
    pub const WIRING_METHOD: &str = "wiring_method";
    pub const PATH: &str = "path";
}

/// Notification that a committed update touched the listed keys.
#[derive(Debug, Clone)]
pub struct ParamChange {
    pub keys: Vec<String>,
}

/// Ordered key-value parameter store with change notification.
#[derive(Debug)]
pub struct ParamStore {
    params: BTreeMap<String, String>,
    change_tx: broadcast::Sender<ParamChange>,
}

/// Handle shared between the calculator caller and the path editor.
pub type SharedParams = Arc<Mutex<ParamStore>>;

impl Default for ParamStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ParamStore {
    pub fn new() -> Self {
        let (change_tx, _) = broadcast::channel(64);
        Self {
            params: BTreeMap::new(),
            change_tx,
        }
    }

    /// Parse a serialized query string. Malformed pairs are skipped, not
    /// fatal; an unparsable store must never take the application down.
    pub fn from_query_string(query: &str) -> Self {
        let mut store = Self::new();
        for pair in query.trim_start_matches('?').split('&') {
            if pair.is_empty() {
                continue;
            }
            let (raw_key, raw_value) = pair.split_once('=').unwrap_or((pair, ""));
            let key = match percent_decode_str(raw_key).decode_utf8() {
                Ok(k) => k.into_owned(),
                Err(e) => {
                    tracing::warn!("skipping undecodable parameter key {:?}: {}", raw_key, e);
                    continue;
                }
            };
            let value = match percent_decode_str(raw_value).decode_utf8() {
                Ok(v) => v.into_owned(),
                Err(e) => {
                    tracing::warn!("skipping undecodable value for {:?}: {}", key, e);
                    continue;
                }
            };
            store.params.insert(key, value);
        }
        store
    }

    /// Serialize to a query string. Keys iterate in sorted order, so the
    /// output is stable for a given state.
    pub fn to_query_string(&self) -> String {
        self.params
            .iter()
            .map(|(k, v)| {
                format!(
                    "{}={}",
                    utf8_percent_encode(k, QUERY_COMPONENT),
                    utf8_percent_encode(v, QUERY_COMPONENT)
                )
            })
            .collect::<Vec<_>>()
            .join("&")
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.params.get(key).map(String::as_str)
    }

    pub fn set(&mut self, key: &str, value: &str) {
        self.update(|params| {
            params.insert(key.to_string(), value.to_string());
        });
    }

    pub fn remove(&mut self, key: &str) {
        self.update(|params| {
            params.remove(key);
        });
    }

    /// Apply a multi-key mutation as one unit and notify subscribers
    /// once. Gesture handlers use this so a vertex change and its length
    /// rewrite land together.
    pub fn update<F>(&mut self, f: F)
    where
        F: FnOnce(&mut BTreeMap<String, String>),
    {
        let before = self.params.clone();
        f(&mut self.params);

        let mut changed: Vec<String> = Vec::new();
        for (key, value) in &self.params {
            if before.get(key) != Some(value) {
                changed.push(key.clone());
            }
        }
        for key in before.keys() {
            if !self.params.contains_key(key) {
                changed.push(key.clone());
            }
        }
        if !changed.is_empty() {
            // No receivers is fine; nobody has subscribed yet.
            let _ = self.change_tx.send(ParamChange { keys: changed });
        }
    }

    /// Subscribe to committed updates. Receivers that fall behind miss
    /// events rather than block writers.
    pub fn subscribe(&self) -> broadcast::Receiver<ParamChange> {
        self.change_tx.subscribe()
    }

    pub fn shared(self) -> SharedParams {
        Arc::new(Mutex::new(self))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_trip() {
        let mut store = ParamStore::new();
        store.set(keys::AMPS, "15");
        store.set(keys::VOLTS, "120");
        store.set(keys::LENGTH, "10.50");

        let serialized = store.to_query_string();
        let restored = ParamStore::from_query_string(&serialized);
        assert_eq!(restored.get(keys::AMPS), Some("15"));
        assert_eq!(restored.get(keys::VOLTS), Some("120"));
        assert_eq!(restored.get(keys::LENGTH), Some("10.50"));
    }

    #[test]
    fn test_serialization_is_deterministic() {
        let mut a = ParamStore::new();
        a.set("volts", "240");
        a.set("amps", "30");

        let mut b = ParamStore::new();
        b.set("amps", "30");
        b.set("volts", "240");

        assert_eq!(a.to_query_string(), b.to_query_string());
        assert_eq!(a.to_query_string(), "amps=30&volts=240");
    }

    #[test]
    fn test_reserved_characters_are_encoded() {
        let mut store = ParamStore::new();
        store.set("path", "[{\"lat\":1}]");
        let serialized = store.to_query_string();
        assert!(!serialized.contains('['));
        assert!(!serialized.contains('{'));

        let restored = ParamStore::from_query_string(&serialized);
        assert_eq!(restored.get("path"), Some("[{\"lat\":1}]"));
    }

    #[test]
    fn test_malformed_pairs_are_skipped() {
        let store = ParamStore::from_query_string("amps=10&&junk&volts=120");
        assert_eq!(store.get("amps"), Some("10"));
        assert_eq!(store.get("volts"), Some("120"));
        // A bare word parses as a key with an empty value.
        assert_eq!(store.get("junk"), Some(""));
    }

    #[test]
    fn test_leading_question_mark_tolerated() {
        let store = ParamStore::from_query_string("?amps=10");
        assert_eq!(store.get("amps"), Some("10"));
    }

    #[test]
    fn test_update_notifies_once_with_all_keys() {
        let mut store = ParamStore::new();
        let mut rx = store.subscribe();

        store.update(|params| {
            params.insert("length".into(), "12.34".into());
            params.insert("path".into(), "x".into());
        });

        let change = rx.try_recv().expect("one change event");
        assert!(change.keys.contains(&"length".to_string()));
        assert!(change.keys.contains(&"path".to_string()));
        assert!(rx.try_recv().is_err(), "exactly one event per update");
    }

    #[test]
    fn test_remove_notifies() {
        let mut store = ParamStore::new();
        store.set("path", "x");
        let mut rx = store.subscribe();
        store.remove("path");
        let change = rx.try_recv().expect("removal event");
        assert_eq!(change.keys, vec!["path".to_string()]);
    }

    #[test]
    fn test_noop_update_does_not_notify() {
        let mut store = ParamStore::new();
        store.set("amps", "10");
        let mut rx = store.subscribe();
        store.set("amps", "10");
        assert!(rx.try_recv().is_err());
    }
}
