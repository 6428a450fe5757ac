//! Per-request session context.
//!
//! The original system propagates `session` to nodes via a dynamically-scoped
//! variable so call sites never have to thread it explicitly. A systems
//! language has no equivalent that is both safe and simple, so this crate
//! takes the redesign the specification calls for: `Session` travels as an
//! explicit field on [`crate::node::NodeContext`], passed to every
//! `process` call. This removes the need for task-local storage and makes a
//! node trivially testable — construct a `Session`, call `process`, inspect
//! what changed.
//!
//! A `Session` is created once per inbound HTTP request and is shared (via
//! `Arc<Mutex<_>>`, see [`SharedSession`]) across every activation launched
//! for that request's traversal; it is *not* shared across requests. Mutations
//! are last-writer-wins, matching §5 ("Shared Resources") of the
//! specification — the core makes no attempt at finer-grained conflict
//! resolution.

use serde_json::Value;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

/// A request-scoped mapping from string keys to arbitrary JSON values.
///
/// Identity is logical — callers typically key a session by a client-supplied
/// `guid` — but `Session` itself holds no identifier; that's the caller's
/// concern (the request pipeline keeps a `guid -> SharedSession` mapping only
/// long enough to read it back into outbound frames, and does not persist it
/// beyond the request).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Session {
    fields: HashMap<String, Value>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a session from the JSON object supplied in an inbound request body.
    pub fn from_json(value: Value) -> Self {
        let fields = match value {
            Value::Object(map) => map.into_iter().collect(),
            _ => HashMap::new(),
        };
        Self { fields }
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    pub fn set(&mut self, key: impl Into<String>, value: Value) {
        self.fields.insert(key.into(), value);
    }

    /// Serialize back to the JSON object shape every outbound frame carries.
    pub fn to_json(&self) -> Value {
        Value::Object(self.fields.clone().into_iter().collect())
    }
}

/// A `Session` shared across every activation of one traversal.
///
/// Cloning a `SharedSession` clones the handle, not the data — all clones see
/// the same underlying map, satisfying the "task-local, not process-global"
/// requirement: distinct concurrent requests each construct their own
/// `SharedSession`, but activations within one traversal share one.
#[derive(Debug, Clone)]
pub struct SharedSession(Arc<Mutex<Session>>);

impl SharedSession {
    pub fn new(session: Session) -> Self {
        Self(Arc::new(Mutex::new(session)))
    }

    pub fn get(&self, key: &str) -> Option<Value> {
        self.0.lock().unwrap().get(key).cloned()
    }

    pub fn set(&self, key: impl Into<String>, value: Value) {
        self.0.lock().unwrap().set(key, value);
    }

    pub fn to_json(&self) -> Value {
        self.0.lock().unwrap().to_json()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn session_round_trips_from_request_json() {
        let session = Session::from_json(json!({"guid": "abc", "locale": "en-US"}));
        assert_eq!(session.get("guid"), Some(&json!("abc")));
        assert_eq!(session.to_json()["locale"], json!("en-US"));
    }

    #[test]
    fn shared_session_mutations_are_visible_across_clones() {
        let shared = SharedSession::new(Session::new());
        let clone = shared.clone();

        clone.set("cart_id", json!("cart-1"));

        assert_eq!(shared.get("cart_id"), Some(json!("cart-1")));
    }
}
