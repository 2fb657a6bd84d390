//! Redux-style state container.
//!
//! # Purpose
//! Combines named reducers into one state object, applies every dispatched
//! record to each reducer's slice, and notifies subscribers afterwards.
//!
//! # Key invariants
//! - The state is a JSON object with exactly one key per reducer.
//! - Reducers see only their own slice (`null` before initialisation).
//! - Listeners run after the new state is published and outside any lock,
//!   so a listener may dispatch again.
//!
//! # Examples
//! ```rust
//! use reframed_store::{Action, Reducers, Store, StateSink};
//! use serde_json::{Value, json};
//!
//! let store = Store::new(Reducers::new().with("count", |state: &Value, record: &serde_json::Map<String, Value>| {
//!     let count = state.as_i64().unwrap_or(0);
//!     match record.get("type").and_then(Value::as_str) {
//!         Some("INCREMENT") => json!(count + 1),
//!         _ => json!(count),
//!     }
//! }));
//! store.dispatch(Action::new("INCREMENT").merged_over(Default::default()));
//! assert_eq!(store.state(), json!({ "count": 1 }));
//! ```
use crate::action::TYPE_FIELD;
use crate::{Payload, StateSink};
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, PoisonError, RwLock};

/// Record dispatched once at construction to collect initial slices.
pub const INIT_ACTION: &str = "@@reframed/INIT";

pub trait Reducer: Send + Sync {
    fn reduce(&self, state: &Value, record: &Payload) -> Value;
}

impl<F> Reducer for F
where
    F: Fn(&Value, &Payload) -> Value + Send + Sync,
{
    fn reduce(&self, state: &Value, record: &Payload) -> Value {
        self(state, record)
    }
}

/// Named reducers, combined in key order.
#[derive(Default)]
pub struct Reducers(BTreeMap<String, Box<dyn Reducer>>);

impl Reducers {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, name: impl Into<String>, reducer: impl Reducer + 'static) -> Self {
        self.0.insert(name.into(), Box::new(reducer));
        self
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

pub type Listener = Arc<dyn Fn(&Value) + Send + Sync>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

pub struct Store {
    reducers: Reducers,
    state: RwLock<Value>,
    dispatching: Mutex<()>,
    listeners: RwLock<Vec<(SubscriptionId, Listener)>>,
    next_subscription: AtomicU64,
}

impl Store {
    pub fn new(reducers: Reducers) -> Self {
        let store = Self {
            reducers,
            state: RwLock::new(Value::Object(Map::new())),
            dispatching: Mutex::new(()),
            listeners: RwLock::new(Vec::new()),
            next_subscription: AtomicU64::new(0),
        };
        let mut init = Payload::new();
        init.insert(TYPE_FIELD.to_string(), Value::String(INIT_ACTION.to_string()));
        store.apply(&init);
        store
    }

    pub fn subscribe(&self, listener: impl Fn(&Value) + Send + Sync + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.next_subscription.fetch_add(1, Ordering::Relaxed));
        self.listeners
            .write()
            .expect("listeners lock")
            .push((id, Arc::new(listener)));
        id
    }

    /// Returns `false` if the subscription was already removed.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let mut listeners = self.listeners.write().expect("listeners lock");
        let before = listeners.len();
        listeners.retain(|(entry, _)| *entry != id);
        listeners.len() != before
    }

    /// Current state snapshot.
    pub fn state(&self) -> Value {
        self.state.read().expect("state lock").clone()
    }

    fn apply(&self, record: &Payload) -> Value {
        // Serializes dispatches; reducers run outside the state lock.
        let _gate = self
            .dispatching
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        let current = self.state();
        let mut next = Map::with_capacity(self.reducers.len());
        for (name, reducer) in &self.reducers.0 {
            let slice = current.get(name).unwrap_or(&Value::Null);
            next.insert(name.clone(), reducer.reduce(slice, record));
        }
        let next = Value::Object(next);
        *self.state.write().expect("state lock") = next.clone();
        next
    }

    fn notify(&self, state: &Value) {
        // Snapshot so listeners can subscribe or dispatch without deadlocking.
        let listeners: Vec<Listener> = self
            .listeners
            .read()
            .expect("listeners lock")
            .iter()
            .map(|(_, listener)| listener.clone())
            .collect();
        for listener in listeners {
            listener(state);
        }
    }
}

impl StateSink for Store {
    fn dispatch(&self, record: Payload) {
        let state = self.apply(&record);
        self.notify(&state);
    }

    fn state(&self) -> Value {
        Store::state(self)
    }
}

/// Build a shared store, subscribe `listener`, and call it once with the
/// initial state.
pub fn create_store(
    reducers: Reducers,
    listener: impl Fn(&Value) + Send + Sync + 'static,
) -> Arc<Store> {
    let store = Arc::new(Store::new(reducers));
    store.subscribe(listener);
    let state = store.state();
    store.notify(&state);
    store
}
