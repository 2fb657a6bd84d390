//! Seams to the router and the state container.
use crate::Payload;
use serde_json::Value;
use std::sync::Arc;

pub trait Router: Send + Sync {
    fn navigate_to(&self, path: &str);
}

/// Anything that accepts dispatched records and exposes a state snapshot.
pub trait StateSink: Send + Sync {
    fn dispatch(&self, record: Payload);
    fn state(&self) -> Value;
}

impl<T: Router + ?Sized> Router for Arc<T> {
    fn navigate_to(&self, path: &str) {
        (**self).navigate_to(path)
    }
}

impl<T: StateSink + ?Sized> StateSink for Arc<T> {
    fn dispatch(&self, record: Payload) {
        (**self).dispatch(record)
    }

    fn state(&self) -> Value {
        (**self).state()
    }
}
