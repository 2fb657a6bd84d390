//! Routes actions to the router or the state sink.
//!
//! # Purpose
//! Navigation actions go to the [`Router`]; everything else is merged with the
//! call-site arguments and handed to the [`StateSink`]. Event handlers built
//! by [`ActionDispatcher::build_dispatcher`] defer this until the UI invokes
//! them.
//!
//! # Key invariants
//! - A navigation action never reaches the sink.
//! - Dispatch has no error channel. Records are forwarded in call order.
//!
//! # Examples
//! ```rust
//! use reframed_store::{
//!     Action, ActionDispatcher, Descriptor, InputEvent, Reducers, Router, Store,
//! };
//! use serde_json::{Value, json};
//! use std::sync::Arc;
//!
//! struct NoRoutes;
//! impl Router for NoRoutes {
//!     fn navigate_to(&self, _path: &str) {}
//! }
//!
//! let store = Arc::new(Store::new(Reducers::new().with(
//!     "query",
//!     |state: &Value, record: &serde_json::Map<String, Value>| {
//!         record.get("value").cloned().unwrap_or_else(|| state.clone())
//!     },
//! )));
//! let dispatcher = Arc::new(ActionDispatcher::new(Arc::new(NoRoutes), store.clone()));
//! let on_change = dispatcher.build_dispatcher(Action::new("SET_QUERY"), Descriptor::FromInputEvent);
//! on_change.invoke(InputEvent::new("query", "rust"));
//! assert_eq!(store.state(), json!({ "query": "rust" }));
//! ```
use crate::{Action, Descriptor, HandlerArgs, Payload, Router, StateSink};
use std::sync::Arc;

pub struct ActionDispatcher {
    router: Arc<dyn Router>,
    sink: Arc<dyn StateSink>,
}

impl ActionDispatcher {
    pub fn new(router: Arc<dyn Router>, sink: Arc<dyn StateSink>) -> Self {
        Self { router, sink }
    }

    /// Dispatch immediately.
    pub fn dispatch_action(&self, action: &Action, args: Payload) {
        let kind = action.kind().unwrap_or_default();
        if action.is_navigation() {
            match action.path() {
                Some(path) => {
                    tracing::debug!(action = kind, path, "dispatch");
                    self.router.navigate_to(path);
                }
                None => tracing::warn!(action = kind, "navigation action without a path"),
            }
        } else {
            tracing::debug!(action = kind, args = ?args, "dispatch");
            self.sink.dispatch(action.merged_over(args));
        }
        tracing::trace!(state = %self.sink.state(), "new state");
    }

    /// Build a reusable handler that dispatches `action` when invoked.
    pub fn build_dispatcher(self: &Arc<Self>, action: Action, descriptor: Descriptor) -> EventHandler {
        EventHandler {
            dispatcher: self.clone(),
            action,
            descriptor,
        }
    }
}

/// Deferred dispatch bound to one action and descriptor.
#[derive(Clone)]
pub struct EventHandler {
    dispatcher: Arc<ActionDispatcher>,
    action: Action,
    descriptor: Descriptor,
}

impl EventHandler {
    pub fn action(&self) -> &Action {
        &self.action
    }

    pub fn descriptor(&self) -> &Descriptor {
        &self.descriptor
    }

    pub fn invoke(&self, args: impl Into<HandlerArgs>) {
        let args = args.into();
        match &self.descriptor {
            Descriptor::Custom(custom) => custom(self.dispatcher.as_ref(), &self.action, args),
            preset => {
                let payload = preset.shape(args);
                self.dispatcher.dispatch_action(&self.action, payload);
            }
        }
    }
}

impl std::fmt::Debug for EventHandler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventHandler")
            .field("action", &self.action)
            .field("descriptor", &self.descriptor)
            .finish()
    }
}
