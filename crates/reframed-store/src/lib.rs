//! Action dispatch and the Redux-style store behind it.
//!
//! # Purpose
//! Turns UI events into actions: navigation actions are handed to the router,
//! all others are merged with their arguments and reduced into the shared
//! application state.
//!
//! # How it fits
//! Views hold [`EventHandler`]s built from an [`ActionDispatcher`]. The
//! dispatcher talks to two collaborators, a [`Router`] and a [`StateSink`];
//! [`Store`] is the sink used by applications, tests may substitute their own.
//!
//! # Key invariants
//! - Single dispatch path: every record reaches the sink through
//!   [`ActionDispatcher::dispatch_action`], in call order.
//! - Descriptors are selected explicitly, never inferred from the shape of
//!   the arguments.

mod action;
mod collaborator;
mod descriptor;
mod dispatcher;
mod errors;
mod store;

pub use action::{Action, NAVIGATE, NAVIGATE_MODEL, Payload};
pub use collaborator::{Router, StateSink};
pub use descriptor::{
    CustomDispatcher, Descriptor, EventTarget, HandlerArgs, HttpResponse, InputEvent,
};
pub use dispatcher::{ActionDispatcher, EventHandler};
pub use errors::{StoreError, StoreResult};
pub use store::{INIT_ACTION, Listener, Reducer, Reducers, Store, SubscriptionId, create_store};
