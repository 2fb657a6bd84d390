//! Front-end support layer: session authorization, action dispatch, and the
//! configuration both are built from.
//!
//! Everything is re-exported here so applications depend on one crate.
//!
//! ```rust
//! use reframed::{AppContext, Config, MemorySessionStorage, Reducers, Router};
//! use std::sync::Arc;
//!
//! struct Routes;
//! impl Router for Routes {
//!     fn navigate_to(&self, _path: &str) {}
//! }
//!
//! let app = AppContext::new(
//!     Config::default(),
//!     MemorySessionStorage::new(),
//!     Reducers::new(),
//!     Arc::new(Routes),
//! );
//! assert!(!app.enforce_authorization("/orders"));
//! ```
mod app;

pub use app::AppContext;

pub use reframed_authz as authz;
pub use reframed_common as common;
pub use reframed_store as store;

pub use reframed_authz::{
    AccessTables, AdvisoryRole, AuthorizationContext, AuthzError, MemorySessionStorage,
    PermissionFlag, PermissionTable, RedirectDecision, RoleTable, SessionStorage, VerifiedRole,
    verify_role,
};
pub use reframed_common::{Config, LogConfiguration, RendererKind, env_filter, init_logging};
pub use reframed_store::{
    Action, ActionDispatcher, Descriptor, EventHandler, HandlerArgs, HttpResponse, InputEvent,
    NAVIGATE, NAVIGATE_MODEL, Payload, Reducer, Reducers, Router, StateSink, Store, create_store,
};
