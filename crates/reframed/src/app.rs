//! Application context.
//!
//! # Purpose
//! Owns everything that would otherwise be a module-level singleton: the
//! configuration, the session's authorization state, the store, and the
//! dispatcher feeding it. Views receive a reference instead of importing
//! globals.
//!
//! # Lifecycle
//! - Built with no token and empty role/permission tables.
//! - [`AppContext::end_session`] clears the token. Store state survives.
use reframed_authz::{AuthorizationContext, MemorySessionStorage, RedirectDecision, SessionStorage};
use reframed_common::{Config, init_logging};
use reframed_store::{
    Action, ActionDispatcher, Descriptor, EventHandler, Reducers, Router, Store, create_store,
};
use serde_json::Value;
use std::sync::Arc;

pub struct AppContext<S = MemorySessionStorage> {
    config: Config,
    authz: AuthorizationContext<S>,
    store: Arc<Store>,
    dispatcher: Arc<ActionDispatcher>,
}

impl<S: SessionStorage> AppContext<S> {
    pub fn new(config: Config, storage: S, reducers: Reducers, router: Arc<dyn Router>) -> Self {
        Self::with_listener(config, storage, reducers, router, |_| {})
    }

    /// Like [`AppContext::new`], with a store listener that also runs once
    /// for the initial state.
    pub fn with_listener(
        config: Config,
        storage: S,
        reducers: Reducers,
        router: Arc<dyn Router>,
        listener: impl Fn(&Value) + Send + Sync + 'static,
    ) -> Self {
        let authz = AuthorizationContext::new(storage)
            .with_token_key(config.session_token_key.clone())
            .with_login_path(config.login_path.clone());
        let store = create_store(reducers, listener);
        let dispatcher = Arc::new(ActionDispatcher::new(router, store.clone()));
        tracing::info!(
            renderer = %config.renderer,
            page_root = %config.page_root,
            "application context ready"
        );
        Self {
            config,
            authz,
            store,
            dispatcher,
        }
    }

    /// Load configuration from the environment, install logging, log the
    /// applied configuration, and build.
    pub fn from_env(
        storage: S,
        reducers: Reducers,
        router: Arc<dyn Router>,
    ) -> anyhow::Result<Self> {
        let config = Config::from_env_or_yaml()?;
        init_logging(&config.log_configuration)?;
        config.announce();
        Ok(Self::new(config, storage, reducers, router))
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn authz(&self) -> &AuthorizationContext<S> {
        &self.authz
    }

    pub fn store(&self) -> &Arc<Store> {
        &self.store
    }

    pub fn dispatcher(&self) -> &Arc<ActionDispatcher> {
        &self.dispatcher
    }

    pub fn handler(&self, action: Action, descriptor: Descriptor) -> EventHandler {
        self.dispatcher.build_dispatcher(action, descriptor)
    }

    /// Route guard that acts on its own decision: anonymous visitors are sent
    /// to the login page through the router. Returns whether to proceed.
    pub fn enforce_authorization(&self, current_path: &str) -> bool {
        match self.authz.require_authorization(current_path) {
            RedirectDecision::Allow => true,
            RedirectDecision::Redirect(location) => {
                self.dispatcher
                    .dispatch_action(&Action::navigate(location), Default::default());
                false
            }
        }
    }

    pub fn end_session(&self) {
        self.authz.end_session();
    }
}
