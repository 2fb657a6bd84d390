//! Authorization context for one browser session.
//!
//! # Purpose
//! Owns the session token (through a [`SessionStorage`]) and the role and
//! permission tables, and answers the UI's questions about them: is anyone
//! logged in, which role does the token claim, may that role do X.
//!
//! # Lifecycle
//! - Created with no token and empty tables.
//! - [`AuthorizationContext::set_token`] on login,
//!   [`AuthorizationContext::end_session`] on logout.
//! - Tables are replaced wholesale by
//!   [`AuthorizationContext::set_roles_and_permissions`].
//!
//! # Key invariants
//! - Every query is fail-closed and never returns an error: a missing or
//!   malformed token means "no role", and any lookup miss means "not permitted".
//! - Roles come from unverified claims and are advisory only.
use crate::redirect::login_redirect;
use crate::token::advisory_role;
use crate::{
    AccessTables, AdvisoryRole, AuthzError, MemorySessionStorage, PermissionTable,
    RedirectDecision, RoleTable, SessionStorage,
};
use std::sync::{Arc, RwLock};

pub use reframed_common::config::{DEFAULT_LOGIN_PATH, DEFAULT_TOKEN_KEY};

pub struct AuthorizationContext<S = MemorySessionStorage> {
    storage: S,
    token_key: String,
    login_path: String,
    tables: RwLock<Arc<AccessTables>>,
}

impl Default for AuthorizationContext<MemorySessionStorage> {
    fn default() -> Self {
        Self::new(MemorySessionStorage::new())
    }
}

impl<S: SessionStorage> AuthorizationContext<S> {
    pub fn new(storage: S) -> Self {
        Self {
            storage,
            token_key: DEFAULT_TOKEN_KEY.to_string(),
            login_path: DEFAULT_LOGIN_PATH.to_string(),
            tables: RwLock::new(Arc::new(AccessTables::default())),
        }
    }

    pub fn with_token_key(mut self, key: impl Into<String>) -> Self {
        self.token_key = key.into();
        self
    }

    pub fn with_login_path(mut self, path: impl Into<String>) -> Self {
        self.login_path = path.into();
        self
    }

    /// Current session token, or an empty string when none is set.
    pub fn token(&self) -> String {
        self.storage.get(&self.token_key).unwrap_or_default()
    }

    pub fn set_token(&self, token: impl Into<String>) {
        self.storage.set(&self.token_key, token.into());
    }

    pub fn is_authenticated(&self) -> bool {
        !self.token().is_empty()
    }

    pub fn logout(&self) {
        self.set_token("");
    }

    /// Session teardown. Clears the token; tables are kept for the next login.
    pub fn end_session(&self) {
        tracing::debug!("session ended");
        self.logout();
    }

    /// Route guard: allow when a token is present, otherwise point at the
    /// login page with the current path as the return target.
    pub fn require_authorization(&self, current_path: &str) -> RedirectDecision {
        if self.is_authenticated() {
            RedirectDecision::Allow
        } else {
            RedirectDecision::Redirect(login_redirect(&self.login_path, current_path))
        }
    }

    /// Role claimed by the current token. Not signature-checked.
    pub fn current_role(&self) -> Option<AdvisoryRole> {
        let token = self.token();
        if token.is_empty() {
            return None;
        }
        match advisory_role(&token) {
            Ok(role) => Some(role),
            Err(AuthzError::MissingRole) => None,
            Err(err) => {
                tracing::debug!(error = %err, "session token claims could not be decoded");
                None
            }
        }
    }

    pub fn set_roles_and_permissions(&self, roles: RoleTable, permissions: PermissionTable) {
        self.replace_tables(AccessTables::new(roles, permissions));
    }

    pub fn replace_tables(&self, tables: AccessTables) {
        let short = tables.short_permissions();
        if !short.is_empty() {
            tracing::warn!(
                permissions = ?short,
                roles = tables.roles.len(),
                "permission flags do not cover every role; missing entries deny"
            );
        }
        let tables = Arc::new(tables);
        *self.tables.write().expect("access tables lock") = tables;
    }

    /// Snapshot of the current tables.
    pub fn tables(&self) -> Arc<AccessTables> {
        self.tables.read().expect("access tables lock").clone()
    }

    /// Whether the current role is granted `permission`. Absent or empty
    /// permission names, unknown roles, and missing tokens all yield `false`.
    pub fn has_permission<'a>(&self, permission: impl Into<Option<&'a str>>) -> bool {
        let Some(permission) = permission.into().filter(|name| !name.is_empty()) else {
            return false;
        };
        let Some(role) = self.current_role() else {
            return false;
        };
        self.tables().allows(role.as_str(), permission)
    }
}
