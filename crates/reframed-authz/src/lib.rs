//! Client-side session and authorization primitives.
//!
//! # Purpose
//! Keeps the session token, reads the role claim out of it, and evaluates
//! permission names against a role-indexed grant table so the UI can decide
//! what to show and where to send anonymous visitors.
//!
//! # How it fits
//! The application context builds one [`AuthorizationContext`] per session and
//! hands it to route guards and views. Nothing here performs navigation; the
//! route guard returns a [`RedirectDecision`] for the router to act on.
//!
//! # Key invariants
//! - Role claims are decoded without signature verification and surface as
//!   [`AdvisoryRole`]. Only [`verify_role`] yields a [`VerifiedRole`].
//! - Permission checks are fail-closed.
//!
//! # Examples
//! ```rust
//! use reframed_authz::{AuthorizationContext, PermissionTable, RoleTable};
//!
//! let context = AuthorizationContext::default();
//! context.set_roles_and_permissions(
//!     RoleTable::new(["admin", "user"]),
//!     PermissionTable::new().with_permission("edit", ["Y", "N"]),
//! );
//! // {"role":"admin"}
//! context.set_token("e30.eyJyb2xlIjoiYWRtaW4ifQ.sig");
//! assert!(context.has_permission("edit"));
//! assert!(context.require_authorization("/reports").is_allowed());
//! ```
//!
//! # Common pitfalls
//! - Using [`AuthorizationContext::has_permission`] as a security boundary. The
//!   server must enforce access on every request.

mod context;
mod errors;
mod permission;
mod redirect;
mod session;
mod token;

pub use context::{AuthorizationContext, DEFAULT_LOGIN_PATH, DEFAULT_TOKEN_KEY};
pub use errors::{AuthzError, AuthzResult};
pub use permission::{AccessTables, PermissionFlag, PermissionTable, RoleTable};
pub use redirect::{RedirectDecision, encode_uri_component, login_redirect};
pub use session::{MemorySessionStorage, SessionStorage};
pub use token::{
    AdvisoryRole, RoleClaims, VerifiedRole, advisory_role, decode_unverified_claims, verify_role,
};
