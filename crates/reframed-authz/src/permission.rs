//! Role and permission tables.
//!
//! # Purpose
//! Holds the role-indexed grant matrix loaded from the server: an ordered list
//! of role names and, per permission name, one flag per role position.
//!
//! # Key invariants
//! - A role's index is its position in the [`RoleTable`].
//! - Flag sequences are aligned with the role table. A missing entry (short
//!   sequence) reads as not granted.
//!
//! # Examples
//! ```rust
//! use reframed_authz::{AccessTables, PermissionTable, RoleTable};
//!
//! let tables = AccessTables::new(
//!     RoleTable::new(["admin", "user"]),
//!     PermissionTable::new().with_permission("edit", ["Y", "N"]),
//! );
//! assert!(tables.allows("admin", "edit"));
//! assert!(!tables.allows("user", "edit"));
//! ```
use crate::AuthzResult;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;

/// One role's grant for one permission. Only the string `"Y"` grants; any
/// other JSON value (other strings, `null`, numbers) reads as denied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "Value", into = "String")]
pub enum PermissionFlag {
    Granted,
    Denied,
}

impl PermissionFlag {
    pub fn is_granted(self) -> bool {
        matches!(self, PermissionFlag::Granted)
    }
}

impl From<char> for PermissionFlag {
    fn from(value: char) -> Self {
        if value == 'Y' {
            PermissionFlag::Granted
        } else {
            PermissionFlag::Denied
        }
    }
}

impl From<&str> for PermissionFlag {
    fn from(value: &str) -> Self {
        // Only an exact "Y" grants.
        if value == "Y" {
            PermissionFlag::Granted
        } else {
            PermissionFlag::Denied
        }
    }
}

impl From<String> for PermissionFlag {
    fn from(value: String) -> Self {
        PermissionFlag::from(value.as_str())
    }
}

impl From<Value> for PermissionFlag {
    fn from(value: Value) -> Self {
        match value {
            Value::String(flag) => PermissionFlag::from(flag.as_str()),
            _ => PermissionFlag::Denied,
        }
    }
}

impl From<PermissionFlag> for String {
    fn from(value: PermissionFlag) -> Self {
        match value {
            PermissionFlag::Granted => "Y".to_string(),
            PermissionFlag::Denied => "N".to_string(),
        }
    }
}

/// Ordered role identifiers; position is the role index.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RoleTable(Vec<String>);

impl RoleTable {
    pub fn new<I, S>(roles: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self(roles.into_iter().map(Into::into).collect())
    }

    pub fn index_of(&self, role: &str) -> Option<usize> {
        self.0.iter().position(|item| item == role)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }
}

/// Permission name to per-role flags.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PermissionTable(HashMap<String, Vec<PermissionFlag>>);

impl PermissionTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_permission<I, F>(mut self, name: impl Into<String>, flags: I) -> Self
    where
        I: IntoIterator<Item = F>,
        F: Into<PermissionFlag>,
    {
        self.insert(name, flags);
        self
    }

    pub fn insert<I, F>(&mut self, name: impl Into<String>, flags: I)
    where
        I: IntoIterator<Item = F>,
        F: Into<PermissionFlag>,
    {
        self.0
            .insert(name.into(), flags.into_iter().map(Into::into).collect());
    }

    /// Flag for `permission` at `index`, or `None` if either is out of range.
    pub fn flag(&self, permission: &str, index: usize) -> Option<PermissionFlag> {
        self.0.get(permission)?.get(index).copied()
    }

    pub fn contains(&self, permission: &str) -> bool {
        self.0.contains_key(permission)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    fn flag_count(&self, permission: &str) -> usize {
        self.0.get(permission).map_or(0, Vec::len)
    }
}

/// Role and permission tables, always replaced together.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessTables {
    pub roles: RoleTable,
    pub permissions: PermissionTable,
}

impl AccessTables {
    pub fn new(roles: RoleTable, permissions: PermissionTable) -> Self {
        Self { roles, permissions }
    }

    /// Parse `{"roles": [...], "permissions": {"name": ["Y", ...]}}`.
    pub fn from_json(document: &str) -> AuthzResult<Self> {
        Ok(serde_json::from_str(document)?)
    }

    /// Fail-closed grant check: unknown role, unknown or empty permission,
    /// and missing flags all deny.
    pub fn allows(&self, role: &str, permission: &str) -> bool {
        if permission.is_empty() {
            return false;
        }
        let Some(index) = self.roles.index_of(role) else {
            return false;
        };
        self.permissions
            .flag(permission, index)
            .is_some_and(PermissionFlag::is_granted)
    }

    /// Permissions whose flag sequence does not cover every role, sorted by name.
    pub fn short_permissions(&self) -> Vec<&str> {
        let mut short: Vec<&str> = self
            .permissions
            .names()
            .filter(|name| self.permissions.flag_count(name) < self.roles.len())
            .collect();
        short.sort_unstable();
        short
    }
}
