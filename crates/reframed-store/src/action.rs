//! Action records.
//!
//! # Purpose
//! An action is a JSON object tagged by its `type` field. Two tags are
//! reserved for navigation; every other tag is a state mutation forwarded to
//! the store.
//!
//! # Key invariants
//! - The record is kept as-is. A missing `type` is not rejected here; the
//!   store decides what to do with it.
//! - When merged with call-site arguments, the action's own fields win.
//!
//! # Examples
//! ```rust
//! use reframed_store::Action;
//! use serde_json::json;
//!
//! let action = Action::new("SET_NAME");
//! let mut args = serde_json::Map::new();
//! args.insert("value".to_string(), json!("x"));
//! let record = action.merged_over(args);
//! assert_eq!(record["type"], json!("SET_NAME"));
//! assert_eq!(record["value"], json!("x"));
//! ```
use crate::{StoreError, StoreResult};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A JSON object, the shape of every dispatched record.
pub type Payload = Map<String, Value>;

pub const NAVIGATE: &str = "NAVIGATE";
pub const NAVIGATE_MODEL: &str = "NAVIGATE_MODEL";

pub(crate) const TYPE_FIELD: &str = "type";
const PATH_FIELD: &str = "path";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Action(Payload);

impl Action {
    pub fn new(kind: impl Into<String>) -> Self {
        let mut fields = Payload::new();
        fields.insert(TYPE_FIELD.to_string(), Value::String(kind.into()));
        Self(fields)
    }

    pub fn navigate(path: impl Into<String>) -> Self {
        Self::new(NAVIGATE).with(PATH_FIELD, Value::String(path.into()))
    }

    pub fn navigate_model(path: impl Into<String>) -> Self {
        Self::new(NAVIGATE_MODEL).with(PATH_FIELD, Value::String(path.into()))
    }

    pub fn from_fields(fields: Payload) -> Self {
        Self(fields)
    }

    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.0.insert(key.into(), value.into());
        self
    }

    pub fn kind(&self) -> Option<&str> {
        self.0.get(TYPE_FIELD).and_then(Value::as_str)
    }

    pub fn path(&self) -> Option<&str> {
        self.0.get(PATH_FIELD).and_then(Value::as_str)
    }

    pub fn is_navigation(&self) -> bool {
        matches!(self.kind(), Some(NAVIGATE) | Some(NAVIGATE_MODEL))
    }

    pub fn fields(&self) -> &Payload {
        &self.0
    }

    /// `args` overlaid with this action's fields.
    pub fn merged_over(&self, mut args: Payload) -> Payload {
        for (key, value) in &self.0 {
            args.insert(key.clone(), value.clone());
        }
        args
    }
}

impl TryFrom<Value> for Action {
    type Error = StoreError;

    fn try_from(value: Value) -> StoreResult<Self> {
        match value {
            Value::Object(fields) => Ok(Self(fields)),
            Value::Null => Err(StoreError::NotAnObject("null")),
            Value::Bool(_) => Err(StoreError::NotAnObject("bool")),
            Value::Number(_) => Err(StoreError::NotAnObject("number")),
            Value::String(_) => Err(StoreError::NotAnObject("string")),
            Value::Array(_) => Err(StoreError::NotAnObject("array")),
        }
    }
}

impl std::str::FromStr for Action {
    type Err = StoreError;

    fn from_str(value: &str) -> StoreResult<Self> {
        Action::try_from(serde_json::from_str::<Value>(value)?)
    }
}
