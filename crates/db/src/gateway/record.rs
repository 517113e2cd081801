use std::cmp::Ordering;
use std::collections::BTreeMap;

use projecthub_core::types::{DbId, Timestamp};

use super::GatewayError;

/// A single column value.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    BigInt(i64),
    Text(String),
    Timestamp(Timestamp),
    Null,
}

impl Value {
    /// Ordering used by the in-memory store. `Null` sorts first; values of
    /// different kinds are unordered.
    pub fn compare(&self, other: &Value) -> Ordering {
        match (self, other) {
            (Value::BigInt(a), Value::BigInt(b)) => a.cmp(b),
            (Value::Text(a), Value::Text(b)) => a.cmp(b),
            (Value::Timestamp(a), Value::Timestamp(b)) => a.cmp(b),
            (Value::Null, Value::Null) => Ordering::Equal,
            (Value::Null, _) => Ordering::Less,
            (_, Value::Null) => Ordering::Greater,
            _ => Ordering::Equal,
        }
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::BigInt(v)
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::Text(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::Text(v.to_string())
    }
}

impl From<Option<String>> for Value {
    fn from(v: Option<String>) -> Self {
        v.map_or(Value::Null, Value::Text)
    }
}

impl From<Timestamp> for Value {
    fn from(v: Timestamp) -> Self {
        Value::Timestamp(v)
    }
}

/// A backend-neutral row: identity, concurrency token, and data columns.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    pub id: DbId,
    pub row_version: i32,
    pub values: BTreeMap<&'static str, Value>,
}

impl Record {
    pub fn new(id: DbId, row_version: i32) -> Self {
        Self {
            id,
            row_version,
            values: BTreeMap::new(),
        }
    }

    pub fn with_values(mut self, values: impl IntoIterator<Item = (&'static str, Value)>) -> Self {
        self.values.extend(values);
        self
    }

    /// Column lookup that also resolves the primary key column.
    pub fn get(&self, key: &str, column: &str) -> Option<Value> {
        if column == key {
            return Some(Value::BigInt(self.id));
        }
        self.values.get(column).cloned()
    }

    pub fn big_int(&self, column: &str) -> Result<i64, GatewayError> {
        match self.values.get(column) {
            Some(Value::BigInt(v)) => Ok(*v),
            other => Err(mismatch(column, "bigint", other)),
        }
    }

    pub fn text(&self, column: &str) -> Result<String, GatewayError> {
        match self.values.get(column) {
            Some(Value::Text(v)) => Ok(v.clone()),
            other => Err(mismatch(column, "text", other)),
        }
    }

    pub fn nullable_text(&self, column: &str) -> Result<Option<String>, GatewayError> {
        match self.values.get(column) {
            Some(Value::Text(v)) => Ok(Some(v.clone())),
            Some(Value::Null) | None => Ok(None),
            other => Err(mismatch(column, "text", other)),
        }
    }

    pub fn timestamp(&self, column: &str) -> Result<Timestamp, GatewayError> {
        match self.values.get(column) {
            Some(Value::Timestamp(v)) => Ok(*v),
            other => Err(mismatch(column, "timestamp", other)),
        }
    }
}

fn mismatch(column: &str, expected: &str, found: Option<&Value>) -> GatewayError {
    GatewayError::Decode(format!(
        "column `{column}`: expected {expected}, found {found:?}"
    ))
}
