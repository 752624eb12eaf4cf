use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Name of the field every persisted record is keyed by.
pub const ID_FIELD: &str = "id";

/// A single entity in a collection.
///
/// Records are open-ended JSON objects. Only the `id` field (and, for nested
/// resources, the synthetic `{parent}_id` foreign key) is ever interpreted;
/// everything else is opaque payload that round-trips untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Record(Map<String, Value>);

impl Record {
    pub fn new() -> Self {
        Record(Map::new())
    }

    /// The record's integer id, if it has one.
    pub fn id(&self) -> Option<i64> {
        self.int_field(ID_FIELD)
    }

    pub fn set_id(&mut self, id: i64) {
        self.0.insert(ID_FIELD.to_string(), Value::from(id));
    }

    /// Read a field as an integer. Missing or non-integer values yield `None`.
    pub fn int_field(&self, name: &str) -> Option<i64> {
        self.0.get(name).and_then(Value::as_i64)
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.0.get(name)
    }

    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<Value>) {
        self.0.insert(name.into(), value.into());
    }

    pub fn into_value(self) -> Value {
        Value::Object(self.0)
    }
}

impl From<Map<String, Value>> for Record {
    fn from(fields: Map<String, Value>) -> Self {
        Record(fields)
    }
}

impl From<Record> for Value {
    fn from(record: Record) -> Self {
        record.into_value()
    }
}

/// Next id for a collection: one past the largest existing id.
///
/// Records without a numeric id count as 0, so an empty collection starts at 1.
/// Returns `None` once the largest id is `i64::MAX`.
pub fn next_id(records: &[Record]) -> Option<i64> {
    records
        .iter()
        .map(|r| r.id().unwrap_or(0))
        .fold(0, i64::max)
        .checked_add(1)
}
