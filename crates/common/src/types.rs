use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Key holding the submission's display name inside a homework record.
pub const HOMEWORK_NAME_KEY: &str = "homework_name";
/// Key holding the review status code inside a homework record.
pub const STATUS_KEY: &str = "status";

/// One submission's review state as returned by the homework API.
///
/// The record keeps every field the API sent. Only `homework_name` and
/// `status` are interpreted, and their presence is checked at render time,
/// not at construction.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HomeworkRecord(Map<String, Value>);

impl HomeworkRecord {
    pub fn new(fields: Map<String, Value>) -> Self {
        Self(fields)
    }

    /// Submission name, if present and a string.
    pub fn name(&self) -> Option<&str> {
        self.0.get(HOMEWORK_NAME_KEY).and_then(Value::as_str)
    }

    /// Raw status code, if present and a string.
    pub fn status(&self) -> Option<&str> {
        self.0.get(STATUS_KEY).and_then(Value::as_str)
    }
}

/// Top-level payload of the homework status endpoint.
///
/// This is the documented wire shape. Incoming bodies are checked by hand
/// against it so that each kind of mismatch gets its own error; the typed
/// form is what test servers and fixtures serialize.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiResponse {
    /// Most recent submission first.
    pub homeworks: Vec<HomeworkRecord>,
    /// Server time as a unix timestamp.
    pub current_date: i64,
}

/// JSON type name used in error messages.
pub fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
