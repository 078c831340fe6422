//! Result of one tool call.

use serde::Serialize;
use serde_json::{Map, Value};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ToolOutput {
    /// Text returned to the caller
    pub content: String,
    /// Thread to pass back as `continuation_id`; empty for stateless tools
    #[serde(skip_serializing_if = "String::is_empty")]
    pub continuation_id: String,
    #[serde(skip_serializing_if = "Map::is_empty")]
    pub metadata: Map<String, Value>,
}

impl ToolOutput {
    pub fn new(content: impl Into<String>, continuation_id: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            continuation_id: continuation_id.into(),
            metadata: Map::new(),
        }
    }

    /// Output of a tool that does not touch any thread.
    pub fn stateless(content: impl Into<String>) -> Self {
        Self::new(content, String::new())
    }

    pub fn with_meta(mut self, key: &str, value: impl Serialize) -> Self {
        let value = serde_json::to_value(value).unwrap_or(Value::Null);
        self.metadata.insert(key.to_string(), value);
        self
    }

    pub fn meta(&self, key: &str) -> Option<&Value> {
        self.metadata.get(key)
    }
}
