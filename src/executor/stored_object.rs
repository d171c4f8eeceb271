use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

static NULL: Value = Value::Null;

/// A repository object as seen by the query executor. Properties are
/// keyed by property id.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredObject {
    #[serde(default)]
    pub id: String,
    pub type_id: String,
    #[serde(default)]
    pub properties: IndexMap<String, Value>,
    #[serde(default)]
    pub parent_ids: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
}

impl StoredObject {
    pub fn new(id: &str, type_id: &str) -> Self {
        Self { id: id.to_string(), type_id: type_id.to_string(), ..Default::default() }
    }

    pub fn with_property(mut self, property_id: &str, value: impl Into<Value>) -> Self {
        self.properties.insert(property_id.to_string(), value.into());
        self
    }

    pub fn with_parent(mut self, folder_id: &str) -> Self {
        self.parent_ids.push(folder_id.to_string());
        self
    }

    pub fn with_content(mut self, content: &str) -> Self {
        self.content = Some(content.to_string());
        self
    }

    /// Missing properties read as `Null`.
    pub fn property(&self, property_id: &str) -> &Value {
        self.properties.get(property_id).unwrap_or(&NULL)
    }
}
