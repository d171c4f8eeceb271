use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::types::{Cardinality, DateTimeResolution, PropertyType, Updatability};

/// Definition of a single property of a type.
///
/// Definitions submitted by clients may be partially filled; every optional
/// field is defaulted by `TypeValidator::complete_property_definition`
/// before the definition enters a catalog.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PropertyDefinition {
    pub id: Option<String>,
    pub local_name: Option<String>,
    pub local_namespace: Option<String>,
    pub query_name: Option<String>,
    pub display_name: Option<String>,
    pub description: Option<String>,
    pub property_type: Option<PropertyType>,
    pub cardinality: Option<Cardinality>,
    pub updatability: Option<Updatability>,
    pub inherited: Option<bool>,
    pub required: Option<bool>,
    pub queryable: Option<bool>,
    pub orderable: Option<bool>,
    pub open_choice: Option<bool>,
    pub choices: Vec<Value>,
    pub default_value: Option<Value>,
    /// Integer and decimal properties only
    pub min_value: Option<Value>,
    /// Integer and decimal properties only
    pub max_value: Option<Value>,
    /// String properties only
    pub max_length: Option<u64>,
    /// Decimal properties only
    pub precision: Option<u32>,
    /// DateTime properties only
    pub resolution: Option<DateTimeResolution>,
}

impl PropertyDefinition {
    /// A definition whose id, query name and local name are all `id`.
    pub fn new(id: &str, property_type: PropertyType) -> Self {
        Self {
            id: Some(id.to_string()),
            local_name: Some(id.to_string()),
            query_name: Some(id.to_string()),
            display_name: Some(id.to_string()),
            property_type: Some(property_type),
            ..Default::default()
        }
    }

    pub fn id(&self) -> &str {
        self.id.as_deref().unwrap_or_default()
    }

    pub fn query_name(&self) -> &str {
        self.query_name.as_deref().unwrap_or_default()
    }

    pub fn local_name(&self) -> &str {
        self.local_name.as_deref().unwrap_or_default()
    }

    pub fn with_query_name(mut self, query_name: &str) -> Self {
        self.query_name = Some(query_name.to_string());
        self
    }

    pub fn with_local_name(mut self, local_name: &str) -> Self {
        self.local_name = Some(local_name.to_string());
        self
    }

    pub fn with_cardinality(mut self, cardinality: Cardinality) -> Self {
        self.cardinality = Some(cardinality);
        self
    }

    pub fn with_updatability(mut self, updatability: Updatability) -> Self {
        self.updatability = Some(updatability);
        self
    }

    pub fn is_multi_valued(&self) -> bool {
        self.cardinality == Some(Cardinality::Multi)
    }
}
