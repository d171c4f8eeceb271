use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::types::{BaseTypeId, ContentStreamAllowed, PropertyDefinition};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TypeMutability {
    pub can_create: bool,
    pub can_update: bool,
    pub can_delete: bool,
}

impl Default for TypeMutability {
    fn default() -> Self {
        Self { can_create: true, can_update: true, can_delete: true }
    }
}

/// Definition of an object type.
///
/// Property definitions are keyed by property id and keep declaration
/// order. Only the properties declared on this type are stored here;
/// inherited ones are reached through `parent_type_id`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TypeDefinition {
    pub id: Option<String>,
    pub local_name: Option<String>,
    pub local_namespace: Option<String>,
    pub query_name: Option<String>,
    pub display_name: Option<String>,
    pub description: Option<String>,
    pub base_type_id: Option<BaseTypeId>,
    pub parent_type_id: Option<String>,
    pub creatable: Option<bool>,
    pub fileable: Option<bool>,
    pub queryable: Option<bool>,
    pub fulltext_indexed: Option<bool>,
    pub included_in_supertype_query: Option<bool>,
    pub controllable_policy: Option<bool>,
    pub controllable_acl: Option<bool>,
    pub type_mutability: Option<TypeMutability>,
    pub property_definitions: IndexMap<String, PropertyDefinition>,

    // cmis:document
    pub versionable: Option<bool>,
    pub content_stream_allowed: Option<ContentStreamAllowed>,

    // cmis:relationship
    pub allowed_source_types: Vec<String>,
    pub allowed_target_types: Vec<String>,
}

impl TypeDefinition {
    /// A type whose id, query name and local name are all `id`.
    pub fn new(id: &str, base_type_id: BaseTypeId, parent_type_id: Option<&str>) -> Self {
        Self {
            id: Some(id.to_string()),
            local_name: Some(id.to_string()),
            query_name: Some(id.to_string()),
            display_name: Some(id.to_string()),
            base_type_id: Some(base_type_id),
            parent_type_id: parent_type_id.map(str::to_string),
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

    pub fn with_property(mut self, property: PropertyDefinition) -> Self {
        self.add_property(property);
        self
    }

    pub fn add_property(&mut self, property: PropertyDefinition) {
        self.property_definitions.insert(property.id().to_string(), property);
    }

    /// Declared (not inherited) property with the given query name.
    pub fn property_by_query_name(&self, query_name: &str) -> Option<&PropertyDefinition> {
        self.property_definitions
            .values()
            .find(|pd| pd.query_name.as_deref() == Some(query_name))
    }

    pub fn is_root(&self) -> bool {
        self.parent_type_id.is_none()
    }
}
