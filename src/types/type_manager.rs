use indexmap::IndexMap;
use serde_json::Value;
use tracing::debug;

use crate::types::{
    BaseTypeId, Config, ContentStreamAllowed, IdManager, PropertyDefinition, PropertyType, TypeCatalog,
    TypeDefinition, TypeError, TypeMutability, TypeValidator, Updatability,
};

/// In-memory type catalog.
///
/// Starts with the CMIS base types and their core properties. Custom
/// types go through `TypeValidator` before they are stored.
#[derive(Debug, Clone)]
pub struct TypeManager {
    config: Config,
    ids: IdManager,
    types: IndexMap<String, TypeDefinition>,
}

impl Default for TypeManager {
    fn default() -> Self {
        Self::new()
    }
}

impl TypeManager {
    pub fn new() -> Self {
        Self::with_config(Config::default())
    }

    pub fn with_config(config: Config) -> Self {
        let ids = IdManager::new(config.id_type, &config.id_prefix);
        let mut manager = Self { config, ids, types: IndexMap::new() };
        for base in BaseTypeId::ALL {
            let td = Self::base_type(base);
            manager.types.insert(td.id().to_string(), td);
        }
        manager
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Complete, validate and register a new type. Returns the stored
    /// definition.
    pub fn add_type(&mut self, td: TypeDefinition) -> Result<&TypeDefinition, TypeError> {
        let mut completed = TypeValidator::complete_type(&td, &mut self.ids)?
            .ok_or_else(|| TypeError::invalid(format!("Cannot add type {}, policy types are not supported.", td.id())))?;
        TypeValidator::adjust_type_names_and_id(&mut completed, &mut self.ids)?;
        TypeValidator::check_type(&*self, &completed)?;

        let id = completed.id().to_string();
        debug!("add type: {} (query name {})", id, completed.query_name());
        self.types.insert(id.clone(), completed);
        self.types.get(&id).ok_or_else(|| TypeError::invalid(format!("Type {} vanished after insert.", id)))
    }

    /// Deserialize a JSON array of type definitions and add them in order.
    pub fn load_from_json(&mut self, value: Value) -> Result<usize, TypeError> {
        let types: Vec<TypeDefinition> = serde_json::from_value(value)
            .map_err(|e| TypeError::invalid(format!("Invalid type definitions: {e}")))?;
        let count = types.len();
        for td in types {
            self.add_type(td)?;
        }
        Ok(count)
    }

    /// Remove a custom type without subtypes.
    pub fn remove_type(&mut self, id: &str) -> Result<TypeDefinition, TypeError> {
        let td = self.type_by_id(id)
            .ok_or_else(|| TypeError::invalid(format!("Type {} does not exist.", id)))?;
        if td.is_root() {
            return TypeError::constraint(format!("Base type {} cannot be removed.", id)).err();
        }
        if !self.children_of(id).is_empty() {
            return TypeError::constraint(format!("Type {} has subtypes and cannot be removed.", id)).err();
        }
        debug!("remove type: {}", id);
        self.types.shift_remove(id)
            .ok_or_else(|| TypeError::invalid(format!("Type {} does not exist.", id)))
    }

    pub fn children_of(&self, id: &str) -> Vec<&TypeDefinition> {
        self.types.values()
            .filter(|td| td.parent_type_id.as_deref() == Some(id))
            .collect()
    }

    fn base_type(base: BaseTypeId) -> TypeDefinition {
        let mut td = TypeDefinition::new(base.as_str(), base, None);
        td.creatable = Some(!matches!(base, BaseTypeId::Secondary));
        td.fileable = Some(matches!(base, BaseTypeId::Document | BaseTypeId::Folder | BaseTypeId::Policy | BaseTypeId::Item));
        td.queryable = Some(true);
        td.fulltext_indexed = Some(false);
        td.included_in_supertype_query = Some(true);
        td.controllable_policy = Some(false);
        td.controllable_acl = Some(true);
        td.type_mutability = Some(TypeMutability { can_create: true, can_update: false, can_delete: false });

        let readonly = |id: &str, ty: PropertyType| {
            Self::core_property(id, ty, Updatability::ReadOnly)
        };

        td.add_property(readonly("cmis:objectId", PropertyType::Id));
        td.add_property(Self::core_property("cmis:name", PropertyType::String, Updatability::ReadWrite));
        td.add_property(Self::core_property("cmis:objectTypeId", PropertyType::Id, Updatability::OnCreate));
        td.add_property(readonly("cmis:baseTypeId", PropertyType::Id));
        td.add_property(readonly("cmis:createdBy", PropertyType::String));
        td.add_property(readonly("cmis:creationDate", PropertyType::DateTime));
        td.add_property(readonly("cmis:lastModificationDate", PropertyType::DateTime));

        match base {
            BaseTypeId::Document => {
                td.versionable = Some(false);
                td.content_stream_allowed = Some(ContentStreamAllowed::Allowed);
                td.add_property(readonly("cmis:contentStreamLength", PropertyType::Integer));
                td.add_property(readonly("cmis:contentStreamMimeType", PropertyType::String));
            }
            BaseTypeId::Folder => {
                td.add_property(readonly("cmis:parentId", PropertyType::Id));
                td.add_property(readonly("cmis:path", PropertyType::String));
            }
            BaseTypeId::Relationship => {
                td.add_property(Self::core_property("cmis:sourceId", PropertyType::Id, Updatability::OnCreate));
                td.add_property(Self::core_property("cmis:targetId", PropertyType::Id, Updatability::OnCreate));
            }
            BaseTypeId::Policy => {
                td.add_property(Self::core_property("cmis:policyText", PropertyType::String, Updatability::ReadWrite));
            }
            BaseTypeId::Item | BaseTypeId::Secondary => {}
        }

        td
    }

    fn core_property(id: &str, property_type: PropertyType, updatability: Updatability) -> PropertyDefinition {
        let mut pd = PropertyDefinition::new(id, property_type).with_updatability(updatability);
        pd.inherited = Some(false);
        pd.required = Some(id == "cmis:name");
        pd.queryable = Some(true);
        pd.orderable = Some(true);
        pd
    }
}

impl TypeCatalog for TypeManager {
    fn type_by_id(&self, id: &str) -> Option<&TypeDefinition> {
        self.types.get(id)
    }

    fn type_by_query_name(&self, query_name: &str) -> Option<&TypeDefinition> {
        self.types.values().find(|td| td.query_name() == query_name)
    }

    fn all_types(&self) -> Vec<&TypeDefinition> {
        self.types.values().collect()
    }
}
