use indexmap::IndexMap;
use tracing::debug;

use crate::types::{
    Acl, Ace, BaseTypeId, Cardinality, ContentStreamAllowed, IdManager, NameValidator, PropertyDefinition,
    PropertyType, TypeCatalog, TypeDefinition, TypeError, TypeMutability, Updatability,
};

/// Consistency checks and defaulting for type definitions entering a catalog.
pub struct TypeValidator;

impl TypeValidator {
    /// Verify that `td` can be added to `catalog`: the parent exists, the
    /// names are valid and unused, and no property clashes with an existing
    /// one.
    pub fn check_type(catalog: &dyn TypeCatalog, td: &TypeDefinition) -> Result<(), TypeError> {
        let parent_id = td.parent_type_id.as_deref().unwrap_or_default();
        if catalog.type_by_id(parent_id).is_none() {
            return TypeError::invalid(format!(
                "Cannot add type, because parent with id {} does not exist.", parent_id
            )).err();
        }

        if catalog.type_by_id(td.id()).is_some() {
            return TypeError::invalid(format!(
                "Cannot add type, because type with id {} already exists.", td.id()
            )).err();
        }

        Self::check_type_id(catalog, td.id.as_deref())?;
        Self::check_type_query_name(catalog, td.query_name.as_deref())?;
        Self::check_type_local_name(catalog, td.local_name.as_deref())?;
        Self::check_base_and_parent_type(td)?;
        Self::check_properties(catalog, td.property_definitions.values())
    }

    /// Fill every unset attribute of `td` with its default. Policy types are
    /// not completable and yield `None`.
    pub fn complete_type(td: &TypeDefinition, ids: &mut IdManager) -> Result<Option<TypeDefinition>, TypeError> {
        let base = match td.base_type_id {
            Some(base) => base,
            None => return Ok(None),
        };

        if base == BaseTypeId::Policy {
            return Ok(None);
        }

        let mut completed = td.clone();
        Self::complete_abstract_type(&mut completed, ids)?;

        if base == BaseTypeId::Document {
            completed.versionable.get_or_insert(false);
            completed.content_stream_allowed.get_or_insert(ContentStreamAllowed::Allowed);
        } else {
            completed.versionable = None;
            completed.content_stream_allowed = None;
        }
        if base != BaseTypeId::Relationship {
            completed.allowed_source_types.clear();
            completed.allowed_target_types.clear();
        }

        Ok(Some(completed))
    }

    /// Generate a missing id, repair invalid id characters, and fall back to
    /// the id for invalid query and local names.
    pub fn adjust_type_names_and_id(td: &mut TypeDefinition, ids: &mut IdManager) -> Result<(), TypeError> {
        let id = Self::adjusted_id(td.id.as_deref(), ids)?;
        if !td.query_name.as_deref().is_some_and(NameValidator::is_valid_query_name) {
            td.query_name = Some(id.clone());
        }
        if !td.local_name.as_deref().is_some_and(NameValidator::is_valid_local_name) {
            td.local_name = Some(id.clone());
        }
        td.id = Some(id);
        Ok(())
    }

    pub fn adjust_property_names_and_id(pd: &mut PropertyDefinition, ids: &mut IdManager) -> Result<(), TypeError> {
        let id = Self::adjusted_id(pd.id.as_deref(), ids)?;
        if !pd.query_name.as_deref().is_some_and(NameValidator::is_valid_query_name) {
            pd.query_name = Some(id.clone());
        }
        if !pd.local_name.as_deref().is_some_and(NameValidator::is_valid_local_name) {
            pd.local_name = Some(id.clone());
        }
        pd.id = Some(id);
        Ok(())
    }

    /// Fill every unset attribute of a (possibly partial) property
    /// definition. Attributes that do not apply to the property type are
    /// dropped.
    pub fn complete_property_definition(pd: &PropertyDefinition, ids: &mut IdManager) -> Result<PropertyDefinition, TypeError> {
        let property_type = match pd.property_type {
            Some(property_type) => property_type,
            None => return TypeError::invalid(format!("Property {} has no property type.", pd.id())).err(),
        };

        let mut completed = pd.clone();
        if completed.id.is_none() {
            completed.id = Some(Self::generate_id(ids)?);
        }
        let id = completed.id().to_string();
        completed.query_name.get_or_insert_with(|| id.clone());
        completed.local_name.get_or_insert_with(|| id.clone());
        completed.cardinality.get_or_insert(Cardinality::Single);
        completed.orderable.get_or_insert(true);
        completed.queryable.get_or_insert(true);
        completed.required.get_or_insert(false);
        completed.updatability.get_or_insert(Updatability::ReadWrite);
        completed.inherited = Some(false);

        if !matches!(property_type, PropertyType::Integer | PropertyType::Decimal) {
            completed.min_value = None;
            completed.max_value = None;
        }
        if property_type != PropertyType::Decimal {
            completed.precision = None;
        }
        if property_type != PropertyType::String {
            completed.max_length = None;
        }
        if property_type != PropertyType::DateTime {
            completed.resolution = None;
        }

        Ok(completed)
    }

    /// Replace the `cmis:user` principal by `user`. The ACL is only copied
    /// when it actually contains the macro.
    pub fn expand_acl_macros(user: Option<&str>, acl: &Acl) -> Acl {
        let user = match user {
            Some(user) => user,
            None => return acl.clone(),
        };

        if !acl.aces.iter().any(Ace::is_user_macro) {
            return acl.clone();
        }

        let aces = acl.aces.iter().map(|ace| {
            if ace.is_user_macro() {
                Ace { principal_id: Some(user.to_string()), ..ace.clone() }
            } else {
                ace.clone()
            }
        }).collect();

        Acl::new(aces)
    }

    fn complete_abstract_type(td: &mut TypeDefinition, ids: &mut IdManager) -> Result<(), TypeError> {
        td.controllable_acl.get_or_insert(true);
        td.controllable_policy.get_or_insert(false);
        td.creatable.get_or_insert(true);
        td.fileable.get_or_insert(true);
        td.fulltext_indexed = Some(false);
        td.included_in_supertype_query = Some(false);
        td.queryable.get_or_insert(true);
        td.type_mutability = Some(TypeMutability::default());

        let mut completed = IndexMap::with_capacity(td.property_definitions.len());
        for pd in td.property_definitions.values() {
            let mut new_pd = Self::complete_property_definition(pd, ids)?;
            Self::adjust_property_names_and_id(&mut new_pd, ids)?;
            completed.insert(new_pd.id().to_string(), new_pd);
        }
        td.property_definitions = completed;
        Ok(())
    }

    fn adjusted_id(id: Option<&str>, ids: &mut IdManager) -> Result<String, TypeError> {
        match id {
            None => Self::generate_id(ids),
            Some(id) if NameValidator::is_valid_id(id) => Ok(id.to_string()),
            Some(id) => Ok(NameValidator::replace_invalid_characters(id)),
        }
    }

    fn generate_id(ids: &mut IdManager) -> Result<String, TypeError> {
        let id = ids.next_id()
            .ok_or_else(|| TypeError::invalid("Id is required when id generation is disabled."))?;
        debug!("generated id {}", id);
        Ok(id)
    }

    fn check_properties<'a>(
        catalog: &dyn TypeCatalog,
        pds: impl Iterator<Item = &'a PropertyDefinition>,
    ) -> Result<(), TypeError> {
        let existing = catalog.all_types();
        for pd2 in pds {
            let id = match pd2.id.as_deref() {
                Some(id) => id,
                None => return TypeError::invalid("property id cannot be null.").err(),
            };
            if !NameValidator::is_valid_id(id) {
                return TypeError::invalid(NameValidator::ERROR_ILLEGAL_NAME).err();
            }

            let query_name = match pd2.query_name.as_deref() {
                Some(query_name) => query_name,
                None => return TypeError::invalid("property query name cannot be null.").err(),
            };
            if !NameValidator::is_valid_query_name(query_name) {
                return TypeError::invalid(NameValidator::ERROR_ILLEGAL_NAME).err();
            }

            let local_name = match pd2.local_name.as_deref() {
                Some(local_name) => local_name,
                None => return TypeError::invalid("property local name cannot be null.").err(),
            };
            if !NameValidator::is_valid_local_name(local_name) {
                return TypeError::invalid(NameValidator::ERROR_ILLEGAL_NAME).err();
            }

            for td in &existing {
                for pd1 in td.property_definitions.values() {
                    if pd1.id() == id {
                        return TypeError::constraint(format!(
                            "Property id {} already in use in type {}", id, td.id()
                        )).err();
                    }
                    if pd1.query_name() == query_name {
                        return TypeError::constraint(format!(
                            "Property query name {} already in use in type {}", query_name, td.query_name()
                        )).err();
                    }
                    if pd1.local_name() == local_name {
                        return TypeError::constraint(format!(
                            "Property local name {} already in use in type {}", local_name, td.id()
                        )).err();
                    }
                }
            }
        }
        Ok(())
    }

    fn check_type_id(catalog: &dyn TypeCatalog, type_id: Option<&str>) -> Result<(), TypeError> {
        let type_id = match type_id {
            Some(type_id) => type_id,
            None => return TypeError::invalid("Type id cannot be null.").err(),
        };

        if !NameValidator::is_valid_id(type_id) {
            return TypeError::invalid(NameValidator::ERROR_ILLEGAL_ID).err();
        }

        if catalog.type_by_id(type_id).is_some() {
            return TypeError::invalid(format!(
                "You cannot add type with id {} because it already exists.", type_id
            )).err();
        }
        Ok(())
    }

    fn check_type_query_name(catalog: &dyn TypeCatalog, query_name: Option<&str>) -> Result<(), TypeError> {
        let query_name = match query_name {
            Some(query_name) => query_name,
            None => return TypeError::invalid("Query name cannot be null.").err(),
        };

        if !NameValidator::is_valid_query_name(query_name) {
            return TypeError::invalid(NameValidator::ERROR_ILLEGAL_NAME).err();
        }

        if catalog.type_by_query_name(query_name).is_some() {
            return TypeError::invalid(format!(
                "You cannot add type with query name {} because it already exists.", query_name
            )).err();
        }
        Ok(())
    }

    fn check_type_local_name(catalog: &dyn TypeCatalog, local_name: Option<&str>) -> Result<(), TypeError> {
        let local_name = match local_name {
            Some(local_name) => local_name,
            None => return TypeError::invalid("Local name cannot be null.").err(),
        };

        if !NameValidator::is_valid_local_name(local_name) {
            return TypeError::invalid(NameValidator::ERROR_ILLEGAL_NAME).err();
        }

        if catalog.all_types().iter().any(|td| td.local_name() == local_name) {
            return TypeError::constraint(format!(
                "You cannot add type with local name {} because it already exists.", local_name
            )).err();
        }
        Ok(())
    }

    fn check_base_and_parent_type(td: &TypeDefinition) -> Result<(), TypeError> {
        if td.base_type_id.is_none() {
            return TypeError::invalid(format!("You cannot create a type without a base type id: {}", td.id())).err();
        }
        if td.parent_type_id.is_none() {
            return TypeError::invalid(format!("You cannot create a type without a parent type id: {}", td.id())).err();
        }
        Ok(())
    }
}
