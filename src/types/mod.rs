pub mod id_type;
pub use id_type::*;

pub mod id_manager;
pub use id_manager::*;

pub mod config;
pub use config::*;

pub mod base_type_id;
pub use base_type_id::*;

pub mod property_type;
pub use property_type::*;

pub mod property_definition;
pub use property_definition::*;

pub mod type_definition;
pub use type_definition::*;

pub mod type_error;
pub use type_error::*;

pub mod acl;
pub use acl::*;

pub mod name_validator;
pub use name_validator::*;

pub mod type_validator;
pub use type_validator::*;

pub mod type_manager;
pub use type_manager::*;

/// Read access to the registry of type definitions.
///
/// Lookups are by id or by query name. Property lookups follow the parent
/// chain so inherited properties are found on subtypes.
pub trait TypeCatalog {
    fn type_by_id(&self, id: &str) -> Option<&TypeDefinition>;

    fn type_by_query_name(&self, query_name: &str) -> Option<&TypeDefinition>;

    /// Every known type, in registration order.
    fn all_types(&self) -> Vec<&TypeDefinition>;

    fn parent_of(&self, td: &TypeDefinition) -> Option<&TypeDefinition> {
        td.parent_type_id.as_deref().and_then(|parent| self.type_by_id(parent))
    }

    /// Id of the property with `query_name` on `td` or one of its ancestors.
    /// The wildcard `*` never maps to a property id.
    fn property_id_for_query_name(&self, td: &TypeDefinition, query_name: &str) -> Option<String> {
        if query_name == "*" {
            return None;
        }
        let mut current = Some(td);
        let mut depth = 0;
        while let Some(type_def) = current {
            if let Some(pd) = type_def.property_by_query_name(query_name) {
                return Some(pd.id().to_string());
            }
            depth += 1;
            if depth > MAX_TYPE_DEPTH {
                return None;
            }
            current = self.parent_of(type_def);
        }
        None
    }

    fn type_contains_property_with_query_name(&self, td: &TypeDefinition, query_name: &str) -> bool {
        self.property_id_for_query_name(td, query_name).is_some()
    }

    /// Property definition (declared or inherited) with the given id.
    fn property_definition(&self, td: &TypeDefinition, property_id: &str) -> Option<&PropertyDefinition> {
        let mut current = self.type_by_id(td.id());
        let mut depth = 0;
        while let Some(type_def) = current {
            if let Some(pd) = type_def.property_definitions.get(property_id) {
                return Some(pd);
            }
            depth += 1;
            if depth > MAX_TYPE_DEPTH {
                return None;
            }
            current = self.parent_of(type_def);
        }
        None
    }

    /// True when `type_id` is `ancestor_id` or one of its descendants.
    fn is_subtype_of(&self, type_id: &str, ancestor_id: &str) -> bool {
        let mut current = self.type_by_id(type_id);
        let mut depth = 0;
        while let Some(type_def) = current {
            if type_def.id() == ancestor_id {
                return true;
            }
            depth += 1;
            if depth > MAX_TYPE_DEPTH {
                return false;
            }
            current = self.parent_of(type_def);
        }
        false
    }
}

/// Guard against parent cycles in hand-built catalogs.
pub const MAX_TYPE_DEPTH: usize = 64;
