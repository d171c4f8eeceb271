use indexmap::IndexMap;
use tracing::trace;

use crate::query::{ColumnReference, QueryError, ResolvedType};
use crate::types::{TypeCatalog, TypeDefinition};

/// Binds column references to a FROM type and a property id.
///
/// `froms` maps each FROM alias (or the type query name when unaliased) to
/// the type query name.
pub struct ColumnResolver;

impl ColumnResolver {
    /// Returns `None` only for an unqualified `*`, which stays unbound.
    pub fn resolve(
        col: &ColumnReference,
        froms: &IndexMap<String, String>,
        catalog: &dyn TypeCatalog,
    ) -> Result<Option<ResolvedType>, QueryError> {
        match &col.type_query_name {
            Some(qualifier) => Self::resolve_qualified(qualifier, col, froms, catalog).map(Some),
            None => Self::resolve_unqualified(col, froms, catalog),
        }
    }

    pub fn resolve_unqualified(
        col: &ColumnReference,
        froms: &IndexMap<String, String>,
        catalog: &dyn TypeCatalog,
    ) -> Result<Option<ResolvedType>, QueryError> {
        let name = &col.property_query_name;
        let mut matches: Vec<&TypeDefinition> = Vec::new();

        for type_query_name in froms.values() {
            let td = catalog.type_by_query_name(type_query_name)
                .ok_or_else(|| QueryError::TypeOrAliasNotFound(type_query_name.clone()))?;
            if !col.is_wildcard() && catalog.type_contains_property_with_query_name(td, name) {
                matches.push(td);
            }
        }

        if col.is_wildcard() {
            trace!("unqualified wildcard left unbound");
            return Ok(None);
        }

        match matches.len() {
            0 => Err(QueryError::PropertyNotFound(name.clone())),
            1 => Self::bind(matches[0], col, catalog).map(Some),
            _ => Err(QueryError::AmbiguousProperty {
                property: name.clone(),
                types: matches.iter().map(|td| td.query_name().to_string()).collect(),
            }),
        }
    }

    pub fn resolve_qualified(
        qualifier: &str,
        col: &ColumnReference,
        froms: &IndexMap<String, String>,
        catalog: &dyn TypeCatalog,
    ) -> Result<ResolvedType, QueryError> {
        let td = Self::referenced_type_query_name(qualifier, froms)
            .and_then(|type_query_name| catalog.type_by_query_name(type_query_name))
            .ok_or_else(|| QueryError::TypeOrAliasNotFound(qualifier.to_string()))?;
        Self::bind(td, col, catalog)
    }

    /// A qualifier is either a FROM alias or a type query name in FROM.
    pub fn referenced_type_query_name<'f>(qualifier: &str, froms: &'f IndexMap<String, String>) -> Option<&'f str> {
        froms.get(qualifier)
            .or_else(|| froms.values().find(|type_query_name| *type_query_name == qualifier))
            .map(|s| s.as_str())
    }

    fn bind(td: &TypeDefinition, col: &ColumnReference, catalog: &dyn TypeCatalog) -> Result<ResolvedType, QueryError> {
        if col.is_wildcard() {
            trace!("bind {}.* to type {}", td.query_name(), td.id());
            return Ok(ResolvedType { type_id: td.id().to_string(), property_id: None });
        }

        let property_id = catalog.property_id_for_query_name(td, &col.property_query_name)
            .ok_or_else(|| QueryError::UnknownProperty {
                property: col.property_query_name.clone(),
                type_id: td.id().to_string(),
            })?;
        trace!("bind {} to {}:{}", col.property_query_name, td.id(), property_id);
        Ok(ResolvedType { type_id: td.id().to_string(), property_id: Some(property_id) })
    }
}
