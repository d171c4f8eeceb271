use indexmap::IndexMap;
use tracing::{debug, trace};

use crate::parser::CmisQueryParser;
use crate::query::{ColumnResolver, NodeKey, QueryError, Selector, SelectorId, SortSpec, WhereTree};
use crate::types::{TypeCatalog, TypeDefinition};

/// Semantic model of one CMISQL statement.
///
/// The parser registers every selector it meets, keyed by the char offset
/// of its node. `resolve_types` then binds column references to FROM types
/// and property ids. Selectors live in an arena and every list refers to
/// them by `SelectorId`, so alias substitution only moves ids around.
pub struct QueryObject<'a> {
    catalog: &'a dyn TypeCatalog,
    selectors: Vec<Selector>,
    select_references: Vec<SelectorId>,
    where_references: Vec<SelectorId>,
    join_references: Vec<SelectorId>,
    column_references: IndexMap<NodeKey, SelectorId>,
    aliases: IndexMap<String, SelectorId>,
    froms: IndexMap<String, String>,
    sort_specs: Vec<SortSpec>,
    where_tree: Option<WhereTree>,
}

impl<'a> QueryObject<'a> {
    pub fn new(catalog: &'a dyn TypeCatalog) -> Self {
        Self {
            catalog,
            selectors: vec![],
            select_references: vec![],
            where_references: vec![],
            join_references: vec![],
            column_references: IndexMap::new(),
            aliases: IndexMap::new(),
            froms: IndexMap::new(),
            sort_specs: vec![],
            where_tree: None,
        }
    }

    /// Parse `statement` into a new query object and resolve it.
    pub fn analyze(statement: &str, catalog: &'a dyn TypeCatalog) -> Result<Self, QueryError> {
        let mut query = Self::new(catalog);
        CmisQueryParser::parse(statement, &mut query)?;
        query.resolve_types()?;
        Ok(query)
    }

    pub fn catalog(&self) -> &'a dyn TypeCatalog {
        self.catalog
    }

    fn push(&mut self, key: NodeKey, selector: Selector) -> SelectorId {
        let id = SelectorId(self.selectors.len());
        self.selectors.push(selector);
        self.column_references.insert(key, id);
        id
    }

    pub fn register_select(&mut self, key: NodeKey, selector: impl Into<Selector>) -> SelectorId {
        let selector = selector.into();
        debug!("register select: {:?} at {}", selector, key);
        let id = self.push(key, selector);
        self.select_references.push(id);
        id
    }

    pub fn register_alias(&mut self, alias: &str, id: SelectorId) -> Result<(), QueryError> {
        debug!("register alias: {} for {:?}", alias, id);
        if self.aliases.contains_key(alias) {
            return QueryError::DuplicateAlias(alias.to_string()).err();
        }
        self.selectors[id.0].set_alias_name(alias)?;
        self.aliases.insert(alias.to_string(), id);
        Ok(())
    }

    /// Returns the FROM key: the alias, or the type query name when there
    /// is none.
    pub fn register_from_type(&mut self, alias: Option<&str>, type_query_name: &str) -> Result<String, QueryError> {
        debug!("register from type: {} as {:?}", type_query_name, alias);
        let key = alias.unwrap_or(type_query_name).to_string();
        if self.froms.contains_key(&key) {
            return QueryError::DuplicateFromAlias(key).err();
        }
        self.froms.insert(key.clone(), type_query_name.to_string());
        Ok(key)
    }

    pub fn register_where(&mut self, key: NodeKey, selector: impl Into<Selector>) -> SelectorId {
        let selector = selector.into();
        debug!("register where: {:?} at {}", selector, key);
        let id = self.push(key, selector);
        self.where_references.push(id);
        id
    }

    pub fn register_join(&mut self, key: NodeKey, selector: impl Into<Selector>) -> SelectorId {
        let selector = selector.into();
        debug!("register join: {:?} at {}", selector, key);
        let id = self.push(key, selector);
        self.join_references.push(id);
        id
    }

    pub fn register_sort(&mut self, key: NodeKey, selector: impl Into<Selector>, ascending: bool) -> SelectorId {
        let selector = selector.into();
        debug!("register sort: {:?} at {} ascending: {}", selector, key, ascending);
        let id = self.push(key, selector);
        self.sort_specs.push(SortSpec::new(key, ascending));
        id
    }

    pub fn set_where_tree(&mut self, tree: WhereTree) {
        self.where_tree = Some(tree);
    }

    pub fn where_tree(&self) -> Option<&WhereTree> {
        self.where_tree.as_ref()
    }

    /// Bind every column reference to a FROM type and property id.
    ///
    /// Aliased columns are resolved first. Uses of an alias elsewhere are
    /// then pointed at the aliased selector, and whatever is still unbound
    /// is resolved on its own. An unqualified `*` stays unbound.
    pub fn resolve_types(&mut self) -> Result<(), QueryError> {
        if self.froms.is_empty() {
            return QueryError::NoSourceType.err();
        }
        debug!("resolve types: {} selectors, {} aliases, {} from types",
            self.selectors.len(), self.aliases.len(), self.froms.len());

        let aliased: Vec<SelectorId> = self.aliases.values().copied().collect();
        for id in aliased {
            self.resolve_selector(id)?;
        }

        for id in self.column_references.values_mut() {
            let Some(target) = self.aliases.get(self.selectors[id.0].name()).copied() else {
                continue;
            };
            if *id == target {
                continue;
            }
            trace!("substitute {:?} with alias target {:?}", id, target);
            Self::substitute(&mut self.where_references, *id, target);
            Self::substitute(&mut self.join_references, *id, target);
            *id = target;
        }

        let remaining: Vec<SelectorId> = self.column_references.values().copied().collect();
        for id in remaining {
            let unresolved = self.selectors[id.0].as_column().is_some_and(|col| !col.is_resolved());
            if unresolved {
                self.resolve_selector(id)?;
            }
        }

        Ok(())
    }

    fn resolve_selector(&mut self, id: SelectorId) -> Result<(), QueryError> {
        let Some(col) = self.selectors[id.0].as_column() else {
            return Ok(());
        };
        let resolved = ColumnResolver::resolve(col, &self.froms, self.catalog)?;
        if let (Some(resolved), Some(col)) = (resolved, self.selectors[id.0].as_column_mut()) {
            col.set_resolved(resolved);
        }
        Ok(())
    }

    fn substitute(list: &mut [SelectorId], from: SelectorId, to: SelectorId) {
        for slot in list.iter_mut().filter(|slot| **slot == from) {
            *slot = to;
        }
    }

    pub fn selector(&self, id: SelectorId) -> &Selector {
        &self.selectors[id.0]
    }

    /// FROM mapping: alias (or type query name) to type query name.
    pub fn types(&self) -> &IndexMap<String, String> {
        &self.froms
    }

    pub fn type_query_name(&self, alias: &str) -> Option<&str> {
        self.froms.get(alias).map(|s| s.as_str())
    }

    pub fn main_type_alias(&self) -> Option<&str> {
        self.froms.keys().next().map(|s| s.as_str())
    }

    /// Type of the first FROM entry.
    pub fn main_from_type(&self) -> Option<&'a TypeDefinition> {
        self.froms.values().next().and_then(|qn| self.catalog.type_by_query_name(qn))
    }

    pub fn type_definition_from_query_name(&self, query_name: &str) -> Option<&'a TypeDefinition> {
        self.catalog.type_by_query_name(query_name)
    }

    pub fn parent_type(&self, td: &TypeDefinition) -> Option<&'a TypeDefinition> {
        td.parent_type_id.as_deref().and_then(|id| self.catalog.type_by_id(id))
    }

    pub fn column_reference(&self, key: NodeKey) -> Option<&Selector> {
        self.column_references.get(&key).map(|id| self.selector(*id))
    }

    pub fn column_references(&self) -> impl Iterator<Item = (NodeKey, &Selector)> {
        self.column_references.iter().map(|(key, id)| (*key, self.selector(*id)))
    }

    pub fn select_references(&self) -> Vec<&Selector> {
        self.select_references.iter().map(|id| self.selector(*id)).collect()
    }

    pub fn where_references(&self) -> Vec<&Selector> {
        self.where_references.iter().map(|id| self.selector(*id)).collect()
    }

    pub fn join_references(&self) -> Vec<&Selector> {
        self.join_references.iter().map(|id| self.selector(*id)).collect()
    }

    pub fn sort_specs(&self) -> &[SortSpec] {
        &self.sort_specs
    }

    /// ORDER BY keys with their (alias-substituted) selectors.
    pub fn order_by(&self) -> Vec<(&Selector, bool)> {
        self.sort_specs.iter()
            .filter_map(|spec| self.column_reference(spec.key).map(|sel| (sel, spec.ascending)))
            .collect()
    }

    /// Selected properties: property id (or `*`) to display name.
    pub fn requested_properties(&self) -> IndexMap<String, String> {
        self.select_references.iter()
            .filter_map(|id| self.selector(*id).as_column())
            .map(|col| (
                col.property_id().unwrap_or("*").to_string(),
                col.alias_name.clone().unwrap_or_else(|| col.property_query_name.clone()),
            ))
            .collect()
    }

    /// Selected functions: function name to display name.
    pub fn requested_functions(&self) -> IndexMap<String, String> {
        self.select_references.iter()
            .filter_map(|id| self.selector(*id).as_function())
            .map(|func| (func.name.clone(), func.alias_name.clone().unwrap_or_else(|| func.name.clone())))
            .collect()
    }
}
