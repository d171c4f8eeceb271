use crate::query::QueryError;

/// Char offset of a parse-tree node in the statement text.
pub type NodeKey = usize;

/// Index of a selector in the query object's arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SelectorId(pub(crate) usize);

/// Type and property a column reference was bound to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedType {
    pub type_id: String,
    /// `None` for a `qualifier.*` wildcard.
    pub property_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnReference {
    pub type_query_name: Option<String>,
    pub property_query_name: String,
    pub alias_name: Option<String>,
    resolved: Option<ResolvedType>,
}

impl ColumnReference {
    pub fn new(property_query_name: &str) -> Self {
        Self {
            type_query_name: None,
            property_query_name: property_query_name.to_string(),
            alias_name: None,
            resolved: None,
        }
    }

    pub fn qualified(type_query_name: &str, property_query_name: &str) -> Self {
        Self {
            type_query_name: Some(type_query_name.to_string()),
            ..Self::new(property_query_name)
        }
    }

    pub fn is_wildcard(&self) -> bool {
        self.property_query_name == "*"
    }

    pub fn is_resolved(&self) -> bool {
        self.resolved.is_some()
    }

    pub fn resolved(&self) -> Option<&ResolvedType> {
        self.resolved.as_ref()
    }

    pub fn type_id(&self) -> Option<&str> {
        self.resolved.as_ref().map(|r| r.type_id.as_str())
    }

    pub fn property_id(&self) -> Option<&str> {
        self.resolved.as_ref().and_then(|r| r.property_id.as_deref())
    }

    pub(crate) fn set_resolved(&mut self, resolved: ResolvedType) {
        self.resolved = Some(resolved);
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FunctionReference {
    pub name: String,
    pub alias_name: Option<String>,
}

impl FunctionReference {
    pub const SCORE: &'static str = "SCORE";

    pub fn score() -> Self {
        Self { name: Self::SCORE.to_string(), alias_name: None }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selector {
    Column(ColumnReference),
    Function(FunctionReference),
}

impl Selector {
    /// Property query name for columns, function name for functions.
    pub fn name(&self) -> &str {
        match self {
            Selector::Column(c) => &c.property_query_name,
            Selector::Function(f) => &f.name,
        }
    }

    pub fn alias_name(&self) -> Option<&str> {
        match self {
            Selector::Column(c) => c.alias_name.as_deref(),
            Selector::Function(f) => f.alias_name.as_deref(),
        }
    }

    /// Aliases are write-once.
    pub fn set_alias_name(&mut self, alias: &str) -> Result<(), QueryError> {
        let slot = match self {
            Selector::Column(c) => &mut c.alias_name,
            Selector::Function(f) => &mut f.alias_name,
        };
        if let Some(existing) = slot {
            return QueryError::DuplicateAlias(format!("{} (already aliased as {})", alias, existing)).err();
        }
        *slot = Some(alias.to_string());
        Ok(())
    }

    pub fn as_column(&self) -> Option<&ColumnReference> {
        match self {
            Selector::Column(c) => Some(c),
            Selector::Function(_) => None,
        }
    }

    pub fn as_column_mut(&mut self) -> Option<&mut ColumnReference> {
        match self {
            Selector::Column(c) => Some(c),
            Selector::Function(_) => None,
        }
    }

    pub fn as_function(&self) -> Option<&FunctionReference> {
        match self {
            Selector::Function(f) => Some(f),
            Selector::Column(_) => None,
        }
    }
}

impl From<ColumnReference> for Selector {
    fn from(value: ColumnReference) -> Self {
        Selector::Column(value)
    }
}

impl From<FunctionReference> for Selector {
    fn from(value: FunctionReference) -> Self {
        Selector::Function(value)
    }
}
