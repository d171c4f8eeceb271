use std::fmt::Display;

use crate::parser::ParseError;

#[derive(Debug, Clone, PartialEq)]
pub enum QueryError {
    /// A selector alias was registered twice.
    DuplicateAlias(String),
    /// Two FROM entries share the same alias or type query name.
    DuplicateFromAlias(String),
    TypeOrAliasNotFound(String),
    UnknownProperty { property: String, type_id: String },
    AmbiguousProperty { property: String, types: Vec<String> },
    PropertyNotFound(String),
    NoSourceType,
    MalformedWhere { kind: String, children: usize },
    Parse(ParseError),
    /// Raised by condition processors.
    Processor(String),
}

impl QueryError {
    pub fn err<T>(self) -> Result<T, QueryError> {
        Err(self)
    }
}

impl Display for QueryError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            QueryError::DuplicateAlias(alias) => write!(f, "Alias name {} is not unique", alias),
            QueryError::DuplicateFromAlias(alias) => write!(f, "More than one type with the same alias or name: {}", alias),
            QueryError::TypeOrAliasNotFound(name) => write!(f, "{} is neither a type query name nor an alias.", name),
            QueryError::UnknownProperty { property, type_id } =>
                write!(f, "{} is not a property query name in type {}.", property, type_id),
            QueryError::AmbiguousProperty { property, types } =>
                write!(f, "{} is an ambiguous property query name, it is contained in types {}.", property, types.join(", ")),
            QueryError::PropertyNotFound(property) =>
                write!(f, "{} is not a property query name in any of the types in from ...", property),
            QueryError::NoSourceType => write!(f, "Query has no type in FROM."),
            QueryError::MalformedWhere { kind, children } =>
                write!(f, "Malformed WHERE node {} with {} children.", kind, children),
            QueryError::Parse(e) => write!(f, "{}", e),
            QueryError::Processor(message) => write!(f, "{}", message),
        }
    }
}

impl std::error::Error for QueryError {}

impl From<ParseError> for QueryError {
    fn from(value: ParseError) -> Self {
        QueryError::Parse(value)
    }
}
