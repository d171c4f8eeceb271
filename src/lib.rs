pub mod types;
pub use types::{Config, IdType, TypeCatalog, TypeDefinition, TypeError, TypeManager, PropertyDefinition};

pub mod parser;

pub mod query;
pub use query::{ConditionProcessor, QueryError, QueryObject};

pub mod executor;
pub use executor::{QueryExecutor, StoredObject};
