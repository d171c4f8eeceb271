pub mod column_resolver;
pub use column_resolver::*;
