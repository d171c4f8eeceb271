pub mod selector;
pub use selector::*;

pub mod sort_spec;
pub use sort_spec::*;

pub mod query_error;
pub use query_error::*;

pub mod where_tree;
pub use where_tree::*;

pub mod condition_processor;
pub use condition_processor::*;

pub mod resolvers;
pub use resolvers::*;

pub mod query_object;
pub use query_object::*;

mod where_dispatch;

#[cfg(test)]
pub(crate) mod _tests;
