pub mod truth;
pub use truth::*;

pub mod stored_object;
pub use stored_object::*;

pub mod filter;
pub use filter::*;

pub mod filter_builder;
pub use filter_builder::*;

pub mod query_executor;
pub use query_executor::*;
