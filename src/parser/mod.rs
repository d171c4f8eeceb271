pub mod query_parser;
pub use query_parser::*;

pub mod parse_error;
pub use parse_error::*;

pub mod word_comparer;
pub use word_comparer::*;

pub mod query_comparers;
pub use query_comparers::*;

pub mod text_collector;
pub use text_collector::*;

pub mod literals;

pub mod statement;

pub mod cmis_query_parser;
pub use cmis_query_parser::*;
