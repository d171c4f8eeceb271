pub mod literal;
pub use literal::*;

pub mod string_parser;
pub use string_parser::*;

pub mod number_parser;
pub use number_parser::*;

pub mod bool_parser;
pub use bool_parser::*;

pub mod timestamp_parser;
pub use timestamp_parser::*;

use crate::parser::{ParseError, QueryParser};

pub struct LiteralParser;

impl LiteralParser {
    pub fn is_literal(parser: &QueryParser) -> bool {
        StringParser::is_string_delimiter(parser) || NumberParser::is_number(parser) ||
            BoolParser::is_bool(parser) || TimestampParser::is_timestamp(parser)
    }

    pub fn parse(parser: &mut QueryParser) -> Result<Literal, ParseError> {
        if StringParser::is_string_delimiter(parser) {
            return StringParser::parse(parser);
        }
        if TimestampParser::is_timestamp(parser) {
            return TimestampParser::parse(parser);
        }
        if BoolParser::is_bool(parser) {
            return BoolParser::parse(parser);
        }
        NumberParser::parse(parser)
    }
}
