use crate::parser::{statement::ColumnParser, ParseError, Phase, QueryParser};
use crate::query::{QueryError, QueryObject};

/// `ORDER BY key [ASC | DESC] {, key [ASC | DESC]}`. A key is a column,
/// a select alias or `SCORE()`.
pub struct OrderByParser;

impl OrderByParser {
    pub fn parse(parser: &mut QueryParser, query: &mut QueryObject) -> Result<(), QueryError> {
        let pivot = parser.position;
        if !parser.consume(|c| &c.order_by) {
            return Err(ParseError::new("Expected ORDER BY", pivot, parser).into());
        }
        parser.phase = Phase::OrderBy;

        loop {
            parser.next_non_whitespace();
            let term = ColumnParser::parse(parser, false)?;
            parser.next_non_whitespace();

            let ascending = if parser.consume(|c| &c.desc) {
                false
            } else {
                parser.consume(|c| &c.asc);
                true
            };
            query.register_sort(term.key, term.selector, ascending);

            parser.next_non_whitespace();
            if parser.current() == ',' {
                parser.next();
                continue;
            }
            if parser.check_next_phase() && parser.phase == Phase::EOF {
                return Ok(());
            }
            return Err(ParseError::new("Invalid ORDER BY clause", pivot, parser).into());
        }
    }
}
