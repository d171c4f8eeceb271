use crate::parser::{ParseError, QueryParser, TextCollector};
use crate::query::{ColumnReference, FunctionReference, NodeKey, Selector};

/// A column-like term: `name`, `qualifier.name`, `*`, `qualifier.*` or
/// `SCORE()`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnTerm {
    pub key: NodeKey,
    pub selector: Selector,
}

impl ColumnTerm {
    pub fn is_wildcard(&self) -> bool {
        self.selector.as_column().is_some_and(|c| c.is_wildcard())
    }

    pub fn is_function(&self) -> bool {
        self.selector.as_function().is_some()
    }
}

pub struct ColumnParser;

impl ColumnParser {
    pub fn parse(parser: &mut QueryParser, allow_wildcard: bool) -> Result<ColumnTerm, ParseError> {
        let key = parser.position;

        if parser.current() == '*' {
            if !allow_wildcard {
                return Err(ParseError::new("Wildcard not allowed here", key, parser));
            }
            parser.next();
            return Ok(ColumnTerm { key, selector: ColumnReference::new("*").into() });
        }

        if parser.consume(|c| &c.score) {
            parser.next_non_whitespace();
            if parser.current() != '(' {
                return Err(ParseError::new("Invalid SCORE function", key, parser));
            }
            parser.next();
            parser.next_non_whitespace();
            if parser.current() != ')' {
                return Err(ParseError::new("SCORE takes no arguments", key, parser));
            }
            parser.next();
            return Ok(ColumnTerm { key, selector: FunctionReference::score().into() });
        }

        let name = TextCollector::collect(parser)?;
        if parser.current() != '.' {
            return Ok(ColumnTerm { key, selector: ColumnReference::new(&name).into() });
        }

        parser.next();
        if parser.current() == '*' {
            if !allow_wildcard {
                return Err(ParseError::new("Wildcard not allowed here", key, parser));
            }
            parser.next();
            return Ok(ColumnTerm { key, selector: ColumnReference::qualified(&name, "*").into() });
        }

        let property = TextCollector::collect(parser)?;
        Ok(ColumnTerm { key, selector: ColumnReference::qualified(&name, &property).into() })
    }
}
