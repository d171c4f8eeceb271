use crate::parser::{statement::ColumnParser, ParseError, Phase, QueryParser, TextCollector};
use crate::query::{QueryError, QueryObject};

/// `SELECT item [[AS] alias] {, item [[AS] alias]}`, up to `FROM`.
pub struct SelectParser;

impl SelectParser {
    pub fn parse(parser: &mut QueryParser, query: &mut QueryObject) -> Result<(), QueryError> {
        let pivot = parser.position;
        if !parser.consume(|c| &c.select) {
            return Err(ParseError::new("Expected SELECT", pivot, parser).into());
        }

        loop {
            parser.next_non_whitespace();
            let term = ColumnParser::parse(parser, true)?;
            parser.next_non_whitespace();
            let alias = Self::parse_alias(parser)?;

            if alias.is_some() && term.is_wildcard() {
                return Err(ParseError::new("Wildcards cannot be aliased", term.key, parser).into());
            }

            let id = query.register_select(term.key, term.selector);
            if let Some(alias) = alias {
                query.register_alias(&alias, id)?;
            }

            parser.next_non_whitespace();
            if parser.current() == ',' {
                parser.next();
                continue;
            }
            if parser.check_next_phase() && parser.phase == Phase::From {
                return Ok(());
            }
            return Err(ParseError::new("Invalid select list, expected FROM", pivot, parser).into());
        }
    }

    /// Optional `AS alias` or bare alias.
    pub fn parse_alias(parser: &mut QueryParser) -> Result<Option<String>, ParseError> {
        if parser.consume(|c| &c.alias) {
            parser.next_non_whitespace();
            return TextCollector::collect(parser).map(Some);
        }
        if TextCollector::is_identifier_start(parser.current()) && !parser.comparers.is_reserved(parser) {
            return TextCollector::collect(parser).map(Some);
        }
        Ok(None)
    }
}

#[cfg(test)]
mod tests {
    use crate::parser::{statement::SelectParser, Phase, QueryParser};
    use crate::query::{_tests::fixtures::catalog, QueryError, QueryObject};

    #[test]
    fn test_select_list_with_aliases() {
        let catalog = catalog();
        let mut query = QueryObject::new(&catalog);
        let mut parser = QueryParser::new("SELECT cmis:name AS n, d.cmis:objectId id, *, SCORE() FROM cmis:document d");

        SelectParser::parse(&mut parser, &mut query).unwrap();
        assert_eq!(parser.phase, Phase::From);

        let names: Vec<_> = query.select_references().iter().map(|s| s.name().to_string()).collect();
        assert_eq!(names, vec!["cmis:name", "cmis:objectId", "*", "SCORE"]);
        let aliases: Vec<_> = query.select_references().iter().map(|s| s.alias_name().map(str::to_string)).collect();
        assert_eq!(aliases, vec![Some("n".to_string()), Some("id".to_string()), None, None]);
        assert_eq!(query.column_reference(7).map(|s| s.name()), Some("cmis:name"));
    }

    #[test]
    fn test_select_duplicate_alias() {
        let catalog = catalog();
        let mut query = QueryObject::new(&catalog);
        let mut parser = QueryParser::new("SELECT cmis:name AS x, cmis:objectId AS x FROM cmis:document");

        assert_eq!(SelectParser::parse(&mut parser, &mut query), Err(QueryError::DuplicateAlias("x".into())));
    }

    #[test]
    fn test_select_without_from() {
        let catalog = catalog();
        let mut query = QueryObject::new(&catalog);
        let mut parser = QueryParser::new("SELECT cmis:name");

        assert!(matches!(SelectParser::parse(&mut parser, &mut query), Err(QueryError::Parse(_))));
    }
}
