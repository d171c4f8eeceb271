use crate::parser::{statement::ColumnParser, ParseError, Phase, QueryParser, TextCollector};
use crate::parser::statement::SelectParser;
use crate::query::{QueryError, QueryObject};

/// `FROM type [[AS] alias] {, type [[AS] alias]}` followed by any number
/// of `[INNER | LEFT [OUTER]] JOIN type [[AS] alias] ON col = col`.
pub struct FromParser;

impl FromParser {
    pub fn parse(parser: &mut QueryParser, query: &mut QueryObject) -> Result<(), QueryError> {
        let pivot = parser.position;
        if !parser.consume(|c| &c.from) {
            return Err(ParseError::new("Expected FROM", pivot, parser).into());
        }
        parser.phase = Phase::From;

        loop {
            parser.next_non_whitespace();
            Self::parse_type_reference(parser, query)?;
            parser.next_non_whitespace();
            if parser.current() == ',' {
                parser.next();
                continue;
            }
            if parser.check_next_phase() {
                break;
            }
            return Err(ParseError::new("Invalid FROM clause", pivot, parser).into());
        }

        while parser.phase == Phase::Joins {
            Self::parse_join(parser, query)?;
            if !parser.check_next_phase() {
                return Err(ParseError::new("Invalid JOIN clause", pivot, parser).into());
            }
        }

        Ok(())
    }

    fn parse_type_reference(parser: &mut QueryParser, query: &mut QueryObject) -> Result<(), QueryError> {
        let type_query_name = TextCollector::collect(parser)?;
        parser.next_non_whitespace();
        let alias = SelectParser::parse_alias(parser)?;
        query.register_from_type(alias.as_deref(), &type_query_name)?;
        Ok(())
    }

    fn parse_join(parser: &mut QueryParser, query: &mut QueryObject) -> Result<(), QueryError> {
        let pivot = parser.position;
        if !parser.consume_join() {
            return Err(ParseError::new("Expected JOIN", pivot, parser).into());
        }
        parser.next_non_whitespace();
        Self::parse_type_reference(parser, query)?;

        parser.next_non_whitespace();
        if !parser.consume(|c| &c.on) {
            return Err(ParseError::new("Expected ON", pivot, parser).into());
        }

        parser.next_non_whitespace();
        let left = ColumnParser::parse(parser, false)?;
        parser.next_non_whitespace();
        if parser.current() != '=' {
            return Err(ParseError::new("JOIN condition must be an equality", pivot, parser).into());
        }
        parser.next();
        parser.next_non_whitespace();
        let right = ColumnParser::parse(parser, false)?;

        if left.is_function() || right.is_function() {
            return Err(ParseError::new("JOIN condition must compare columns", pivot, parser).into());
        }
        query.register_join(left.key, left.selector);
        query.register_join(right.key, right.selector);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::parser::{statement::FromParser, Phase, QueryParser};
    use crate::query::{_tests::fixtures::catalog, QueryError, QueryObject};

    #[test]
    fn test_from_list() {
        let catalog = catalog();
        let mut query = QueryObject::new(&catalog);
        let mut parser = QueryParser::new("FROM cmis:document AS d, cmis:folder WHERE x = 1");

        FromParser::parse(&mut parser, &mut query).unwrap();
        assert_eq!(parser.phase, Phase::Where);
        let froms: Vec<_> = query.types().iter().map(|(k, v)| (k.as_str(), v.as_str())).collect();
        assert_eq!(froms, vec![("d", "cmis:document"), ("cmis:folder", "cmis:folder")]);
    }

    #[test]
    fn test_from_with_joins() {
        let catalog = catalog();
        let mut query = QueryObject::new(&catalog);
        let mut parser = QueryParser::new(
            "FROM cmis:document d JOIN cmis:folder f ON d.cmis:parentId = f.cmis:objectId LEFT OUTER JOIN cmis:item i ON i.cmis:objectId=d.cmis:objectId"
        );

        FromParser::parse(&mut parser, &mut query).unwrap();
        assert_eq!(parser.phase, Phase::EOF);
        assert_eq!(query.types().len(), 3);
        let joins: Vec<_> = query.join_references().iter().map(|s| s.name().to_string()).collect();
        assert_eq!(joins, vec!["cmis:parentId", "cmis:objectId", "cmis:objectId", "cmis:objectId"]);
    }

    #[test]
    fn test_from_duplicate_alias() {
        let catalog = catalog();
        let mut query = QueryObject::new(&catalog);
        let mut parser = QueryParser::new("FROM cmis:document x, cmis:folder x");

        assert_eq!(FromParser::parse(&mut parser, &mut query), Err(QueryError::DuplicateFromAlias("x".into())));
    }

    #[test]
    fn test_from_duplicate_type_without_alias() {
        let catalog = catalog();
        let mut query = QueryObject::new(&catalog);
        let mut parser = QueryParser::new("FROM cmis:document, cmis:document");

        assert_eq!(
            FromParser::parse(&mut parser, &mut query),
            Err(QueryError::DuplicateFromAlias("cmis:document".into()))
        );
    }
}
