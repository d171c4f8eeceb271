use tracing::debug;

use crate::parser::statement::{FromParser, OrderByParser, SelectParser, WhereParser};
use crate::parser::{ParseError, Phase, QueryParser};
use crate::query::{QueryError, QueryObject};

/// Drives the clause parsers over a statement, feeding the query object.
pub struct CmisQueryParser;

impl CmisQueryParser {
    pub fn parse(statement: &str, query: &mut QueryObject) -> Result<(), QueryError> {
        debug!("parse statement: {}", statement);
        let mut parser = QueryParser::new(statement);
        parser.next_non_whitespace();

        SelectParser::parse(&mut parser, query)?;
        if parser.phase != Phase::From {
            return Err(ParseError::new("Missing FROM clause", 0, &parser).into());
        }

        FromParser::parse(&mut parser, query)?;
        if parser.phase == Phase::Where {
            WhereParser::parse(&mut parser, query)?;
        }
        if parser.phase == Phase::OrderBy {
            OrderByParser::parse(&mut parser, query)?;
        }
        if parser.phase != Phase::EOF {
            let position = parser.position;
            return Err(ParseError::new("Unexpected input", position, &parser).into());
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::parser::CmisQueryParser;
    use crate::query::{_tests::fixtures::catalog, QueryError, QueryObject, WhereKind};

    #[test]
    fn test_full_statement() {
        let catalog = catalog();
        let mut query = QueryObject::new(&catalog);
        CmisQueryParser::parse(
            "SELECT d.cmis:name AS n, SCORE() s FROM cmis:document d WHERE CONTAINS('x') AND n LIKE 'a%' ORDER BY n DESC",
            &mut query,
        ).unwrap();

        assert_eq!(query.select_references().len(), 2);
        assert_eq!(query.types().len(), 1);
        assert_eq!(query.where_references().len(), 1);
        assert_eq!(query.sort_specs().len(), 1);
        let tree = query.where_tree().unwrap();
        assert_eq!(tree.child(tree.root().unwrap(), 0).unwrap().kind, WhereKind::And);
    }

    #[test]
    fn test_statement_without_where() {
        let catalog = catalog();
        let mut query = QueryObject::new(&catalog);
        CmisQueryParser::parse("  select * from cmis:folder order by cmis:name", &mut query).unwrap();
        assert!(query.where_tree().is_none());
        assert_eq!(query.sort_specs().len(), 1);
    }

    #[test]
    fn test_rejects_broken_statements() {
        for text in ["", "SELECT", "SELECT * FROM", "FROM cmis:document", "SELECT * FROM cmis:document WHERE"] {
            let catalog = catalog();
            let mut query = QueryObject::new(&catalog);
            assert!(matches!(CmisQueryParser::parse(text, &mut query), Err(QueryError::Parse(_))), "{text:?}");
        }
    }

    #[test]
    fn test_keywords_split_by_any_whitespace() {
        let statements = [
            ("SELECT * FROM cmis:document WHERE cmis:name IS  NULL", WhereKind::IsNull),
            ("SELECT * FROM cmis:document WHERE cmis:name IS\nNOT \t NULL", WhereKind::IsNotNull),
            ("SELECT * FROM cmis:document WHERE cmis:name NOT\tIN ('a')", WhereKind::NotIn),
            ("SELECT * FROM cmis:document WHERE cmis:name NOT  LIKE 'a%'", WhereKind::NotLike),
        ];
        for (text, kind) in statements {
            let catalog = catalog();
            let query = QueryObject::analyze(text, &catalog).unwrap();
            let tree = query.where_tree().unwrap();
            assert_eq!(tree.child(tree.root().unwrap(), 0).unwrap().kind, kind, "{text:?}");
        }

        for text in [
            "SELECT * FROM cmis:document ORDER  BY cmis:name",
            "SELECT * FROM cmis:document ORDER\nBY cmis:name DESC",
            "SELECT * FROM cmis:document d LEFT\n OUTER  JOIN cmis:folder f ON d.cmis:objectId = f.cmis:objectId ORDER BY d.cmis:name",
        ] {
            let catalog = catalog();
            let query = QueryObject::analyze(text, &catalog).unwrap();
            assert_eq!(query.sort_specs().len(), 1, "{text:?}");
        }
    }
}
