use crate::parser::literals::{LiteralParser, StringParser};
use crate::parser::{statement::ColumnParser, ParseError, Phase, QueryParser, TextCollector};
use crate::query::{NodeId, QueryError, QueryObject, WhereKind, WhereTree};

/// Builds the WHERE condition tree and registers its column operands.
///
/// Precedence, loosest first: `OR`, `AND`, `NOT`, then predicates and
/// parenthesised conditions.
pub struct WhereParser;

impl WhereParser {
    pub fn parse(parser: &mut QueryParser, query: &mut QueryObject) -> Result<(), QueryError> {
        let pivot = parser.position;
        if !parser.consume(|c| &c.r#where) {
            return Err(ParseError::new("Expected WHERE", pivot, parser).into());
        }
        parser.phase = Phase::Where;

        let mut tree = WhereTree::new();
        let condition = Self::parse_or(parser, query, &mut tree)?;
        if !parser.check_next_phase() {
            return Err(ParseError::new("Invalid WHERE clause", pivot, parser).into());
        }

        tree.set_condition(pivot, condition);
        query.set_where_tree(tree);
        Ok(())
    }

    fn parse_or(parser: &mut QueryParser, query: &mut QueryObject, tree: &mut WhereTree) -> Result<NodeId, QueryError> {
        let mut left = Self::parse_and(parser, query, tree)?;
        loop {
            parser.next_non_whitespace();
            let key = parser.position;
            if !parser.consume(|c| &c.or) {
                return Ok(left);
            }
            let right = Self::parse_and(parser, query, tree)?;
            left = tree.add(key, WhereKind::Or, vec![left, right]);
        }
    }

    fn parse_and(parser: &mut QueryParser, query: &mut QueryObject, tree: &mut WhereTree) -> Result<NodeId, QueryError> {
        let mut left = Self::parse_not(parser, query, tree)?;
        loop {
            parser.next_non_whitespace();
            let key = parser.position;
            if !parser.consume(|c| &c.and) {
                return Ok(left);
            }
            let right = Self::parse_not(parser, query, tree)?;
            left = tree.add(key, WhereKind::And, vec![left, right]);
        }
    }

    fn parse_not(parser: &mut QueryParser, query: &mut QueryObject, tree: &mut WhereTree) -> Result<NodeId, QueryError> {
        parser.next_non_whitespace();
        let key = parser.position;
        if parser.consume(|c| &c.not) {
            let child = Self::parse_not(parser, query, tree)?;
            return Ok(tree.add(key, WhereKind::Not, vec![child]));
        }
        Self::parse_test(parser, query, tree)
    }

    fn parse_test(parser: &mut QueryParser, query: &mut QueryObject, tree: &mut WhereTree) -> Result<NodeId, QueryError> {
        if parser.current() != '(' {
            return Self::parse_predicate(parser, query, tree);
        }

        let pivot = parser.position;
        parser.next();
        let inner = Self::parse_or(parser, query, tree)?;
        parser.next_non_whitespace();
        if parser.current() != ')' {
            return Err(ParseError::new("Missing closing parenthesis", pivot, parser).into());
        }
        parser.next();
        Ok(inner)
    }

    fn parse_predicate(parser: &mut QueryParser, query: &mut QueryObject, tree: &mut WhereTree) -> Result<NodeId, QueryError> {
        let key = parser.position;

        if let Some(node) = Self::parse_text_function(parser, tree)? {
            return Ok(node);
        }

        if parser.consume(|c| &c.any) {
            parser.next_non_whitespace();
            let column = Self::parse_column(parser, query, tree)?;
            parser.next_non_whitespace();
            let kind = if parser.consume(|c| &c.not_in) {
                WhereKind::NotInAny
            } else if parser.consume(|c| &c.r#in) {
                WhereKind::InAny
            } else {
                return Err(ParseError::new("Expected IN after ANY column", key, parser).into());
            };
            let list = Self::parse_list(parser, tree)?;
            return Ok(tree.add(key, kind, vec![column, list]));
        }

        let left = Self::parse_operand(parser, query, tree)?;
        parser.next_non_whitespace();
        let op_key = parser.position;

        if let Some(kind) = Self::parse_comparison(parser) {
            parser.next_non_whitespace();
            if kind == WhereKind::Eq && parser.consume(|c| &c.any) {
                if !matches!(tree.node(left).kind, WhereKind::Literal(_)) {
                    return Err(ParseError::new("= ANY needs a literal on the left", key, parser).into());
                }
                parser.next_non_whitespace();
                let column = Self::parse_column(parser, query, tree)?;
                return Ok(tree.add(op_key, WhereKind::EqAny, vec![left, column]));
            }
            let right = Self::parse_operand(parser, query, tree)?;
            return Ok(tree.add(op_key, kind, vec![left, right]));
        }

        if parser.consume(|c| &c.is_not_null) {
            return Ok(tree.add(op_key, WhereKind::IsNotNull, vec![left]));
        }
        if parser.consume(|c| &c.is_null) {
            return Ok(tree.add(op_key, WhereKind::IsNull, vec![left]));
        }

        let kind = if parser.consume(|c| &c.not_in) {
            WhereKind::NotIn
        } else if parser.consume(|c| &c.r#in) {
            WhereKind::In
        } else if parser.consume(|c| &c.not_like) {
            WhereKind::NotLike
        } else if parser.consume(|c| &c.like) {
            WhereKind::Like
        } else {
            return Err(ParseError::new("Invalid predicate", key, parser).into());
        };

        let right = match kind {
            WhereKind::In | WhereKind::NotIn => Self::parse_list(parser, tree)?,
            _ => {
                parser.next_non_whitespace();
                Self::parse_operand(parser, query, tree)?
            }
        };
        Ok(tree.add(op_key, kind, vec![left, right]))
    }

    fn parse_comparison(parser: &mut QueryParser) -> Option<WhereKind> {
        if parser.consume(|c| &c.not_equal_b) || parser.consume(|c| &c.not_equal_c) {
            return Some(WhereKind::Neq);
        }
        if parser.consume(|c| &c.less_than_or_equal) {
            return Some(WhereKind::LtEq);
        }
        if parser.consume(|c| &c.greater_than_or_equal) {
            return Some(WhereKind::GtEq);
        }
        if parser.consume(|c| &c.equal) {
            return Some(WhereKind::Eq);
        }
        if parser.consume(|c| &c.less_than) {
            return Some(WhereKind::Lt);
        }
        if parser.consume(|c| &c.greater_than) {
            return Some(WhereKind::Gt);
        }
        None
    }

    /// `CONTAINS`, `IN_FOLDER` and `IN_TREE` with an optional qualifier.
    fn parse_text_function(parser: &mut QueryParser, tree: &mut WhereTree) -> Result<Option<NodeId>, QueryError> {
        let key = parser.position;
        let kind = if parser.consume(|c| &c.contains) {
            WhereKind::Contains
        } else if parser.consume(|c| &c.in_folder) {
            WhereKind::InFolder
        } else if parser.consume(|c| &c.in_tree) {
            WhereKind::InTree
        } else {
            return Ok(None);
        };

        parser.next_non_whitespace();
        if parser.current() != '(' {
            return Err(ParseError::new("Expected '('", key, parser).into());
        }
        parser.next();
        parser.next_non_whitespace();

        let mut children = vec![];
        if TextCollector::is_identifier_start(parser.current()) {
            let qualifier_key = parser.position;
            let qualifier = TextCollector::collect(parser)?;
            parser.next_non_whitespace();
            if parser.current() != ',' {
                return Err(ParseError::new("Expected ',' after qualifier", key, parser).into());
            }
            parser.next();
            parser.next_non_whitespace();
            children.push(tree.leaf(qualifier_key, WhereKind::Qualifier(qualifier)));
        }

        let argument_key = parser.position;
        let argument = StringParser::parse(parser)?;
        children.push(tree.leaf(argument_key, WhereKind::Literal(argument)));

        parser.next_non_whitespace();
        if parser.current() != ')' {
            return Err(ParseError::new("Expected ')'", key, parser).into());
        }
        parser.next();
        Ok(Some(tree.add(key, kind, children)))
    }

    fn parse_operand(parser: &mut QueryParser, query: &mut QueryObject, tree: &mut WhereTree) -> Result<NodeId, QueryError> {
        let key = parser.position;
        if LiteralParser::is_literal(parser) {
            let literal = LiteralParser::parse(parser)?;
            return Ok(tree.leaf(key, WhereKind::Literal(literal)));
        }

        let term = ColumnParser::parse(parser, false)?;
        let kind = if term.is_function() { WhereKind::Score } else { WhereKind::Column };
        query.register_where(term.key, term.selector);
        Ok(tree.leaf(term.key, kind))
    }

    fn parse_column(parser: &mut QueryParser, query: &mut QueryObject, tree: &mut WhereTree) -> Result<NodeId, QueryError> {
        let key = parser.position;
        let term = ColumnParser::parse(parser, false)?;
        if term.is_function() {
            return Err(ParseError::new("Expected a column", key, parser).into());
        }
        query.register_where(term.key, term.selector);
        Ok(tree.leaf(term.key, WhereKind::Column))
    }

    fn parse_list(parser: &mut QueryParser, tree: &mut WhereTree) -> Result<NodeId, QueryError> {
        parser.next_non_whitespace();
        let key = parser.position;
        if parser.current() != '(' {
            return Err(ParseError::new("Expected a value list", key, parser).into());
        }
        parser.next();

        let mut items = vec![];
        loop {
            parser.next_non_whitespace();
            let item_key = parser.position;
            let literal = LiteralParser::parse(parser)?;
            items.push(tree.leaf(item_key, WhereKind::Literal(literal)));

            parser.next_non_whitespace();
            match parser.current() {
                ',' => parser.next(),
                ')' => {
                    parser.next();
                    break;
                }
                _ => return Err(ParseError::new("Invalid value list", key, parser).into()),
            }
        }
        Ok(tree.add(key, WhereKind::List, items))
    }
}

#[cfg(test)]
mod tests {
    use crate::parser::literals::Literal;
    use crate::parser::{statement::WhereParser, Phase, QueryParser};
    use crate::query::{_tests::fixtures::catalog, QueryError, QueryObject, WhereKind, WhereNode, WhereTree};

    fn parse(text: &str) -> (WhereTree, Vec<String>) {
        let catalog = catalog();
        let mut query = QueryObject::new(&catalog);
        let mut parser = QueryParser::new(text);
        WhereParser::parse(&mut parser, &mut query).unwrap();
        assert_eq!(parser.phase, Phase::EOF);
        let names = query.where_references().iter().map(|s| s.name().to_string()).collect();
        (query.where_tree().unwrap().clone(), names)
    }

    fn condition(tree: &WhereTree) -> &WhereNode {
        tree.child(tree.root().unwrap(), 0).unwrap()
    }

    fn kinds<'t>(tree: &'t WhereTree, node: &'t WhereNode) -> Vec<&'t WhereKind> {
        tree.children(node).map(|n| &n.kind).collect()
    }

    #[test]
    fn test_precedence() {
        let (tree, names) = parse("WHERE a = 1 OR b < 2 AND NOT c IS NULL");
        let or = condition(&tree);
        assert_eq!(or.kind, WhereKind::Or);
        assert_eq!(kinds(&tree, or), vec![&WhereKind::Eq, &WhereKind::And]);
        let and = tree.child(or, 1).unwrap();
        assert_eq!(kinds(&tree, and), vec![&WhereKind::Lt, &WhereKind::Not]);
        assert_eq!(names, vec!["a", "b", "c"]);
    }

    #[test]
    fn test_parentheses() {
        let (tree, _) = parse("WHERE (a = 1 OR b = 2) AND c <> 'x'");
        let and = condition(&tree);
        assert_eq!(and.kind, WhereKind::And);
        assert_eq!(kinds(&tree, and), vec![&WhereKind::Or, &WhereKind::Neq]);
    }

    #[test]
    fn test_column_keys_are_offsets() {
        let (tree, _) = parse("WHERE d.cmis:name LIKE 'a%'");
        let like = condition(&tree);
        assert_eq!(like.kind, WhereKind::Like);
        let column = tree.child(like, 0).unwrap();
        assert_eq!(column.kind, WhereKind::Column);
        assert_eq!(column.key, 6);
        assert_eq!(tree.child(like, 1).unwrap().kind, WhereKind::Literal(Literal::String("a%".into())));
    }

    #[test]
    fn test_membership_forms() {
        let (tree, _) = parse("WHERE x NOT IN ('a', 'b') AND ANY tags IN ('t') AND 'v' = ANY tags AND ANY tags NOT IN (1)");
        let and = condition(&tree);
        let mut found = vec![];
        let mut stack = vec![and];
        while let Some(node) = stack.pop() {
            if node.kind == WhereKind::And {
                stack.extend(tree.children(node));
            } else {
                found.push(node.kind.clone());
            }
        }
        found.sort_by_key(|k| k.to_string());
        assert_eq!(found, vec![WhereKind::EqAny, WhereKind::InAny, WhereKind::NotIn, WhereKind::NotInAny]);
    }

    #[test]
    fn test_in_list_literals() {
        let (tree, _) = parse("WHERE n IN (1, 2.5, TRUE)");
        let node = condition(&tree);
        assert_eq!(node.kind, WhereKind::In);
        let list = tree.child(node, 1).unwrap();
        assert_eq!(list.kind, WhereKind::List);
        assert_eq!(list.children.len(), 3);
    }

    #[test]
    fn test_text_functions() {
        let (tree, names) = parse("WHERE CONTAINS('foo') AND IN_FOLDER(d, 'f1') OR IN_TREE('root')");
        let or = condition(&tree);
        let and = tree.child(or, 0).unwrap();
        let contains = tree.child(and, 0).unwrap();
        assert_eq!(contains.kind, WhereKind::Contains);
        assert_eq!(kinds(&tree, contains), vec![&WhereKind::Literal(Literal::String("foo".into()))]);
        let in_folder = tree.child(and, 1).unwrap();
        assert_eq!(kinds(&tree, in_folder)[0], &WhereKind::Qualifier("d".into()));
        assert_eq!(tree.child(or, 1).unwrap().kind, WhereKind::InTree);
        assert!(names.is_empty());
    }

    #[test]
    fn test_score_operand() {
        let (tree, names) = parse("WHERE SCORE() > 0.5");
        let gt = condition(&tree);
        assert_eq!(tree.child(gt, 0).unwrap().kind, WhereKind::Score);
        assert_eq!(names, vec!["SCORE"]);
    }

    #[test]
    fn test_stops_at_order_by() {
        let catalog = catalog();
        let mut query = QueryObject::new(&catalog);
        let mut parser = QueryParser::new("WHERE a IS NOT NULL ORDER BY a");
        WhereParser::parse(&mut parser, &mut query).unwrap();
        assert_eq!(parser.phase, Phase::OrderBy);
        assert_eq!(condition(query.where_tree().unwrap()).kind, WhereKind::IsNotNull);
    }

    #[test]
    fn test_invalid_conditions() {
        for text in ["WHERE a", "WHERE (a = 1", "WHERE a = 1)", "WHERE a = ANY b", "WHERE ANY a = 1", "WHERE a IN 1"] {
            let catalog = catalog();
            let mut query = QueryObject::new(&catalog);
            let mut parser = QueryParser::new(text);
            assert!(matches!(WhereParser::parse(&mut parser, &mut query), Err(QueryError::Parse(_))), "{text}");
        }
    }
}
