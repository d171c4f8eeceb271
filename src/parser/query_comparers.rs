use crate::parser::{QueryParser, WordComparer};

/// CMISQL keywords and operators.
#[derive(Debug)]
pub struct QueryComparers {
    pub select: WordComparer,
    pub alias: WordComparer,
    pub from: WordComparer,
    pub join: WordComparer,
    pub inner_join: WordComparer,
    pub left_join: WordComparer,
    pub left_outer_join: WordComparer,
    pub on: WordComparer,
    pub r#where: WordComparer,
    pub asc: WordComparer,
    pub desc: WordComparer,
    pub order_by: WordComparer,
    pub and: WordComparer,
    pub or: WordComparer,
    pub not: WordComparer,
    pub equal: WordComparer,
    pub not_equal_b: WordComparer, // basic
    pub not_equal_c: WordComparer, // c
    pub greater_than: WordComparer,
    pub greater_than_or_equal: WordComparer,
    pub less_than: WordComparer,
    pub less_than_or_equal: WordComparer,
    pub like: WordComparer,
    pub not_like: WordComparer,
    pub is_null: WordComparer,
    pub is_not_null: WordComparer,
    pub r#in: WordComparer,
    pub not_in: WordComparer,
    pub any: WordComparer,
    pub contains: WordComparer,
    pub in_folder: WordComparer,
    pub in_tree: WordComparer,
    pub score: WordComparer,
    pub timestamp: WordComparer,
    pub b_true: WordComparer,
    pub b_false: WordComparer,
}

impl Default for QueryComparers {
    fn default() -> Self {
        Self::new()
    }
}

impl QueryComparers {
    pub fn new() -> Self {
        Self {
            select: WordComparer::new("SELECT").with_whitespace_postfix(),
            alias: WordComparer::new("AS").with_whitespace_postfix(),
            from: WordComparer::new("FROM").with_whitespace_postfix().with_eof(),
            join: WordComparer::new("JOIN").with_whitespace_postfix().with_eof(),
            inner_join: WordComparer::new("INNER JOIN").with_whitespace_postfix().with_eof(),
            left_join: WordComparer::new("LEFT JOIN").with_whitespace_postfix().with_eof(),
            left_outer_join: WordComparer::new("LEFT OUTER JOIN").with_whitespace_postfix().with_eof(),
            on: WordComparer::new("ON").with_whitespace_postfix().with_eof(),
            r#where: WordComparer::new("WHERE").with_whitespace_postfix().with_eof(),
            asc: WordComparer::new("ASC").with_whitespace_postfix().with_eof().with_optional_postfix(','),
            desc: WordComparer::new("DESC").with_whitespace_postfix().with_eof().with_optional_postfix(','),
            order_by: WordComparer::new("ORDER BY").with_whitespace_postfix().with_eof(),
            and: WordComparer::new("AND").with_whitespace_postfix().with_optional_postfix('('),
            or: WordComparer::new("OR").with_whitespace_postfix().with_optional_postfix('('),
            not: WordComparer::new("NOT").with_whitespace_postfix().with_optional_postfix('('),
            equal: WordComparer::new("="),
            not_equal_b: WordComparer::new("<>"),
            not_equal_c: WordComparer::new("!="),
            greater_than: WordComparer::new(">"),
            greater_than_or_equal: WordComparer::new(">="),
            less_than: WordComparer::new("<"),
            less_than_or_equal: WordComparer::new("<="),
            like: WordComparer::new("LIKE").with_whitespace_postfix(),
            not_like: WordComparer::new("NOT LIKE").with_whitespace_postfix(),
            is_null: WordComparer::new("IS NULL").with_whitespace_postfix().with_eof().with_optional_postfix(')'),
            is_not_null: WordComparer::new("IS NOT NULL").with_whitespace_postfix().with_eof().with_optional_postfix(')'),
            r#in: WordComparer::new("IN").with_delimiter('(').with_whitespace_postfix(),
            not_in: WordComparer::new("NOT IN").with_delimiter('(').with_whitespace_postfix(),
            any: WordComparer::new("ANY").with_whitespace_postfix(),
            contains: WordComparer::new("CONTAINS").with_delimiter('(').with_whitespace_postfix(),
            in_folder: WordComparer::new("IN_FOLDER").with_delimiter('(').with_whitespace_postfix(),
            in_tree: WordComparer::new("IN_TREE").with_delimiter('(').with_whitespace_postfix(),
            score: WordComparer::new("SCORE").with_delimiter('('),
            timestamp: WordComparer::new("TIMESTAMP").with_whitespace_postfix(),
            b_true: WordComparer::new("TRUE").with_any_delimiter_postfix().with_eof(),
            b_false: WordComparer::new("FALSE").with_any_delimiter_postfix().with_eof(),
        }
    }

    pub fn is_join(&self, parser: &QueryParser) -> bool {
        self.join.compare(parser) || self.inner_join.compare(parser) ||
            self.left_join.compare(parser) || self.left_outer_join.compare(parser)
    }

    /// Keywords that may follow a bare identifier and must not be taken
    /// as an alias.
    pub fn is_reserved(&self, parser: &QueryParser) -> bool {
        self.from.compare(parser) || self.r#where.compare(parser) || self.order_by.compare(parser) ||
            self.on.compare(parser) || self.is_join(parser) || self.asc.compare(parser) || self.desc.compare(parser)
    }
}
