use crate::parser::{QueryComparers, WordComparer};

#[derive(Debug, Default, Clone, Copy, PartialEq, PartialOrd)]
pub enum Phase {
    #[default]
    Select = 0,
    From = 1,
    Joins = 2,
    Where = 3,
    OrderBy = 4,
    EOF = 5,
}

/// Character cursor over a CMISQL statement.
///
/// Positions are char offsets into the statement; they double as the
/// node keys that link parsed column references to their selectors.
#[derive(Debug, Default)]
pub struct QueryParser {
    pub position: usize,
    pub length: usize,
    pub text_v: Vec<char>,
    pub phase: Phase,
    pub text: String,

    pub comparers: QueryComparers,
}

impl QueryParser {
    pub fn new(query: &str) -> Self {
        let text_v: Vec<char> = query.chars().collect();
        Self {
            position: 0,
            length: text_v.len(),
            text_v,
            text: query.to_string(),
            comparers: QueryComparers::new(),
            ..Default::default()
        }
    }

    pub fn eof(&self) -> bool {
        self.position >= self.length
    }

    pub fn current(&self) -> char {
        self.peek(0)
    }

    pub fn peek(&self, ahead: usize) -> char {
        self.text_v.get(self.position + ahead).copied().unwrap_or('\0')
    }

    pub fn next(&mut self) {
        if self.position < self.length {
            self.position += 1;
        }
    }

    pub fn next_non_whitespace(&mut self) {
        while self.current().is_whitespace() {
            self.next();
        }
    }

    pub fn jump(&mut self, ahead: usize) {
        self.position = (self.position + ahead).min(self.length);
    }

    pub fn text_from_range(&self, start: usize, end: usize) -> String {
        let end = end.min(self.length);
        let start = start.min(end);
        self.text_v[start..end].iter().collect()
    }

    pub fn text_from_pivot(&self, pivot: usize) -> String {
        self.text_from_range(pivot, self.position)
    }

    /// Step over the keyword picked from the comparers if it is at the
    /// cursor.
    pub fn consume(&mut self, pick: impl Fn(&QueryComparers) -> &WordComparer) -> bool {
        match pick(&self.comparers).matched_length(self) {
            Some(length) => {
                self.jump(length);
                true
            }
            None => false,
        }
    }

    /// Step over whichever join keyword is at the cursor.
    pub fn consume_join(&mut self) -> bool {
        self.consume(|c| &c.left_outer_join) || self.consume(|c| &c.left_join) ||
            self.consume(|c| &c.inner_join) || self.consume(|c| &c.join)
    }

    /// Skip whitespace and move to the next clause if its keyword is at
    /// the cursor. Returns `true` when a clause boundary (or the end of the
    /// statement) was found.
    pub fn check_next_phase(&mut self) -> bool {
        self.next_non_whitespace();

        if self.eof() {
            self.phase = Phase::EOF;
            return true;
        }

        if self.phase < Phase::OrderBy && self.comparers.order_by.compare(self) {
            self.phase = Phase::OrderBy;
            return true;
        }

        if self.phase < Phase::Where && self.comparers.r#where.compare(self) {
            self.phase = Phase::Where;
            return true;
        }

        if self.phase >= Phase::From && self.phase <= Phase::Joins && self.comparers.is_join(self) {
            self.phase = Phase::Joins;
            return true;
        }

        if self.phase < Phase::From && self.comparers.from.compare(self) {
            self.phase = Phase::From;
            return true;
        }

        false
    }
}
