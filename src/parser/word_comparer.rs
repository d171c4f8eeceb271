use crate::parser::QueryParser;

/// Case-insensitive keyword matcher anchored at the parser position.
///
/// Multi-word keywords such as `ORDER BY` accept any run of whitespace
/// between their words. The postfix rules decide what may follow the
/// keyword for it to count as a match, so `IN` does not fire on
/// `IN_FOLDER` and `AS` does not fire on `ASC`.
#[derive(Debug, Default)]
pub struct WordComparer {
    pub words: Vec<Vec<char>>,
    whitespace_postfix: bool,
    any_delimiter_postfix: bool,
    eof: bool,
    delimiter: Option<char>,
    optional_postfix: Vec<char>,
}

impl WordComparer {
    pub fn new(keyword: &str) -> Self {
        let words = keyword.split_whitespace()
            .map(|word| word.to_uppercase().chars().collect())
            .collect();
        Self {
            words,
            whitespace_postfix: false,
            any_delimiter_postfix: false,
            eof: false,
            delimiter: None,
            optional_postfix: vec![],
        }
    }

    pub fn is_block_delimiter(ch: char) -> bool {
        ch.is_whitespace()
    }

    pub fn is_any_delimiter(ch: char) -> bool {
        ch == ',' || ch == '(' || ch == ')' || ch == '.' || ch == '=' || ch == '<' || ch == '>' || ch == '!' ||
            Self::is_block_delimiter(ch)
    }

    pub fn is_current_break_line(parser: &QueryParser) -> bool {
        parser.current() == '\r' || parser.current() == '\n'
    }

    pub fn compare(&self, parser: &QueryParser) -> bool {
        self.matched_length(parser).is_some()
    }

    /// Number of chars the keyword spans at the cursor, `None` when it
    /// does not match.
    pub fn matched_length(&self, parser: &QueryParser) -> Option<usize> {
        let mut end = parser.position;
        for (index, word) in self.words.iter().enumerate() {
            if index > 0 {
                let gap = end;
                while end < parser.length && Self::is_block_delimiter(parser.text_v[end]) {
                    end += 1;
                }
                if end == gap {
                    return None;
                }
            }
            for ch in word {
                if end >= parser.length || *ch != parser.text_v[end].to_ascii_uppercase() {
                    return None;
                }
                end += 1;
            }
        }
        let length = end - parser.position;

        if end >= parser.length {
            return self.eof.then_some(length);
        }

        if self.delimiter.is_none() && !self.any_delimiter_postfix && !self.whitespace_postfix &&
            self.optional_postfix.is_empty() {
            return Some(length);
        }

        let next = parser.text_v[end];
        let accepted = self.delimiter == Some(next) ||
            (self.any_delimiter_postfix && Self::is_any_delimiter(next)) ||
            (self.whitespace_postfix && Self::is_block_delimiter(next)) ||
            self.optional_postfix.contains(&next);
        accepted.then_some(length)
    }

    pub fn with_eof(mut self) -> Self { self.eof = true; self }
    pub fn with_whitespace_postfix(mut self) -> Self { self.whitespace_postfix = true; self }
    pub fn with_any_delimiter_postfix(mut self) -> Self { self.any_delimiter_postfix = true; self }
    pub fn with_delimiter(mut self, delimiter: char) -> Self { self.delimiter = Some(delimiter); self }
    pub fn with_optional_postfix(mut self, value: char) -> Self { self.optional_postfix.push(value); self }
}
