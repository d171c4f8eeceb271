use crate::parser::{literals::Literal, ParseError, QueryParser, WordComparer};

/// Single-quoted CMISQL string. `''` and `\'` both yield a quote, `\\`
/// yields a backslash.
pub struct StringParser;

impl StringParser {
    pub fn is_string_delimiter(parser: &QueryParser) -> bool {
        parser.current() == '\''
    }

    pub fn parse(parser: &mut QueryParser) -> Result<Literal, ParseError> {
        let pivot = parser.position;

        if !StringParser::is_string_delimiter(parser) {
            return Err(ParseError::new("Invalid string value", pivot, parser));
        }
        parser.next();

        let mut text = String::new();
        loop {
            if parser.eof() || WordComparer::is_current_break_line(parser) {
                return Err(ParseError::new("Invalid string", pivot, parser));
            }

            let current = parser.current();
            if current == '\\' && (parser.peek(1) == '\'' || parser.peek(1) == '\\') {
                text.push(parser.peek(1));
                parser.jump(2);
                continue;
            }
            if current == '\'' {
                if parser.peek(1) == '\'' {
                    text.push('\'');
                    parser.jump(2);
                    continue;
                }
                parser.next();
                break;
            }

            text.push(current);
            parser.next();
        }

        Ok(Literal::String(text))
    }
}

#[cfg(test)]
pub mod tests {
    use crate::parser::{literals::{Literal, StringParser}, QueryParser};

    #[test]
    pub fn test_string_parser() {
        let mut parser = QueryParser::new("'identifier' ");

        match StringParser::parse(&mut parser) {
            Ok(Literal::String(result)) => assert_eq!(result, "identifier"),
            _ => panic!(),
        }
        assert_eq!(parser.current(), ' ');
    }

    #[test]
    pub fn test_string_parser_escaped_quotes() {
        let mut parser = QueryParser::new(r"'it''s \'quoted\' \\ '");

        match StringParser::parse(&mut parser) {
            Ok(Literal::String(result)) => assert_eq!(result, r"it's 'quoted' \ "),
            _ => panic!(),
        }
        assert!(parser.eof());
    }

    #[test]
    pub fn test_string_parser_break_line() {
        let mut parser = QueryParser::new("'lets\r\nbreak line'");

        match StringParser::parse(&mut parser) {
            Ok(_) => panic!(),
            Err(err) => {
                assert_eq!(err.start, 0);
                assert_eq!(err.end, 5);
            },
        }
    }

    #[test]
    pub fn test_string_parser_unterminated() {
        let mut parser = QueryParser::new("'open");
        assert!(StringParser::parse(&mut parser).is_err());
    }
}
