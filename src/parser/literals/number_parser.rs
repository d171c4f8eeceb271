use ordered_float::NotNan;

use crate::parser::{literals::Literal, ParseError, QueryParser, WordComparer};

pub struct NumberParser;

impl NumberParser {
    pub fn is_number(parser: &QueryParser) -> bool {
        let current = parser.current();
        current.is_ascii_digit() ||
            ((current == '+' || current == '-' || current == '.') && parser.peek(1).is_ascii_digit())
    }

    pub fn parse(parser: &mut QueryParser) -> Result<Literal, ParseError> {
        let pivot = parser.position;
        let mut is_float = false;

        if !NumberParser::is_number(parser) {
            return Err(ParseError::new("Invalid number value", pivot, parser));
        }

        if parser.current() == '+' || parser.current() == '-' {
            parser.next();
        }

        while !parser.eof() {
            let current = parser.current();
            if current == '.' || current == 'e' || current == 'E' {
                is_float = true;
                if (current == 'e' || current == 'E') && (parser.peek(1) == '+' || parser.peek(1) == '-') {
                    parser.next();
                }
            } else if !current.is_ascii_digit() {
                break;
            }
            parser.next();
        }

        if !parser.eof() && !WordComparer::is_any_delimiter(parser.current()) {
            return Err(ParseError::new("Invalid number value", pivot, parser));
        }

        let number = parser.text_from_pivot(pivot);
        let number = match is_float {
            true => {
                let value = number.parse::<f64>().map_err(|_| ParseError::new("Invalid number", pivot, parser))?;
                Literal::Float(NotNan::new(value).map_err(|_| ParseError::new("Invalid number", pivot, parser))?)
            },
            false => Literal::Int(number.parse::<i64>().map_err(|_| ParseError::new("Invalid number", pivot, parser))?),
        };

        Ok(number)
    }
}

#[cfg(test)]
pub mod tests {
    use crate::parser::{literals::{Literal, NumberParser}, QueryParser};

    #[test]
    pub fn test_number_parser_int() {
        let mut parser = QueryParser::new("32");

        match NumberParser::parse(&mut parser) {
            Ok(Literal::Int(value)) => assert_eq!(value, 32),
            _ => panic!(),
        }
    }

    #[test]
    pub fn test_number_parser_signed() {
        let mut parser = QueryParser::new("-32,");
        match NumberParser::parse(&mut parser) {
            Ok(Literal::Int(value)) => assert_eq!(value, -32),
            _ => panic!(),
        }
        assert_eq!(parser.current(), ',');

        let mut parser = QueryParser::new("+7)");
        match NumberParser::parse(&mut parser) {
            Ok(Literal::Int(value)) => assert_eq!(value, 7),
            _ => panic!(),
        }
    }

    #[test]
    pub fn test_number_parser_decimal() {
        let mut parser = QueryParser::new("12.5 ");

        match NumberParser::parse(&mut parser) {
            Ok(Literal::Float(value)) => assert_eq!(value.into_inner(), 12.5),
            _ => panic!(),
        }
    }

    #[test]
    pub fn test_number_parser_exponent() {
        let mut parser = QueryParser::new("1.5E-2");

        match NumberParser::parse(&mut parser) {
            Ok(Literal::Float(value)) => assert_eq!(value.into_inner(), 0.015),
            _ => panic!(),
        }
    }

    #[test]
    pub fn test_number_parser_wrong() {
        let mut parser = QueryParser::new("12a");

        match NumberParser::parse(&mut parser) {
            Ok(_) => panic!(),
            Err(err) => {
                assert_eq!(err.start, 0);
                assert_eq!(err.end, 2);
            },
        }
    }

    #[test]
    pub fn test_sign_alone_is_not_a_number() {
        let parser = QueryParser::new("- 1");
        assert!(!NumberParser::is_number(&parser));
    }
}
