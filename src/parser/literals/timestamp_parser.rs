use chrono::{DateTime, NaiveDateTime, Utc};

use crate::parser::{literals::{Literal, StringParser}, ParseError, QueryParser};

/// `TIMESTAMP 'YYYY-MM-DDThh:mm:ss.sss[Z|+hh:mm]'`
pub struct TimestampParser;

impl TimestampParser {
    pub fn is_timestamp(parser: &QueryParser) -> bool {
        parser.comparers.timestamp.compare(parser)
    }

    pub fn parse(parser: &mut QueryParser) -> Result<Literal, ParseError> {
        let pivot = parser.position;
        if !parser.consume(|c| &c.timestamp) {
            return Err(ParseError::new("Invalid timestamp", pivot, parser));
        }
        parser.next_non_whitespace();

        let text = match StringParser::parse(parser)? {
            Literal::String(text) => text,
            _ => return Err(ParseError::new("Invalid timestamp", pivot, parser)),
        };

        Self::parse_datetime(&text)
            .map(Literal::DateTime)
            .ok_or_else(|| ParseError::new("Invalid timestamp", pivot, parser))
    }

    pub fn parse_datetime(text: &str) -> Option<DateTime<Utc>> {
        if let Ok(value) = DateTime::parse_from_rfc3339(text) {
            return Some(value.with_timezone(&Utc));
        }
        NaiveDateTime::parse_from_str(text, "%Y-%m-%dT%H:%M:%S%.f")
            .ok()
            .map(|value| value.and_utc())
    }
}

#[cfg(test)]
pub mod tests {
    use chrono::{TimeZone, Utc};

    use crate::parser::{literals::{Literal, TimestampParser}, QueryParser};

    #[test]
    pub fn test_timestamp_with_offset() {
        let mut parser = QueryParser::new("TIMESTAMP '2024-03-01T10:00:00.000+01:00'");

        match TimestampParser::parse(&mut parser) {
            Ok(Literal::DateTime(value)) => {
                assert_eq!(value, Utc.with_ymd_and_hms(2024, 3, 1, 9, 0, 0).unwrap())
            },
            _ => panic!(),
        }
        assert!(parser.eof());
    }

    #[test]
    pub fn test_timestamp_without_zone_is_utc() {
        let mut parser = QueryParser::new("timestamp '2024-03-01T10:00:00'");

        match TimestampParser::parse(&mut parser) {
            Ok(Literal::DateTime(value)) => {
                assert_eq!(value, Utc.with_ymd_and_hms(2024, 3, 1, 10, 0, 0).unwrap())
            },
            _ => panic!(),
        }
    }

    #[test]
    pub fn test_timestamp_wrong() {
        let mut parser = QueryParser::new("TIMESTAMP 'yesterday'");
        assert!(TimestampParser::parse(&mut parser).is_err());
    }
}
