use crate::parser::{ParseError, QueryParser};

/// Collects identifiers: type and property query names, aliases and
/// qualifiers. `:` is allowed since CMIS names are namespaced.
pub struct TextCollector;

impl TextCollector {
    pub fn is_identifier_start(ch: char) -> bool {
        ch.is_alphabetic() || ch == '_' || ch == ':'
    }

    pub fn is_identifier_part(ch: char) -> bool {
        ch.is_alphanumeric() || ch == '_' || ch == ':'
    }

    pub fn collect(parser: &mut QueryParser) -> Result<String, ParseError> {
        let pivot = parser.position;
        if !Self::is_identifier_start(parser.current()) {
            return Err(ParseError::new("Invalid identifier", pivot, parser));
        }
        while !parser.eof() && Self::is_identifier_part(parser.current()) {
            parser.next();
        }
        Ok(parser.text_from_pivot(pivot))
    }
}
