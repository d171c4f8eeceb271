use once_cell::sync::Lazy;
use regex::Regex;

static ID_PATTERN: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[\w:.\-]+$").unwrap());
static ID_CHAR_PATTERN: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[\w:.\-]$").unwrap());
static QUERY_NAME_PATTERN: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[A-Za-z_:][\w:]*$").unwrap());
static LOCAL_NAME_PATTERN: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[^\p{Cc}]+$").unwrap());

/// Syntax rules for ids, query names and local names.
///
/// Query names are the strictest: they are written unquoted in CMISQL, so
/// they may not contain whitespace, quotes, commas, dots or parentheses and
/// may not start with a digit.
pub struct NameValidator;

impl NameValidator {
    pub const ERROR_ILLEGAL_ID: &'static str =
        "Id contains illegal characters, allowed are letters, digits and '_', ':', '.', '-'";
    pub const ERROR_ILLEGAL_NAME: &'static str =
        "Name contains illegal characters or is not a valid CMISQL identifier";

    pub fn is_valid_id(id: &str) -> bool {
        ID_PATTERN.is_match(id)
    }

    pub fn is_valid_query_name(query_name: &str) -> bool {
        QUERY_NAME_PATTERN.is_match(query_name)
    }

    pub fn is_valid_local_name(local_name: &str) -> bool {
        LOCAL_NAME_PATTERN.is_match(local_name)
    }

    /// Replace every character not allowed in an id by `_`.
    pub fn replace_invalid_characters(id: &str) -> String {
        let mut buffer = [0u8; 4];
        id.chars()
            .map(|ch| if ID_CHAR_PATTERN.is_match(ch.encode_utf8(&mut buffer)) { ch } else { '_' })
            .collect()
    }
}
