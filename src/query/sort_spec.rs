use crate::query::NodeKey;

/// One ORDER BY key. The selector is looked up through the column
/// reference table so alias substitution applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortSpec {
    pub key: NodeKey,
    pub ascending: bool,
}

impl SortSpec {
    pub fn new(key: NodeKey, ascending: bool) -> Self {
        Self { key, ascending }
    }
}
