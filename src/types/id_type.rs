use serde::{Deserialize, Serialize};

/// Strategy used when a type or property definition arrives without an id.
///
/// - `Uuid`: generate a UUID v4 string.
/// - `Int`: generate `<prefix><n>` with an increasing counter.
/// - `None`: no generation; a missing id is rejected.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub enum IdType {
    /// Use UUID string values as ids (default).
    #[default]
    Uuid,
    /// Use prefixed sequential integers as ids.
    Int,
    /// Ids must be supplied by the caller.
    None,
}
