use crate::types::IdType;

/// Catalog configuration.
///
/// - `id_type` controls how ids are generated for definitions that arrive
///   without one.
/// - `id_prefix` is prepended to generated integer ids.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Strategy for generated ids
    pub id_type: IdType,
    /// Prefix for `IdType::Int` ids
    pub id_prefix: String,
}

impl Default for Config {
    fn default() -> Self {
        Self { id_type: Default::default(), id_prefix: "id".to_string() }
    }
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from(id_type: IdType, id_prefix: &str) -> Self {
        Self {
            id_type,
            id_prefix: id_prefix.to_string(),
        }
    }

    pub fn uuid() -> Self {
        Self::from(IdType::Uuid, "")
    }

    /// Sequential ids such as `t1`, `t2` for `Config::int("t")`.
    pub fn int(id_prefix: &str) -> Self {
        Self::from(IdType::Int, id_prefix)
    }

    /// No id generation: every definition must carry its own id.
    pub fn none() -> Self {
        Self::from(IdType::None, "")
    }
}
