use std::fmt::Display;

use uuid::Uuid;

use crate::types::IdType;

#[derive(Debug, Clone, PartialEq)]
pub enum IdValue {
    Uuid(String),
    Int(u64),
}

impl Display for IdValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            IdValue::Uuid(uuid) => f.write_str(uuid),
            IdValue::Int(id) => write!(f, "{id}"),
        }
    }
}

/// Hands out ids for definitions created without one.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct IdManager {
    pub id_type: IdType,
    pub prefix: String,
    pub current: Option<IdValue>,
}

impl IdManager {
    pub fn new(id_type: IdType, prefix: &str) -> Self {
        Self {
            id_type,
            prefix: prefix.to_string(),
            current: None,
        }
    }

    /// Next id rendered as a definition id, `None` when generation is disabled.
    pub fn next_id(&mut self) -> Option<String> {
        let value = self.next()?;
        Some(match value {
            IdValue::Int(n) => format!("{}{}", self.prefix, n),
            IdValue::Uuid(uuid) => uuid,
        })
    }
}

impl Iterator for IdManager {
    type Item = IdValue;
    fn next(&mut self) -> Option<Self::Item> {
        let item = match &self.current {
            Some(IdValue::Int(id)) => match *id {
                u64::MAX => IdValue::Int(0),
                _ => IdValue::Int(id + 1)
            },
            Some(IdValue::Uuid(_)) => IdValue::Uuid(Uuid::new_v4().to_string()),
            None => match self.id_type {
                IdType::Int => IdValue::Int(1),
                IdType::Uuid => IdValue::Uuid(Uuid::new_v4().to_string()),
                IdType::None => return None,
            }
        };

        self.current = Some(item.clone());
        Some(item)
    }
}
