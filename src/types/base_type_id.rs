use std::fmt;

use serde::{Deserialize, Serialize};

/// The six CMIS base object types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BaseTypeId {
    #[serde(rename = "cmis:document")]
    Document,
    #[serde(rename = "cmis:folder")]
    Folder,
    #[serde(rename = "cmis:relationship")]
    Relationship,
    #[serde(rename = "cmis:policy")]
    Policy,
    #[serde(rename = "cmis:item")]
    Item,
    #[serde(rename = "cmis:secondary")]
    Secondary,
}

impl BaseTypeId {
    pub const ALL: [BaseTypeId; 6] = [
        BaseTypeId::Document,
        BaseTypeId::Folder,
        BaseTypeId::Relationship,
        BaseTypeId::Policy,
        BaseTypeId::Item,
        BaseTypeId::Secondary,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            BaseTypeId::Document => "cmis:document",
            BaseTypeId::Folder => "cmis:folder",
            BaseTypeId::Relationship => "cmis:relationship",
            BaseTypeId::Policy => "cmis:policy",
            BaseTypeId::Item => "cmis:item",
            BaseTypeId::Secondary => "cmis:secondary",
        }
    }
}

impl fmt::Display for BaseTypeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for BaseTypeId {
    type Error = String;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        BaseTypeId::ALL
            .iter()
            .copied()
            .find(|base| base.as_str() == value)
            .ok_or_else(|| format!("Invalid base type id: '{}'", value))
    }
}
