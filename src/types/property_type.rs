use serde::{Deserialize, Serialize};

/// Data type of a property.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PropertyType {
    Boolean,
    Id,
    Integer,
    #[serde(rename = "datetime")]
    DateTime,
    Decimal,
    Html,
    String,
    Uri,
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Cardinality {
    #[default]
    Single,
    Multi,
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Updatability {
    #[serde(rename = "readonly")]
    ReadOnly,
    #[default]
    #[serde(rename = "readwrite")]
    ReadWrite,
    #[serde(rename = "whencheckedout")]
    WhenCheckedOut,
    #[serde(rename = "oncreate")]
    OnCreate,
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentStreamAllowed {
    #[serde(rename = "notallowed")]
    NotAllowed,
    #[default]
    Allowed,
    Required,
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DateTimeResolution {
    Year,
    Date,
    #[default]
    Time,
}
