use std::fmt::Display;

/// Failure while validating or registering a type definition.
#[derive(Debug, Clone, PartialEq)]
pub enum TypeError {
    /// The definition itself is malformed or references something missing.
    InvalidArgument(String),
    /// The definition clashes with the current state of the catalog.
    Constraint(String),
}

impl TypeError {
    pub fn invalid(message: impl Into<String>) -> Self {
        TypeError::InvalidArgument(message.into())
    }

    pub fn constraint(message: impl Into<String>) -> Self {
        TypeError::Constraint(message.into())
    }

    pub fn err<T>(self) -> Result<T, TypeError> {
        Err(self)
    }
}

impl Display for TypeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TypeError::InvalidArgument(message) => write!(f, "InvalidArgument: {}", message),
            TypeError::Constraint(message) => write!(f, "Constraint: {}", message),
        }
    }
}

impl std::error::Error for TypeError {}
