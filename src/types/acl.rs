use serde::{Deserialize, Serialize};

/// Principal placeholder replaced by the calling user.
pub const CMIS_USER: &str = "cmis:user";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Ace {
    pub principal_id: Option<String>,
    pub permissions: Vec<String>,
    pub direct: bool,
}

impl Ace {
    pub fn new(principal_id: &str, permissions: &[&str]) -> Self {
        Self {
            principal_id: Some(principal_id.to_string()),
            permissions: permissions.iter().map(|p| p.to_string()).collect(),
            direct: true,
        }
    }

    pub fn is_user_macro(&self) -> bool {
        self.principal_id.as_deref() == Some(CMIS_USER)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Acl {
    pub aces: Vec<Ace>,
}

impl Acl {
    pub fn new(aces: Vec<Ace>) -> Self {
        Self { aces }
    }
}
