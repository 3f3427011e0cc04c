use serde::{Deserialize, Serialize};

/// Public blog information. A blog without a title has not been initialised.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct BlogInfo {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub subtitle: Option<String>,
    #[serde(default)]
    pub blogger: Option<String>,
    #[serde(default)]
    pub create_date: Option<i64>,
}

impl BlogInfo {
    pub fn is_initialized(&self) -> bool {
        self.title.as_deref().is_some_and(|t| !t.is_empty())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BlogAdminRequest {
    pub username: String,
    pub display_name: String,
    pub email: String,
    pub password: String,
}

/// ICP filing numbers shown in the site footer.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct Icp {
    pub icp: Option<String>,
    pub public: Option<String>,
}
