use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Link {
    pub link_id: i64,
    pub display_name: String,
    pub url: String,
    #[serde(default)]
    pub logo: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub priority: i32,
    #[serde(default)]
    pub remark: Option<String>,
    pub create_time: i64,
    #[serde(default)]
    pub last_modify_time: Option<i64>,
}

/// Body for adding (no id) or updating (with id) a link.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct LinkRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub link_id: Option<i64>,
    pub display_name: String,
    pub url: String,
    pub logo: Option<String>,
    pub description: Option<String>,
    pub priority: Option<i32>,
    pub remark: Option<String>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LinkSort {
    #[default]
    PriorityDesc,
    PriorityAsc,
    CreateTimeDesc,
    CreateTimeAsc,
    ModifyTimeDesc,
    ModifyTimeAsc,
}
