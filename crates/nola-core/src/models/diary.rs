use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Diary {
    pub diary_id: i64,
    pub content: String,
    #[serde(default)]
    pub html: String,
    pub create_time: i64,
    #[serde(default)]
    pub last_modify_time: Option<i64>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DiarySort {
    #[default]
    CreateTimeDesc,
    CreateTimeAsc,
    ModifyTimeDesc,
    ModifyTimeAsc,
}
