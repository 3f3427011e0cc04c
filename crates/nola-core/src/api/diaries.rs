use serde::de::IgnoredAny;
use serde::Serialize;

use crate::models::{Diary, DiarySort, Pager};

use super::{ApiClient, ApiError};

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct DiaryBody<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    diary_id: Option<i64>,
    content: &'a str,
}

#[derive(Serialize)]
struct DiaryQuery {
    page: u32,
    size: u32,
    sort: DiarySort,
}

impl ApiClient {
    pub async fn add_diary(&self, content: &str) -> Result<(), ApiError> {
        let body = DiaryBody { diary_id: None, content };
        self.post::<IgnoredAny, _>("/admin/diary", &body).await?;
        Ok(())
    }

    pub async fn delete_diaries(&self, ids: &[i64]) -> Result<(), ApiError> {
        self.delete::<IgnoredAny, _>("/admin/diary", ids).await?;
        Ok(())
    }

    pub async fn update_diary(&self, diary_id: i64, content: &str) -> Result<(), ApiError> {
        let body = DiaryBody { diary_id: Some(diary_id), content };
        self.put::<IgnoredAny, _>("/admin/diary", &body).await?;
        Ok(())
    }

    pub async fn diaries(&self, page: u32, size: u32, sort: DiarySort) -> Result<Pager<Diary>, ApiError> {
        self.get_query("/admin/diary", &DiaryQuery { page, size, sort }).await
    }
}
