use serde::de::IgnoredAny;

use crate::models::{Pager, Tag};

use super::client::PageQuery;
use super::{ApiClient, ApiError};

impl ApiClient {
    pub async fn add_tag(&self, tag: &Tag) -> Result<(), ApiError> {
        self.post::<IgnoredAny, _>("/admin/tag", tag).await?;
        Ok(())
    }

    pub async fn delete_tags(&self, ids: &[i64]) -> Result<(), ApiError> {
        self.delete::<IgnoredAny, _>("/admin/tag", ids).await?;
        Ok(())
    }

    pub async fn delete_tags_by_slugs(&self, slugs: &[String]) -> Result<(), ApiError> {
        self.delete::<IgnoredAny, _>("/admin/tag/slug", slugs).await?;
        Ok(())
    }

    pub async fn update_tag(&self, tag: &Tag) -> Result<(), ApiError> {
        self.put::<IgnoredAny, _>("/admin/tag", tag).await?;
        Ok(())
    }

    pub async fn tags(&self, page: u32, size: u32) -> Result<Pager<Tag>, ApiError> {
        self.get_query("/admin/tag", &PageQuery { page, size }).await
    }
}
