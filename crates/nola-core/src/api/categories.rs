use serde::de::IgnoredAny;

use crate::models::{Category, Pager};

use super::client::PageQuery;
use super::{ApiClient, ApiError};

impl ApiClient {
    pub async fn add_category(&self, category: &Category) -> Result<(), ApiError> {
        self.post::<IgnoredAny, _>("/admin/category", category).await?;
        Ok(())
    }

    pub async fn delete_categories(&self, ids: &[i64]) -> Result<(), ApiError> {
        self.delete::<IgnoredAny, _>("/admin/category", ids).await?;
        Ok(())
    }

    pub async fn delete_categories_by_slugs(&self, slugs: &[String]) -> Result<(), ApiError> {
        self.delete::<IgnoredAny, _>("/admin/category/slug", slugs).await?;
        Ok(())
    }

    pub async fn update_category(&self, category: &Category) -> Result<(), ApiError> {
        self.put::<IgnoredAny, _>("/admin/category", category).await?;
        Ok(())
    }

    pub async fn category(&self, category_id: i64) -> Result<Category, ApiError> {
        self.get(&format!("/admin/category/{}", category_id)).await
    }

    pub async fn categories(&self, page: u32, size: u32) -> Result<Pager<Category>, ApiError> {
        self.get_query("/admin/category", &PageQuery { page, size }).await
    }
}
