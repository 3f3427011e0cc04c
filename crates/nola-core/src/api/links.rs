use serde::de::IgnoredAny;
use serde::Serialize;

use crate::models::{Link, LinkRequest, LinkSort, Pager};

use super::{ApiClient, ApiError};

#[derive(Serialize)]
struct LinkQuery {
    page: u32,
    size: u32,
    sort: LinkSort,
}

impl ApiClient {
    pub async fn add_link(&self, link: &LinkRequest) -> Result<(), ApiError> {
        self.post::<IgnoredAny, _>("/admin/link", link).await?;
        Ok(())
    }

    pub async fn delete_links(&self, ids: &[i64]) -> Result<(), ApiError> {
        self.delete::<IgnoredAny, _>("/admin/link", ids).await?;
        Ok(())
    }

    pub async fn update_link(&self, link: &LinkRequest) -> Result<(), ApiError> {
        self.put::<IgnoredAny, _>("/admin/link", link).await?;
        Ok(())
    }

    pub async fn links(&self, page: u32, size: u32, sort: LinkSort) -> Result<Pager<Link>, ApiError> {
        self.get_query("/admin/link", &LinkQuery { page, size, sort }).await
    }
}
