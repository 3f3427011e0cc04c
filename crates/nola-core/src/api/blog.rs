use serde::de::IgnoredAny;
use serde::Serialize;

use crate::models::{BlogAdminRequest, BlogInfo, Icp};

use super::{ApiClient, ApiError};

#[derive(Serialize)]
struct InitBlogRequest<'a> {
    title: &'a str,
    subtitle: &'a str,
}

impl ApiClient {
    pub async fn blog_info(&self) -> Result<BlogInfo, ApiError> {
        self.get("/api/config/blog").await
    }

    /// Set the title of a freshly installed blog.
    pub async fn init_blog(&self, title: &str, subtitle: &str) -> Result<(), ApiError> {
        self.post::<IgnoredAny, _>("/admin/config/blog", &InitBlogRequest { title, subtitle })
            .await?;
        Ok(())
    }

    pub async fn create_blog_admin(&self, admin: &BlogAdminRequest) -> Result<(), ApiError> {
        self.post::<IgnoredAny, _>("/admin/config/blog/admin", admin)
            .await?;
        Ok(())
    }

    pub async fn icp(&self) -> Result<Icp, ApiError> {
        self.get("/admin/config/icp").await
    }

    pub async fn update_icp(&self, icp: &Icp) -> Result<(), ApiError> {
        self.put::<IgnoredAny, _>("/admin/config/icp", icp).await?;
        Ok(())
    }
}
