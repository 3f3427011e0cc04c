use serde::de::IgnoredAny;
use serde::Serialize;

use crate::models::{
    DraftPublishRequest, Pager, Post, PostContent, PostRequest, PostSort, PostStatus,
    PostStatusRequest, PostVisible,
};

use super::{ApiClient, ApiError};

/// Filters for the post listing. Unset filters are left out of the query.
#[derive(Debug, Clone, Default, Serialize)]
pub struct PostQuery {
    pub page: u32,
    pub size: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<PostStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub visible: Option<PostVisible>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
    #[serde(rename = "tag", skip_serializing_if = "Option::is_none")]
    pub tag_id: Option<i64>,
    #[serde(rename = "category", skip_serializing_if = "Option::is_none")]
    pub category_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort: Option<PostSort>,
}

impl PostQuery {
    pub fn page(page: u32, size: u32) -> Self {
        Self {
            page,
            size,
            ..Self::default()
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ContentBody<'a> {
    post_id: i64,
    content: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct DraftBody<'a> {
    post_id: i64,
    content: &'a str,
    draft_name: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct DraftRenameBody<'a> {
    post_id: i64,
    old_name: &'a str,
    new_name: &'a str,
}

impl ApiClient {
    pub async fn add_post(&self, post: &PostRequest) -> Result<(), ApiError> {
        self.post::<IgnoredAny, _>("/admin/post", post).await?;
        Ok(())
    }

    /// Permanently delete posts. Only recycled posts can be deleted.
    pub async fn delete_posts(&self, ids: &[i64]) -> Result<(), ApiError> {
        self.delete::<IgnoredAny, _>("/admin/post", ids).await?;
        Ok(())
    }

    /// Move posts to the recycle bin.
    pub async fn recycle_posts(&self, ids: &[i64]) -> Result<(), ApiError> {
        self.put::<IgnoredAny, _>("/admin/post/recycle", ids).await?;
        Ok(())
    }

    pub async fn update_post(&self, post: &PostRequest) -> Result<(), ApiError> {
        self.put::<IgnoredAny, _>("/admin/post", post).await?;
        Ok(())
    }

    pub async fn update_post_status(&self, request: &PostStatusRequest) -> Result<(), ApiError> {
        self.put::<IgnoredAny, _>("/admin/post/status", request).await?;
        Ok(())
    }

    pub async fn posts(&self, query: &PostQuery) -> Result<Pager<Post>, ApiError> {
        self.get_query("/admin/post", query).await
    }

    // ===== Content and drafts =====

    /// The published body and every draft of a post.
    pub async fn post_contents(&self, post_id: i64) -> Result<Vec<PostContent>, ApiError> {
        self.get(&format!("/admin/post/content/{}", post_id)).await
    }

    pub async fn publish_post_content(&self, post_id: i64, content: &str) -> Result<(), ApiError> {
        self.put::<IgnoredAny, _>("/admin/post/publish", &ContentBody { post_id, content })
            .await?;
        Ok(())
    }

    pub async fn post_content(&self, post_id: i64) -> Result<PostContent, ApiError> {
        self.get(&format!("/admin/post/publish/{}", post_id)).await
    }

    pub async fn add_post_draft(&self, post_id: i64, content: &str, draft_name: &str) -> Result<(), ApiError> {
        let body = DraftBody { post_id, content, draft_name };
        self.post::<IgnoredAny, _>("/admin/post/content/draft", &body).await?;
        Ok(())
    }

    pub async fn delete_post_drafts(&self, post_id: i64, draft_names: &[String]) -> Result<(), ApiError> {
        self.delete::<IgnoredAny, _>(&format!("/admin/post/content/{}/draft", post_id), draft_names)
            .await?;
        Ok(())
    }

    pub async fn update_post_draft(&self, post_id: i64, content: &str, draft_name: &str) -> Result<(), ApiError> {
        let body = DraftBody { post_id, content, draft_name };
        self.put::<IgnoredAny, _>("/admin/post/content/draft", &body).await?;
        Ok(())
    }

    pub async fn rename_post_draft(&self, post_id: i64, old_name: &str, new_name: &str) -> Result<(), ApiError> {
        let body = DraftRenameBody { post_id, old_name, new_name };
        self.put::<IgnoredAny, _>("/admin/post/content/draft/name", &body).await?;
        Ok(())
    }

    pub async fn publish_post_draft(&self, request: &DraftPublishRequest) -> Result<(), ApiError> {
        self.put::<IgnoredAny, _>("/admin/post/content/draft/publish", request)
            .await?;
        Ok(())
    }

    pub async fn post_draft(&self, post_id: i64, draft_name: &str) -> Result<PostContent, ApiError> {
        self.get_segments(&format!("/admin/post/content/{}/draft", post_id), &[draft_name])
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_post_query_skips_unset_filters() {
        let query = PostQuery {
            status: Some(PostStatus::Draft),
            tag_id: Some(3),
            ..PostQuery::page(1, 20)
        };
        let value = serde_json::to_value(&query).unwrap();
        assert_eq!(
            value,
            serde_json::json!({"page": 1, "size": 20, "status": "DRAFT", "tag": 3})
        );
    }
}
