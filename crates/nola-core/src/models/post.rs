use serde::{Deserialize, Serialize};

use super::{Category, Tag};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PostStatus {
    Published,
    Draft,
    /// In the recycle bin. Only recycled posts can be deleted.
    Deleted,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PostVisible {
    Visible,
    Hidden,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PostSort {
    #[default]
    CreateDesc,
    CreateAsc,
    ModifyDesc,
    ModifyAsc,
    VisitDesc,
    VisitAsc,
    Pinned,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PostContentStatus {
    Published,
    Draft,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    pub post_id: i64,
    pub title: String,
    #[serde(default)]
    pub auto_generate_excerpt: bool,
    #[serde(default)]
    pub excerpt: String,
    pub slug: String,
    #[serde(default)]
    pub cover: Option<String>,
    #[serde(default)]
    pub allow_comment: bool,
    #[serde(default)]
    pub pinned: bool,
    pub status: PostStatus,
    pub visible: PostVisible,
    /// Whether the post is password protected. The password itself is never returned.
    #[serde(default)]
    pub encrypted: bool,
    #[serde(default)]
    pub visit: u64,
    #[serde(default)]
    pub category: Option<Category>,
    #[serde(default)]
    pub tags: Vec<Tag>,
    pub create_time: i64,
    #[serde(default)]
    pub last_modify_time: Option<i64>,
}

/// Body for creating (`post_id` unset, `content` required) or updating a post.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PostRequest {
    pub post_id: Option<i64>,
    pub title: String,
    pub auto_generate_excerpt: bool,
    pub excerpt: Option<String>,
    pub slug: String,
    pub cover: Option<String>,
    pub allow_comment: bool,
    pub pinned: bool,
    pub status: PostStatus,
    pub visible: PostVisible,
    pub password: Option<String>,
    pub category_id: Option<i64>,
    pub tag_ids: Vec<i64>,
    pub content: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PostContent {
    #[serde(default)]
    pub post_content_id: Option<i64>,
    pub post_id: i64,
    #[serde(default)]
    pub content: Option<String>,
    pub status: PostContentStatus,
    #[serde(default)]
    pub draft_name: Option<String>,
    #[serde(default)]
    pub last_modify_time: Option<i64>,
}

/// Partial status update; unset fields are left unchanged by the server.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PostStatusRequest {
    pub post_id: i64,
    pub status: Option<PostStatus>,
    pub visible: Option<PostVisible>,
    pub pinned: Option<bool>,
}

/// Promote a draft to the published body.
///
/// When `delete_content` is false the old body is kept as a draft named
/// `content_name`, or after the promoted draft when that is unset.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DraftPublishRequest {
    pub post_id: i64,
    pub draft_name: String,
    pub delete_content: bool,
    pub content_name: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_post() {
        let json = r##"{
            "postId": 12,
            "title": "Hello",
            "autoGenerateExcerpt": true,
            "excerpt": "Hi",
            "slug": "hello",
            "cover": null,
            "allowComment": true,
            "pinned": false,
            "status": "PUBLISHED",
            "visible": "VISIBLE",
            "encrypted": false,
            "password": null,
            "visit": 3,
            "category": {"categoryId": 1, "displayName": "Notes", "slug": "notes", "postCount": 4},
            "tags": [{"tagId": 2, "displayName": "Rust", "slug": "rust", "color": "#f00"}],
            "createTime": 1700000000000,
            "lastModifyTime": null
        }"##;

        let post: Post = serde_json::from_str(json).unwrap();
        assert_eq!(post.post_id, 12);
        assert_eq!(post.status, PostStatus::Published);
        assert_eq!(post.category.as_ref().map(|c| c.post_count), Some(4));
        assert_eq!(post.tags[0].color.as_deref(), Some("#f00"));
    }

    #[test]
    fn test_enum_wire_names() {
        assert_eq!(serde_json::to_string(&PostSort::VisitDesc).unwrap(), "\"VISIT_DESC\"");
        assert_eq!(serde_json::to_string(&PostStatus::Deleted).unwrap(), "\"DELETED\"");
    }
}
