use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct Tag {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tag_id: Option<i64>,
    pub display_name: String,
    pub slug: String,
    #[serde(default)]
    pub color: Option<String>,
    #[serde(default, skip_serializing)]
    pub post_count: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category_id: Option<i64>,
    pub display_name: String,
    pub slug: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub cover: Option<String>,
    #[serde(default, skip_serializing)]
    pub post_count: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_tag_omits_id() {
        let tag = Tag {
            display_name: "Rust".to_string(),
            slug: "rust".to_string(),
            ..Default::default()
        };
        let json = serde_json::to_value(&tag).unwrap();
        assert!(json.get("tagId").is_none());
        assert!(json.get("postCount").is_none());
        assert_eq!(json["displayName"], "Rust");
    }
}
