use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FileStorageMode {
    #[default]
    Local,
    TencentCos,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FileSort {
    #[default]
    CreateTimeDesc,
    CreateTimeAsc,
    SizeDesc,
    SizeAsc,
}

/// An uploaded attachment.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct FileEntry {
    pub file_id: i64,
    #[serde(default)]
    pub file_group_id: Option<i64>,
    #[serde(default)]
    pub file_group_name: Option<String>,
    pub display_name: String,
    pub url: String,
    /// Size in bytes.
    pub size: u64,
    pub storage_mode: FileStorageMode,
    pub create_time: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct FileGroup {
    pub file_group_id: i64,
    pub display_name: String,
    pub path: String,
    pub storage_mode: FileStorageMode,
}

/// A storage mode and whether it has been configured on the server.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct StorageModeInfo {
    pub storage_mode: FileStorageMode,
    #[serde(default)]
    pub configured: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct FileDelRequest {
    pub name: String,
    pub storage_mode: FileStorageMode,
}

#[derive(Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TencentCosConfig {
    pub secret_id: String,
    pub secret_key: String,
    pub region: String,
    pub bucket: String,
    pub https: bool,
    pub path: Option<String>,
}

impl std::fmt::Debug for TencentCosConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TencentCosConfig")
            .field("secret_id", &self.secret_id)
            .field("secret_key", &"<redacted>")
            .field("region", &self.region)
            .field("bucket", &self.bucket)
            .field("https", &self.https)
            .field("path", &self.path)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_storage_mode_wire_names() {
        assert_eq!(
            serde_json::to_string(&FileStorageMode::TencentCos).unwrap(),
            "\"TENCENT_COS\""
        );
        let mode: FileStorageMode = serde_json::from_str("\"LOCAL\"").unwrap();
        assert_eq!(mode, FileStorageMode::Local);
    }

    #[test]
    fn test_cos_config_debug_hides_key() {
        let config = TencentCosConfig {
            secret_id: "id".to_string(),
            secret_key: "very-secret".to_string(),
            region: "ap-shanghai".to_string(),
            bucket: "blog-1250000000".to_string(),
            https: true,
            path: None,
        };
        assert!(!format!("{:?}", config).contains("very-secret"));
    }
}
