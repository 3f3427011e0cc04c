use serde::de::IgnoredAny;
use serde::Serialize;

use crate::models::{
    FileDelRequest, FileEntry, FileGroup, FileSort, FileStorageMode, Pager, StorageModeInfo,
    TencentCosConfig,
};

use super::{ApiClient, ApiError};

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct FileGroupBody<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    file_group_id: Option<i64>,
    display_name: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    path: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    storage_mode: Option<FileStorageMode>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct FileGroupQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    file_storage_mode: Option<FileStorageMode>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct MoveFilesBody<'a> {
    file_ids: &'a [i64],
    new_file_group_id: Option<i64>,
}

#[derive(Serialize)]
struct FileQuery<'a> {
    page: u32,
    size: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    sort: Option<FileSort>,
    #[serde(skip_serializing_if = "Option::is_none")]
    mode: Option<FileStorageMode>,
    #[serde(skip_serializing_if = "Option::is_none")]
    key: Option<&'a str>,
}

impl ApiClient {
    pub async fn storage_modes(&self) -> Result<Vec<StorageModeInfo>, ApiError> {
        self.get("/admin/file/mode").await
    }

    // ===== Tencent COS =====

    pub async fn set_tencent_cos(&self, config: &TencentCosConfig) -> Result<(), ApiError> {
        self.post::<IgnoredAny, _>("/admin/file/mode/tencent_cos", config)
            .await?;
        Ok(())
    }

    pub async fn tencent_cos(&self) -> Result<Option<TencentCosConfig>, ApiError> {
        self.get("/admin/file/mode/tencent_cos").await
    }

    pub async fn delete_tencent_cos(&self) -> Result<(), ApiError> {
        self.delete_path::<IgnoredAny>("/admin/file/mode/tencent_cos")
            .await?;
        Ok(())
    }

    // ===== File groups =====

    pub async fn add_file_group(
        &self,
        display_name: &str,
        path: &str,
        storage_mode: FileStorageMode,
    ) -> Result<(), ApiError> {
        let body = FileGroupBody {
            file_group_id: None,
            display_name,
            path: Some(path),
            storage_mode: Some(storage_mode),
        };
        self.post::<IgnoredAny, _>("/admin/file/group", &body).await?;
        Ok(())
    }

    pub async fn delete_file_group(&self, file_group_id: i64) -> Result<(), ApiError> {
        self.delete_path::<IgnoredAny>(&format!("/admin/file/group/{}", file_group_id))
            .await?;
        Ok(())
    }

    pub async fn update_file_group(&self, file_group_id: i64, display_name: &str) -> Result<(), ApiError> {
        let body = FileGroupBody {
            file_group_id: Some(file_group_id),
            display_name,
            path: None,
            storage_mode: None,
        };
        self.put::<IgnoredAny, _>("/admin/file/group", &body).await?;
        Ok(())
    }

    pub async fn file_groups(&self, storage_mode: Option<FileStorageMode>) -> Result<Vec<FileGroup>, ApiError> {
        let query = FileGroupQuery { file_storage_mode: storage_mode };
        self.get_query("/admin/file/group", &query).await
    }

    // ===== Files =====

    pub async fn delete_files(&self, ids: &[i64]) -> Result<(), ApiError> {
        self.delete::<IgnoredAny, _>("/admin/file", ids).await?;
        Ok(())
    }

    pub async fn delete_files_by_names(&self, files: &[FileDelRequest]) -> Result<(), ApiError> {
        self.delete::<IgnoredAny, _>("/admin/file/name", files).await?;
        Ok(())
    }

    /// Move files into a group of the same storage mode; `None` is the default group.
    pub async fn move_files(&self, file_ids: &[i64], new_file_group_id: Option<i64>) -> Result<(), ApiError> {
        let body = MoveFilesBody { file_ids, new_file_group_id };
        self.put::<IgnoredAny, _>("/admin/file", &body).await?;
        Ok(())
    }

    pub async fn files(
        &self,
        page: u32,
        size: u32,
        sort: Option<FileSort>,
        mode: Option<FileStorageMode>,
        key: Option<&str>,
    ) -> Result<Pager<FileEntry>, ApiError> {
        let query = FileQuery { page, size, sort, mode, key };
        self.get_query("/admin/file", &query).await
    }
}
