use serde::de::IgnoredAny;
use serde::Serialize;

use crate::models::{Menu, MenuItem, MenuItemRequest, Pager};

use super::client::PageQuery;
use super::{ApiClient, ApiError};

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct MenuBody<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    menu_id: Option<i64>,
    display_name: &'a str,
    is_main: bool,
}

#[derive(Serialize)]
struct TreeQuery {
    tree: bool,
}

impl ApiClient {
    pub async fn add_menu(&self, display_name: &str, is_main: bool) -> Result<(), ApiError> {
        let body = MenuBody { menu_id: None, display_name, is_main };
        self.post::<IgnoredAny, _>("/admin/menu", &body).await?;
        Ok(())
    }

    pub async fn delete_menus(&self, ids: &[i64]) -> Result<(), ApiError> {
        self.delete::<IgnoredAny, _>("/admin/menu", ids).await?;
        Ok(())
    }

    pub async fn update_menu(&self, menu_id: i64, display_name: &str, is_main: bool) -> Result<(), ApiError> {
        let body = MenuBody { menu_id: Some(menu_id), display_name, is_main };
        self.put::<IgnoredAny, _>("/admin/menu", &body).await?;
        Ok(())
    }

    pub async fn menus(&self, page: u32, size: u32) -> Result<Pager<Menu>, ApiError> {
        self.get_query("/admin/menu", &PageQuery { page, size }).await
    }

    // ===== Menu items =====

    pub async fn add_menu_item(&self, item: &MenuItemRequest) -> Result<(), ApiError> {
        self.post::<IgnoredAny, _>("/admin/menu/item", item).await?;
        Ok(())
    }

    pub async fn delete_menu_items(&self, ids: &[i64]) -> Result<(), ApiError> {
        self.delete::<IgnoredAny, _>("/admin/menu/item", ids).await?;
        Ok(())
    }

    pub async fn update_menu_item(&self, item: &MenuItemRequest) -> Result<(), ApiError> {
        self.put::<IgnoredAny, _>("/admin/menu/item", item).await?;
        Ok(())
    }

    /// Items of a menu, nested under their parents when `tree` is set.
    pub async fn menu_items(&self, menu_id: i64, tree: bool) -> Result<Vec<MenuItem>, ApiError> {
        self.get_query(&format!("/admin/menu/item/{}", menu_id), &TreeQuery { tree })
            .await
    }
}
