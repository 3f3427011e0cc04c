use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Menu {
    pub menu_id: i64,
    pub is_main: bool,
    pub display_name: String,
    pub create_time: i64,
}

/// How a menu link is opened in the browser.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MenuItemTarget {
    #[default]
    #[serde(rename = "SELF")]
    SelfWindow,
    Blank,
    Parent,
    Top,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MenuItem {
    pub menu_item_id: i64,
    pub menu_id: i64,
    pub display_name: String,
    pub href: String,
    #[serde(default)]
    pub target: MenuItemTarget,
    #[serde(default)]
    pub parent_menu_id: Option<i64>,
    #[serde(default)]
    pub parent_menu_item_id: Option<i64>,
    #[serde(default)]
    pub children: Vec<MenuItem>,
    #[serde(default)]
    pub index: i32,
    pub create_time: i64,
    #[serde(default)]
    pub last_modify_time: Option<i64>,
}

impl MenuItem {
    /// Number of items in this subtree, including this one.
    pub fn subtree_len(&self) -> usize {
        1 + self.children.iter().map(MenuItem::subtree_len).sum::<usize>()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct MenuItemRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub menu_item_id: Option<i64>,
    pub display_name: String,
    pub href: String,
    pub target: Option<MenuItemTarget>,
    pub parent_menu_id: i64,
    pub parent_menu_item_id: Option<i64>,
    pub index: Option<i32>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_menu_tree() {
        let json = r#"[{
            "menuItemId": 1, "menuId": 1, "displayName": "Home", "href": "/",
            "target": "SELF", "parentMenuId": 1, "parentMenuItemId": null, "index": 0,
            "createTime": 1, "lastModifyTime": 1,
            "children": [{
                "menuItemId": 2, "menuId": 1, "displayName": "About", "href": "/about",
                "target": "BLANK", "parentMenuId": 1, "parentMenuItemId": 1, "index": 0,
                "createTime": 1, "lastModifyTime": 1, "children": []
            }]
        }]"#;

        let items: Vec<MenuItem> = serde_json::from_str(json).unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].subtree_len(), 2);
        assert_eq!(items[0].target, MenuItemTarget::SelfWindow);
        assert_eq!(items[0].children[0].target, MenuItemTarget::Blank);
    }
}
