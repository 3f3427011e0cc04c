//! Data models for the blog admin API.
//!
//! This module contains the wire types exchanged with the remote API:
//!
//! - `Post`, `PostRequest`, `PostContent`: articles, their bodies and drafts
//! - `Tag`, `Category`: taxonomy
//! - `Menu`, `MenuItem`: site navigation menus
//! - `Link`, `Diary`: friend links and short diary entries
//! - `FileEntry`, `FileGroup`, `TencentCosConfig`: attachments and storage
//! - `BlogInfo`, `Icp`: site configuration
//! - `Pager`: the paginated list envelope
//!
//! All types use the API's camelCase field names on the wire. Timestamps are
//! milliseconds since the Unix epoch.

pub mod blog;
pub mod diary;
pub mod file;
pub mod link;
pub mod menu;
pub mod pager;
pub mod post;
pub mod taxonomy;

pub use blog::{BlogAdminRequest, BlogInfo, Icp};
pub use diary::{Diary, DiarySort};
pub use file::{
    FileDelRequest, FileEntry, FileGroup, FileSort, FileStorageMode, StorageModeInfo,
    TencentCosConfig,
};
pub use link::{Link, LinkRequest, LinkSort};
pub use menu::{Menu, MenuItem, MenuItemRequest, MenuItemTarget};
pub use pager::Pager;
pub use post::{
    DraftPublishRequest, Post, PostContent, PostContentStatus, PostRequest, PostSort, PostStatus,
    PostStatusRequest, PostVisible,
};
pub use taxonomy::{Category, Tag};

