//! Local display preferences, persisted through encrypted storage.
//!
//! Theme and sidebar changes are announced on the event bus so that
//! listeners can react without knowing who changed them.

use std::sync::{Arc, Mutex, MutexGuard};

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::events::{BusEvent, EventBus};
use crate::models::FileStorageMode;
use crate::storage::{SecureStorage, StorageError, StoreKey};

/// Default rows per page for every listing.
const DEFAULT_PAGE_SIZE: u32 = 10;

/// Default interval between automatic saves in the post editor.
const DEFAULT_AUTO_SAVE_SECS: u32 = 60;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct PreferenceData {
    pub theme: Theme,
    pub sider_collapsed: bool,
    pub post_page_size: u32,
    pub tag_page_size: u32,
    pub category_page_size: u32,
    pub link_page_size: u32,
    pub diary_page_size: u32,
    pub file_page_size: u32,
    pub post_auto_save_secs: u32,
    pub file_upload_storage_mode: FileStorageMode,
    pub file_upload_group: Option<i64>,
}

impl Default for PreferenceData {
    fn default() -> Self {
        Self {
            theme: Theme::default(),
            sider_collapsed: false,
            post_page_size: DEFAULT_PAGE_SIZE,
            tag_page_size: DEFAULT_PAGE_SIZE,
            category_page_size: DEFAULT_PAGE_SIZE,
            link_page_size: DEFAULT_PAGE_SIZE,
            diary_page_size: DEFAULT_PAGE_SIZE,
            file_page_size: DEFAULT_PAGE_SIZE,
            post_auto_save_secs: DEFAULT_AUTO_SAVE_SECS,
            file_upload_storage_mode: FileStorageMode::default(),
            file_upload_group: None,
        }
    }
}

pub struct Preferences {
    storage: Arc<SecureStorage>,
    bus: Arc<EventBus>,
    data: Mutex<PreferenceData>,
}

impl Preferences {
    /// Load saved preferences, falling back to defaults if unreadable.
    pub fn restore(storage: Arc<SecureStorage>, bus: Arc<EventBus>) -> Self {
        let data = match storage.get_item::<PreferenceData>(StoreKey::Preferences.as_str()) {
            Ok(data) => data.unwrap_or_default(),
            Err(e) => {
                warn!(error = %e, "Ignoring unreadable preferences");
                PreferenceData::default()
            }
        };

        Self {
            storage,
            bus,
            data: Mutex::new(data),
        }
    }

    fn lock(&self) -> MutexGuard<'_, PreferenceData> {
        self.data.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub fn get(&self) -> PreferenceData {
        self.lock().clone()
    }

    /// Apply `change` and persist the result.
    pub fn update<F>(&self, change: F) -> Result<(), StorageError>
    where
        F: FnOnce(&mut PreferenceData),
    {
        let mut data = self.lock();
        change(&mut data);
        self.storage.set_item(StoreKey::Preferences.as_str(), &*data)
    }

    pub fn set_theme(&self, theme: Theme) -> Result<(), StorageError> {
        self.update(|data| data.theme = theme)?;
        self.bus.emit(match theme {
            Theme::Dark => BusEvent::ThemeDark,
            Theme::Light => BusEvent::ThemeLight,
        });
        Ok(())
    }

    pub fn set_sider_collapsed(&self, collapsed: bool) -> Result<(), StorageError> {
        self.update(|data| data.sider_collapsed = collapsed)?;
        self.bus.emit(if collapsed {
            BusEvent::HiddenSider
        } else {
            BusEvent::VisibleSider
        });
        Ok(())
    }
}
