//! `localStorage`-backed preferences.
//!
//! Values are stored as raw strings so the server-rendered page can read the
//! theme before this module loads.

use cv_ui_core::theme::{MemoryStore, PreferenceStore};
use tracing::warn;

pub enum LocalPreferences {
    Browser(web_sys::Storage),
    /// Private browsing or storage disabled; lasts for the page only.
    Volatile(MemoryStore),
}

impl LocalPreferences {
    pub fn open() -> Self {
        match gloo_utils::window().local_storage() {
            Ok(Some(storage)) => LocalPreferences::Browser(storage),
            _ => {
                warn!("localStorage unavailable; preferences will not persist");
                LocalPreferences::Volatile(MemoryStore::default())
            }
        }
    }
}

impl PreferenceStore for LocalPreferences {
    fn load(&self, key: &str) -> Option<String> {
        match self {
            LocalPreferences::Browser(storage) => storage.get_item(key).ok()?,
            LocalPreferences::Volatile(memory) => memory.load(key),
        }
    }

    fn store(&self, key: &str, value: &str) {
        match self {
            LocalPreferences::Browser(storage) => {
                if storage.set_item(key, value).is_err() {
                    warn!("could not persist '{}'", key);
                }
            }
            LocalPreferences::Volatile(memory) => memory.store(key, value),
        }
    }

    fn remove(&self, key: &str) {
        match self {
            LocalPreferences::Browser(storage) => {
                let _ = storage.remove_item(key);
            }
            LocalPreferences::Volatile(memory) => memory.remove(key),
        }
    }
}
