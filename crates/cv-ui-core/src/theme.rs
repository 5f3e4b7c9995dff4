//! Light/dark preference.
//!
//! The stored preference wins; without one the environment's colour-scheme
//! answer is used and followed when it changes.

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use tracing::debug;

pub const THEME_STORAGE_KEY: &str = "canventory-theme";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Theme {
    Light,
    Dark,
}

impl Theme {
    pub fn as_str(self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }

    pub fn toggled(self) -> Theme {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }

    /// Glyph shown on the toggle control: the theme you would switch *to*.
    pub fn toggle_icon(self) -> &'static str {
        match self {
            Theme::Light => "\u{1f319}",
            Theme::Dark => "\u{2600}\u{fe0f}",
        }
    }

    pub fn from_system(prefers_dark: bool) -> Theme {
        if prefers_dark { Theme::Dark } else { Theme::Light }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Theme {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "light" => Ok(Theme::Light),
            "dark" => Ok(Theme::Dark),
            _ => Err(()),
        }
    }
}

/// Key/value persistence (browser `localStorage` in production).
pub trait PreferenceStore {
    fn load(&self, key: &str) -> Option<String>;
    fn store(&self, key: &str, value: &str);
    fn remove(&self, key: &str);
}

/// Volatile store, used when `localStorage` is unavailable.
#[derive(Default)]
pub struct MemoryStore {
    values: RefCell<HashMap<String, String>>,
}

impl PreferenceStore for MemoryStore {
    fn load(&self, key: &str) -> Option<String> {
        self.values.borrow().get(key).cloned()
    }

    fn store(&self, key: &str, value: &str) {
        self.values.borrow_mut().insert(key.to_owned(), value.to_owned());
    }

    fn remove(&self, key: &str) {
        self.values.borrow_mut().remove(key);
    }
}

impl<T: PreferenceStore + ?Sized> PreferenceStore for &T {
    fn load(&self, key: &str) -> Option<String> {
        (**self).load(key)
    }

    fn store(&self, key: &str, value: &str) {
        (**self).store(key, value)
    }

    fn remove(&self, key: &str) {
        (**self).remove(key)
    }
}

pub struct ThemeManager<S> {
    store: S,
    current: Cell<Theme>,
}

impl<S: PreferenceStore> ThemeManager<S> {
    /// Resolve the initial theme from storage, falling back to the system.
    pub fn new(store: S, system_prefers_dark: bool) -> Self {
        let current = Self::stored_in(&store).unwrap_or_else(|| Theme::from_system(system_prefers_dark));
        debug!("initial theme: {}", current);
        Self {
            store,
            current: Cell::new(current),
        }
    }

    fn stored_in(store: &S) -> Option<Theme> {
        store.load(THEME_STORAGE_KEY)?.parse().ok()
    }

    pub fn current(&self) -> Theme {
        self.current.get()
    }

    pub fn stored(&self) -> Option<Theme> {
        Self::stored_in(&self.store)
    }

    pub fn set(&self, theme: Theme) {
        self.store.store(THEME_STORAGE_KEY, theme.as_str());
        self.current.set(theme);
    }

    pub fn toggle(&self) -> Theme {
        let next = self.current().toggled();
        self.set(next);
        next
    }

    /// Follow a system colour-scheme change unless the user chose a theme.
    /// Returns the theme to apply, if it changed.
    pub fn system_preference_changed(&self, prefers_dark: bool) -> Option<Theme> {
        if self.stored().is_some() {
            return None;
        }
        let next = Theme::from_system(prefers_dark);
        if next == self.current() {
            return None;
        }
        self.current.set(next);
        Some(next)
    }
}
