//! Category icon picker.

/// Glyphs offered for category icons.
pub const CATEGORY_EMOJIS: &[&str] = &[
    "\u{1f96b}", // canned food
    "\u{1f35e}", // bread
    "\u{1f95b}", // milk
    "\u{1f9c0}", // cheese
    "\u{1f95a}", // egg
    "\u{1f969}", // meat
    "\u{1f357}", // poultry
    "\u{1f41f}", // fish
    "\u{1f34e}", // apple
    "\u{1f34c}", // banana
    "\u{1f955}", // carrot
    "\u{1f966}", // broccoli
    "\u{1f96c}", // leafy green
    "\u{1f345}", // tomato
    "\u{1f9c5}", // onion
    "\u{1f35a}", // rice
    "\u{1f35d}", // pasta
    "\u{1f963}", // cereal
    "\u{1f36a}", // cookie
    "\u{1f36b}", // chocolate
    "\u{1f95c}", // nuts
    "\u{1f9c2}", // salt
    "\u{1fad9}", // jar
    "\u{1f36f}", // honey
    "\u{1f9c3}", // juice box
    "\u{2615}",  // coffee
    "\u{1f375}", // tea
    "\u{1f37a}", // beer
    "\u{1f377}", // wine
    "\u{1f9ca}", // ice
    "\u{1f366}", // ice cream
    "\u{1f4e6}", // other
];

/// Which picker popover is open; at most one at a time.
#[derive(Debug, Default)]
pub struct PickerState {
    open: Option<String>,
}

impl PickerState {
    pub fn open_picker(&self) -> Option<&str> {
        self.open.as_deref()
    }

    /// Toggle `picker`. Returns the picker that must be closed as a side
    /// effect, if another one was open.
    pub fn toggle(&mut self, picker: &str) -> Option<String> {
        match self.open.take() {
            Some(current) if current == picker => None,
            Some(current) => {
                self.open = Some(picker.to_owned());
                Some(current)
            }
            None => {
                self.open = Some(picker.to_owned());
                None
            }
        }
    }

    /// A glyph was chosen in `picker`; it closes.
    pub fn choose(&mut self, picker: &str) {
        if self.open.as_deref() == Some(picker) {
            self.open = None;
        }
    }

    /// Click outside every picker. Returns the one to close.
    pub fn outside_click(&mut self) -> Option<String> {
        self.open.take()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_one_picker_open() {
        let mut state = PickerState::default();
        assert_eq!(state.toggle("new"), None);
        assert_eq!(state.open_picker(), Some("new"));

        assert_eq!(state.toggle("edit-4"), Some("new".to_owned()));
        assert_eq!(state.open_picker(), Some("edit-4"));

        assert_eq!(state.toggle("edit-4"), None);
        assert_eq!(state.open_picker(), None);
    }

    #[test]
    fn choose_and_outside_click_close() {
        let mut state = PickerState::default();
        state.toggle("new");
        state.choose("other");
        assert_eq!(state.open_picker(), Some("new"));
        state.choose("new");
        assert_eq!(state.open_picker(), None);

        state.toggle("new");
        assert_eq!(state.outside_click(), Some("new".to_owned()));
        assert_eq!(state.outside_click(), None);
    }

    #[test]
    fn palette_has_fallback_glyph() {
        assert!(CATEGORY_EMOJIS.contains(&"\u{1f4e6}"));
    }
}
