/// Caption fields and their placeholder/edit lifecycle
///
/// Each slot shows a default placeholder ("TOP" / "BOTTOM") until the
/// user types something. Beginning an edit clears a placeholder; ending an
/// edit with nothing typed puts the placeholder back.
use super::data::CaptionSlot;

/// Whether a field is showing its placeholder or user text
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaptionState {
    Placeholder,
    Custom,
}

/// One caption text field
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CaptionField {
    slot: CaptionSlot,
    text: String,
}

impl CaptionField {
    /// A field in its initial placeholder state
    pub fn new(slot: CaptionSlot) -> Self {
        Self {
            slot,
            text: slot.default_text().to_string(),
        }
    }

    pub fn slot(&self) -> CaptionSlot {
        self.slot
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Placeholder text is styled like user text, so this is the only
    /// way to tell the two apart.
    pub fn state(&self) -> CaptionState {
        if is_placeholder_text(&self.text) {
            CaptionState::Placeholder
        } else {
            CaptionState::Custom
        }
    }

    /// Clear placeholder text so the user starts from an empty field
    pub fn begin_edit(&mut self) {
        if is_placeholder_text(&self.text) {
            self.text.clear();
        }
    }

    /// Replace the text; captions are always upper case
    pub fn set_text(&mut self, text: &str) {
        self.text = text.to_uppercase();
    }

    /// Restore the placeholder if the field was left empty
    pub fn end_edit(&mut self) {
        if self.text.is_empty() {
            self.reset();
        }
    }

    /// Force the field back to its placeholder
    pub fn reset(&mut self) {
        self.text = self.slot.default_text().to_string();
    }
}

/// Any slot's placeholder counts, so "BOTTOM" in the top slot is cleared too
fn is_placeholder_text(text: &str) -> bool {
    CaptionSlot::ALL
        .iter()
        .any(|slot| slot.default_text() == text)
}

/// Edit-lifecycle handler for both caption fields
///
/// At most one field is being edited at a time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Captions {
    top: CaptionField,
    bottom: CaptionField,
    editing: Option<CaptionSlot>,
}

impl Default for Captions {
    fn default() -> Self {
        Self {
            top: CaptionField::new(CaptionSlot::Top),
            bottom: CaptionField::new(CaptionSlot::Bottom),
            editing: None,
        }
    }
}

impl Captions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn field(&self, slot: CaptionSlot) -> &CaptionField {
        match slot {
            CaptionSlot::Top => &self.top,
            CaptionSlot::Bottom => &self.bottom,
        }
    }

    fn field_mut(&mut self, slot: CaptionSlot) -> &mut CaptionField {
        match slot {
            CaptionSlot::Top => &mut self.top,
            CaptionSlot::Bottom => &mut self.bottom,
        }
    }

    pub fn text(&self, slot: CaptionSlot) -> &str {
        self.field(slot).text()
    }

    /// The slot that currently has focus, if any
    pub fn editing(&self) -> Option<CaptionSlot> {
        self.editing
    }

    pub fn is_editing(&self, slot: CaptionSlot) -> bool {
        self.editing == Some(slot)
    }

    /// Focus `slot`. Returns the slot that lost focus, if a different one
    /// was being edited.
    pub fn begin_editing(&mut self, slot: CaptionSlot) -> Option<CaptionSlot> {
        if self.editing == Some(slot) {
            return None;
        }

        let ended = self.end_editing();
        self.field_mut(slot).begin_edit();
        self.editing = Some(slot);
        ended
    }

    /// Apply typed text to the focused slot. Input for an unfocused slot
    /// is dropped and `false` returned.
    pub fn edit(&mut self, slot: CaptionSlot, text: &str) -> bool {
        if self.editing != Some(slot) {
            return false;
        }

        self.field_mut(slot).set_text(text);
        true
    }

    /// Drop focus. Returns the slot that was being edited.
    pub fn end_editing(&mut self) -> Option<CaptionSlot> {
        let slot = self.editing.take()?;
        self.field_mut(slot).end_edit();
        Some(slot)
    }

    /// Both fields back to their placeholders, focus dropped
    pub fn reset(&mut self) {
        self.editing = None;
        self.top.reset();
        self.bottom.reset();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_initial_state_is_placeholder() {
        let captions = Captions::new();

        assert_eq!(captions.text(CaptionSlot::Top), "TOP");
        assert_eq!(captions.text(CaptionSlot::Bottom), "BOTTOM");
        assert_eq!(captions.field(CaptionSlot::Top).state(), CaptionState::Placeholder);
        assert_eq!(captions.editing(), None);
    }

    #[test]
    fn test_edit_cycle_keeps_custom_text() {
        let mut captions = Captions::new();

        captions.begin_editing(CaptionSlot::Top);
        assert_eq!(captions.text(CaptionSlot::Top), "");

        assert!(captions.edit(CaptionSlot::Top, "LOL"));
        captions.end_editing();

        assert_eq!(captions.text(CaptionSlot::Top), "LOL");
        assert_eq!(captions.field(CaptionSlot::Top).state(), CaptionState::Custom);
    }

    #[test]
    fn test_typed_text_is_upper_cased() {
        let mut captions = Captions::new();
        captions.begin_editing(CaptionSlot::Bottom);
        captions.edit(CaptionSlot::Bottom, "such wow");

        assert_eq!(captions.text(CaptionSlot::Bottom), "SUCH WOW");
    }

    #[test]
    fn test_other_slots_placeholder_is_cleared() {
        let mut field = CaptionField::new(CaptionSlot::Top);
        field.set_text("BOTTOM");
        field.begin_edit();

        assert_eq!(field.text(), "");
    }

    #[test]
    fn test_switching_focus_ends_previous_edit() {
        let mut captions = Captions::new();
        captions.begin_editing(CaptionSlot::Top);

        let ended = captions.begin_editing(CaptionSlot::Bottom);

        assert_eq!(ended, Some(CaptionSlot::Top));
        assert_eq!(captions.text(CaptionSlot::Top), "TOP");
        assert_eq!(captions.text(CaptionSlot::Bottom), "");
        assert!(captions.is_editing(CaptionSlot::Bottom));
    }

    #[test]
    fn test_input_for_unfocused_slot_is_dropped() {
        let mut captions = Captions::new();
        captions.begin_editing(CaptionSlot::Top);

        assert!(!captions.edit(CaptionSlot::Bottom, "NOPE"));
        assert_eq!(captions.text(CaptionSlot::Bottom), "BOTTOM");
    }

    #[test]
    fn test_reset_drops_focus() {
        let mut captions = Captions::new();
        captions.begin_editing(CaptionSlot::Top);
        captions.edit(CaptionSlot::Top, "HELLO");

        captions.reset();

        assert_eq!(captions, Captions::new());
    }

    fn custom_text() -> impl Strategy<Value = String> {
        "[A-Z0-9 !?]{0,24}".prop_filter("not a placeholder", |s| !is_placeholder_text(s))
    }

    proptest! {
        #[test]
        fn begin_edit_leaves_custom_text_unchanged(text in custom_text()) {
            let mut field = CaptionField::new(CaptionSlot::Top);
            field.set_text(&text);
            field.begin_edit();
            prop_assert_eq!(field.text(), text.as_str());
        }

        #[test]
        fn end_edit_keeps_non_empty_text(text in "[A-Z0-9 !?]{1,24}") {
            let mut field = CaptionField::new(CaptionSlot::Bottom);
            field.set_text(&text);
            field.end_edit();
            prop_assert_eq!(field.text(), text.as_str());
        }

        #[test]
        fn empty_at_edit_end_restores_default(top in any::<bool>()) {
            let slot = if top { CaptionSlot::Top } else { CaptionSlot::Bottom };
            let mut field = CaptionField::new(slot);
            field.begin_edit();
            prop_assert_eq!(field.text(), "");
            field.end_edit();
            prop_assert_eq!(field.text(), slot.default_text());
        }

        #[test]
        fn reset_always_restores_defaults(
            top in "[a-zA-Z ]{0,16}",
            bottom in "[a-zA-Z ]{0,16}",
            focus in proptest::option::of(any::<bool>()),
        ) {
            let mut captions = Captions::new();
            captions.begin_editing(CaptionSlot::Top);
            captions.edit(CaptionSlot::Top, &top);
            captions.begin_editing(CaptionSlot::Bottom);
            captions.edit(CaptionSlot::Bottom, &bottom);
            match focus {
                Some(true) => { captions.begin_editing(CaptionSlot::Top); }
                Some(false) => {}
                None => { captions.end_editing(); }
            }

            captions.reset();

            prop_assert_eq!(captions.text(CaptionSlot::Top), "TOP");
            prop_assert_eq!(captions.text(CaptionSlot::Bottom), "BOTTOM");
            prop_assert_eq!(captions.editing(), None);
        }
    }
}
