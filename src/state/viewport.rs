/// Vertical scene offset driven by the on-screen keyboard
///
/// While the bottom caption has focus the scene slides up by the keyboard
/// height so the caption stays visible, and slides back when the keyboard
/// hides. The offset only changes through these transitions.

/// Keyboard visibility notifications
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum KeyboardEvent {
    WillShow { height: f32 },
    WillHide { height: f32 },
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Viewport {
    offset: f32,
}

impl Viewport {
    /// Current vertical offset in points (zero or negative)
    pub fn offset(&self) -> f32 {
        self.offset
    }

    /// The scene is only rendered while at rest
    pub fn is_at_rest(&self) -> bool {
        self.offset == 0.0
    }

    /// Apply a keyboard event. Only the focused bottom caption moves the
    /// scene; anything else leaves it where it is.
    pub fn apply(&mut self, event: KeyboardEvent, bottom_focused: bool) {
        if !bottom_focused {
            return;
        }

        match event {
            KeyboardEvent::WillShow { height } if self.is_at_rest() => {
                self.offset -= height;
            }
            KeyboardEvent::WillHide { height } if !self.is_at_rest() => {
                self.offset += height;
            }
            _ => {}
        }
    }

    /// Snap back to rest, used when focus is dropped without a hide event
    pub fn settle(&mut self) {
        self.offset = 0.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_show_then_hide_returns_to_rest() {
        let mut viewport = Viewport::default();

        viewport.apply(KeyboardEvent::WillShow { height: 300.0 }, true);
        assert_eq!(viewport.offset(), -300.0);

        viewport.apply(KeyboardEvent::WillHide { height: 300.0 }, true);
        assert!(viewport.is_at_rest());
    }

    #[test]
    fn test_top_caption_does_not_move_scene() {
        let mut viewport = Viewport::default();
        viewport.apply(KeyboardEvent::WillShow { height: 300.0 }, false);
        assert!(viewport.is_at_rest());
    }

    #[test]
    fn test_repeated_show_only_moves_once() {
        let mut viewport = Viewport::default();
        viewport.apply(KeyboardEvent::WillShow { height: 300.0 }, true);
        viewport.apply(KeyboardEvent::WillShow { height: 320.0 }, true);
        assert_eq!(viewport.offset(), -300.0);
    }

    #[test]
    fn test_hide_at_rest_is_ignored() {
        let mut viewport = Viewport::default();
        viewport.apply(KeyboardEvent::WillHide { height: 300.0 }, true);
        assert!(viewport.is_at_rest());
    }

    #[test]
    fn test_settle() {
        let mut viewport = Viewport::default();
        viewport.apply(KeyboardEvent::WillShow { height: 280.0 }, true);
        viewport.settle();
        assert!(viewport.is_at_rest());
    }
}
