//! Keyboard and focus event types.
//!
//! These mirror what a widget toolkit delivers to an element: key presses
//! with modifier state, and focus transitions. The controller only
//! interprets the navigation subset (`Up`, `Down`, `Left`, `Right`,
//! `Home`, `End`); everything else passes through untouched so adapters
//! can route a full keyboard stream through the same types.

/// Keyboard modifier state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Modifiers {
    pub ctrl: bool,
    pub alt: bool,
    pub shift: bool,
    /// The OS/meta key (Super/Command).
    pub logo: bool,
}

impl Modifiers {
    /// True when a chord modifier is held that navigation must not hijack.
    ///
    /// `shift` is deliberately not included: Shift+Arrow is still plain
    /// directional input to a focus group.
    pub fn has_chord_modifier(&self) -> bool {
        self.ctrl || self.alt || self.logo
    }
}

/// Named keys for special keyboard keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    /// Backspace key
    Backspace,
    /// Delete key
    Delete,
    /// Enter/Return key
    Enter,
    /// Tab key
    Tab,
    /// Escape key
    Escape,
    /// Left arrow
    Left,
    /// Right arrow
    Right,
    /// Up arrow
    Up,
    /// Down arrow
    Down,
    /// Home key
    Home,
    /// End key
    End,
    /// Character input
    Char(char),
}

impl Key {
    /// Whether this key belongs to the roving-navigation set at all.
    pub(crate) fn is_navigation(&self) -> bool {
        matches!(
            self,
            Key::Left | Key::Right | Key::Up | Key::Down | Key::Home | Key::End
        )
    }
}

/// An input event delivered to a focus-group participant.
#[derive(Debug, Clone)]
pub enum Event {
    /// Key pressed
    KeyDown {
        /// The key that was pressed
        key: Key,
        /// Current modifier state
        modifiers: Modifiers,
    },
    /// Key released
    KeyUp {
        /// The key that was released
        key: Key,
        /// Current modifier state
        modifiers: Modifiers,
    },
    /// The element (or one of its descendants) gained keyboard focus.
    FocusIn {
        /// True when focus actually landed on a descendant rather than the
        /// element this event is delivered to. Bubbled focus must not be
        /// reported as the element's own.
        bubbled: bool,
    },
    /// The element lost keyboard focus.
    FocusOut,
}

/// Whether an event was consumed.
///
/// `Handled` means a navigation decision was made and the event's default
/// action (e.g. page scroll) should be suppressed. `Ignored` means the
/// event was irrelevant here and normal processing should continue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventResponse {
    Ignored,
    Handled,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chord_modifier_detection() {
        assert!(!Modifiers::default().has_chord_modifier());
        assert!(Modifiers { ctrl: true, ..Default::default() }.has_chord_modifier());
        assert!(Modifiers { alt: true, ..Default::default() }.has_chord_modifier());
        assert!(Modifiers { logo: true, ..Default::default() }.has_chord_modifier());
    }

    #[test]
    fn test_shift_is_not_a_chord_modifier() {
        let shift = Modifiers {
            shift: true,
            ..Default::default()
        };
        assert!(!shift.has_chord_modifier());
    }

    #[test]
    fn test_navigation_key_set() {
        for key in [Key::Left, Key::Right, Key::Up, Key::Down, Key::Home, Key::End] {
            assert!(key.is_navigation());
        }
        for key in [Key::Tab, Key::Enter, Key::Escape, Key::Char('j')] {
            assert!(!key.is_navigation());
        }
    }
}
