//! Keyboard shortcuts.
//!
//! `Ctrl`/`Cmd` + `1`..`4` switches tabs, `Ctrl`/`Cmd` + `S` triggers a scan
//! when the scanner tab is active. Every other chord is passed through.

use pn2133_domain::tab::Tab;

/// A key press with its modifier state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyChord {
    pub key: char,
    pub ctrl: bool,
    pub meta: bool,
}

impl KeyChord {
    /// `Ctrl` + `key`.
    #[must_use]
    pub fn ctrl(key: char) -> Self {
        Self {
            key,
            ctrl: true,
            meta: false,
        }
    }

    /// `Cmd` + `key`.
    #[must_use]
    pub fn meta(key: char) -> Self {
        Self {
            key,
            ctrl: false,
            meta: true,
        }
    }
}

/// Action bound to a chord.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shortcut {
    SwitchTab(Tab),
    /// Only acted upon while the scanner tab is active.
    Scan,
}

impl Shortcut {
    /// Map a chord to its action. Chords without `Ctrl`/`Cmd` never match.
    #[must_use]
    pub fn from_chord(chord: KeyChord) -> Option<Self> {
        if !(chord.ctrl || chord.meta) {
            return None;
        }
        if chord.key.eq_ignore_ascii_case(&'s') {
            return Some(Self::Scan);
        }
        Tab::from_shortcut_digit(chord.key).map(Self::SwitchTab)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_map_digits_to_tabs_in_order() {
        assert_eq!(
            Shortcut::from_chord(KeyChord::ctrl('1')),
            Some(Shortcut::SwitchTab(Tab::Scanner))
        );
        assert_eq!(
            Shortcut::from_chord(KeyChord::ctrl('2')),
            Some(Shortcut::SwitchTab(Tab::Logger))
        );
        assert_eq!(
            Shortcut::from_chord(KeyChord::meta('3')),
            Some(Shortcut::SwitchTab(Tab::Settings))
        );
        assert_eq!(
            Shortcut::from_chord(KeyChord::meta('4')),
            Some(Shortcut::SwitchTab(Tab::Data))
        );
    }

    #[test]
    fn should_map_s_to_scan() {
        assert_eq!(Shortcut::from_chord(KeyChord::ctrl('s')), Some(Shortcut::Scan));
        assert_eq!(Shortcut::from_chord(KeyChord::meta('S')), Some(Shortcut::Scan));
    }

    #[test]
    fn should_ignore_chords_without_modifier() {
        let chord = KeyChord {
            key: '1',
            ctrl: false,
            meta: false,
        };
        assert_eq!(Shortcut::from_chord(chord), None);
    }

    #[test]
    fn should_ignore_unbound_keys() {
        assert_eq!(Shortcut::from_chord(KeyChord::ctrl('5')), None);
        assert_eq!(Shortcut::from_chord(KeyChord::ctrl('x')), None);
    }
}
