// Keymenu Keyset
// One observed chord: trigger key plus every modifier held at the time

use std::collections::BTreeSet;
use std::fmt;

use crate::{Modifier, ScanCode};

/// Currently pressed scan codes, ordered for deterministic iteration
pub type ScanCodeSet = BTreeSet<ScanCode>;

/// A captured chord: the trigger key and all modifiers held with it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Keyset {
    pub key: ScanCode,
    pub modifier: Modifier,
}

impl Keyset {
    pub const NONE: Keyset = Keyset {
        key: ScanCode::NONE,
        modifier: Modifier::NONE,
    };

    pub fn new(key: ScanCode, modifier: Modifier) -> Self {
        Self { key, modifier }
    }

    /// A chord with no modifiers
    pub fn key_only(key: ScanCode) -> Self {
        Self::new(key, Modifier::NONE)
    }

    pub fn is_none(&self) -> bool {
        self.key.is_none()
    }

    /// Same chord with left/right variants collapsed on both key and modifier
    pub fn make_universal(self) -> Self {
        Self::new(self.key.make_universal(), self.modifier.make_universal())
    }

    /// Modifier bits of every modifier key in `pressed`, skipping `except`
    pub fn held_modifiers(pressed: &ScanCodeSet, except: ScanCode) -> Modifier {
        pressed
            .iter()
            .filter(|code| **code != except)
            .fold(Modifier::NONE, |acc, code| acc | code.to_modifier())
    }

    /// Build the chord formed by a set of held keys.
    ///
    /// The trigger is the highest non-modifier code held. When only modifiers
    /// are held, the highest modifier becomes the trigger and the rest form
    /// the modifier mask.
    pub fn from_pressed(pressed: &ScanCodeSet) -> Self {
        let key = pressed
            .iter()
            .rev()
            .find(|code| !code.is_modifier())
            .or_else(|| pressed.iter().next_back())
            .copied()
            .unwrap_or(ScanCode::NONE);
        Self::new(key, Self::held_modifiers(pressed, key))
    }

    /// Chord for a specific trigger key given everything else held
    pub fn with_trigger(trigger: ScanCode, pressed: &ScanCodeSet) -> Self {
        Self::new(trigger, Self::held_modifiers(pressed, trigger))
    }
}

impl From<(ScanCode, Modifier)> for Keyset {
    fn from((key, modifier): (ScanCode, Modifier)) -> Self {
        Self::new(key, modifier)
    }
}

impl fmt::Display for Keyset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_none() {
            return Ok(());
        }
        write!(f, "{}{}", self.modifier.display_prefix(), self.key.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set(codes: &[ScanCode]) -> ScanCodeSet {
        codes.iter().copied().collect()
    }

    #[test]
    fn test_from_pressed_picks_non_modifier_trigger() {
        let ks = Keyset::from_pressed(&set(&[ScanCode::LEFT_CTRL, ScanCode::K]));
        assert_eq!(ks, Keyset::new(ScanCode::K, Modifier::LCTRL));
    }

    #[test]
    fn test_from_pressed_modifier_only_chord() {
        let ks = Keyset::from_pressed(&set(&[ScanCode::LEFT_CTRL, ScanCode::LEFT_ALT]));
        assert_eq!(ks, Keyset::new(ScanCode::LEFT_ALT, Modifier::LCTRL));
    }

    #[test]
    fn test_from_pressed_empty() {
        assert_eq!(Keyset::from_pressed(&ScanCodeSet::new()), Keyset::NONE);
    }

    #[test]
    fn test_with_trigger_excludes_trigger_bit() {
        let pressed = set(&[ScanCode::RIGHT_SHIFT, ScanCode::LEFT_ALT]);
        let ks = Keyset::with_trigger(ScanCode::LEFT_ALT, &pressed);
        assert_eq!(ks.modifier, Modifier::RSHIFT);
    }

    #[test]
    fn test_display() {
        let ks = Keyset::new(ScanCode::M, Modifier::SHIFT | Modifier::ALT);
        assert_eq!(ks.to_string(), "ALT + SHIFT + M");
        assert_eq!(Keyset::NONE.to_string(), "");
    }
}
