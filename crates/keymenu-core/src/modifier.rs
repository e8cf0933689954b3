// Keymenu Modifier System
// Bitmask of held Ctrl/Alt/Shift keys, sided or universal

use std::fmt;

use strum::IntoEnumIterator;
use strum_macros::{EnumIter, IntoStaticStr};

use crate::ScanCode;

bitflags::bitflags! {
    /// Modifier keys held as part of a chord.
    ///
    /// Each family has a universal bit (`CTRL`) and two sided bits
    /// (`LCTRL`, `RCTRL`). The empty mask is "no modifier".
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
    pub struct Modifier: u16 {
        const CTRL = 1 << 0;
        const LCTRL = 1 << 1;
        const RCTRL = 1 << 2;
        const ALT = 1 << 3;
        const LALT = 1 << 4;
        const RALT = 1 << 5;
        const SHIFT = 1 << 6;
        const LSHIFT = 1 << 7;
        const RSHIFT = 1 << 8;
    }
}

/// One modifier family, in display priority order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, IntoStaticStr)]
pub enum ModifierFamily {
    #[strum(serialize = "CTRL")]
    Ctrl,
    #[strum(serialize = "ALT")]
    Alt,
    #[strum(serialize = "SHIFT")]
    Shift,
}

impl ModifierFamily {
    /// Universal, left and right bits of this family, in that order
    pub fn bits(self) -> [Modifier; 3] {
        match self {
            ModifierFamily::Ctrl => [Modifier::CTRL, Modifier::LCTRL, Modifier::RCTRL],
            ModifierFamily::Alt => [Modifier::ALT, Modifier::LALT, Modifier::RALT],
            ModifierFamily::Shift => [Modifier::SHIFT, Modifier::LSHIFT, Modifier::RSHIFT],
        }
    }

    /// Every bit belonging to this family
    pub fn mask(self) -> Modifier {
        let [universal, left, right] = self.bits();
        universal | left | right
    }

    /// Label for the first bit of this family present in `modifier`.
    ///
    /// Universal wins over left, left wins over right.
    pub fn label(self, modifier: Modifier) -> Option<&'static str> {
        let [universal, left, right] = self.bits();
        let name: &'static str = self.into();
        if modifier.contains(universal) {
            Some(name)
        } else if modifier.contains(left) {
            Some(match self {
                ModifierFamily::Ctrl => "LCTRL",
                ModifierFamily::Alt => "LALT",
                ModifierFamily::Shift => "LSHIFT",
            })
        } else if modifier.contains(right) {
            Some(match self {
                ModifierFamily::Ctrl => "RCTRL",
                ModifierFamily::Alt => "RALT",
                ModifierFamily::Shift => "RSHIFT",
            })
        } else {
            None
        }
    }
}

impl Modifier {
    /// Empty mask
    pub const NONE: Modifier = Modifier::empty();

    /// Rebuild a mask from persisted bits, dropping anything unknown
    pub fn from_raw(bits: u16) -> Self {
        Modifier::from_bits_truncate(bits)
    }

    /// Collapse every sided bit into its family's universal bit
    pub fn make_universal(self) -> Self {
        let mut out = Modifier::NONE;
        for family in ModifierFamily::iter() {
            if self.intersects(family.mask()) {
                out |= family.bits()[0];
            }
        }
        out
    }

    /// Whether the mask carries only universal bits
    pub fn is_universal(self) -> bool {
        self == self.make_universal()
    }

    /// Whether physically held modifiers satisfy this bound mask.
    ///
    /// Checked per family: a universal bit accepts either side, otherwise
    /// the sided bits must match exactly (absent families must not be held).
    pub fn accepts_held(self, held: Modifier) -> bool {
        ModifierFamily::iter().all(|family| {
            let bound = self & family.mask();
            let pressed = held & family.mask();
            if bound.contains(family.bits()[0]) {
                !pressed.is_empty()
            } else {
                bound == pressed
            }
        })
    }

    /// Whether any bit of the Alt family is set
    pub fn has_alt(self) -> bool {
        self.intersects(ModifierFamily::Alt.mask())
    }

    /// Whether any bit of the Shift family is set
    pub fn has_shift(self) -> bool {
        self.intersects(ModifierFamily::Shift.mask())
    }

    /// Chord prefix such as `"CTRL + SHIFT + "`, one label per family
    pub fn display_prefix(self) -> String {
        let mut out = String::new();
        for family in ModifierFamily::iter() {
            if let Some(label) = family.label(self) {
                out.push_str(label);
                out.push_str(" + ");
            }
        }
        out
    }
}

impl Default for Modifier {
    fn default() -> Self {
        Modifier::NONE
    }
}

impl fmt::Display for Modifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let labels: Vec<&str> = ModifierFamily::iter()
            .filter_map(|family| family.label(*self))
            .collect();
        if labels.is_empty() {
            write!(f, "NONE")
        } else {
            write!(f, "{}", labels.join(" + "))
        }
    }
}

/// Sided and universal modifier key codes
const MODIFIER_KEY_CODES: &[ScanCode] = &[
    ScanCode::LEFT_CTRL,
    ScanCode::RIGHT_CTRL,
    ScanCode::LEFT_ALT,
    ScanCode::RIGHT_ALT,
    ScanCode::LEFT_SHIFT,
    ScanCode::RIGHT_SHIFT,
    ScanCode::CTRL,
    ScanCode::ALT,
    ScanCode::SHIFT,
];

/// Check if a scan code is a Ctrl, Alt or Shift key (either side or universal)
pub fn is_modifier(code: ScanCode) -> bool {
    MODIFIER_KEY_CODES.contains(&code)
}

/// Single modifier bit for a modifier key, `Modifier::NONE` for anything else
pub fn to_modifier(code: ScanCode) -> Modifier {
    match code {
        ScanCode::CTRL => Modifier::CTRL,
        ScanCode::LEFT_CTRL => Modifier::LCTRL,
        ScanCode::RIGHT_CTRL => Modifier::RCTRL,
        ScanCode::ALT => Modifier::ALT,
        ScanCode::LEFT_ALT => Modifier::LALT,
        ScanCode::RIGHT_ALT => Modifier::RALT,
        ScanCode::SHIFT => Modifier::SHIFT,
        ScanCode::LEFT_SHIFT => Modifier::LSHIFT,
        ScanCode::RIGHT_SHIFT => Modifier::RSHIFT,
        _ => Modifier::NONE,
    }
}

impl ScanCode {
    pub fn is_modifier(self) -> bool {
        is_modifier(self)
    }

    pub fn to_modifier(self) -> Modifier {
        to_modifier(self)
    }
}
