// Keymenu Scan Codes
// Physical key identifiers from Linux input-event-codes.h plus universal modifier codes

use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

/// Identifier for a physical key.
///
/// Physical codes match Linux `input-event-codes.h`. Three synthetic codes
/// (`CTRL`, `ALT`, `SHIFT`) stand for a modifier key regardless of side.
/// `NONE` doubles as the "unset" and "unknown" sentinel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
#[repr(transparent)]
pub struct ScanCode(u32);

impl ScanCode {
    pub const NONE: ScanCode = ScanCode(0);

    pub const ESCAPE: ScanCode = ScanCode(1);
    pub const DIGIT_1: ScanCode = ScanCode(2);
    pub const DIGIT_0: ScanCode = ScanCode(11);
    pub const BACKSPACE: ScanCode = ScanCode(14);
    pub const TAB: ScanCode = ScanCode(15);
    pub const Q: ScanCode = ScanCode(16);
    pub const W: ScanCode = ScanCode(17);
    pub const E: ScanCode = ScanCode(18);
    pub const R: ScanCode = ScanCode(19);
    pub const T: ScanCode = ScanCode(20);
    pub const Y: ScanCode = ScanCode(21);
    pub const U: ScanCode = ScanCode(22);
    pub const I: ScanCode = ScanCode(23);
    pub const O: ScanCode = ScanCode(24);
    pub const P: ScanCode = ScanCode(25);
    pub const ENTER: ScanCode = ScanCode(28);
    pub const LEFT_CTRL: ScanCode = ScanCode(29);
    pub const A: ScanCode = ScanCode(30);
    pub const S: ScanCode = ScanCode(31);
    pub const D: ScanCode = ScanCode(32);
    pub const F: ScanCode = ScanCode(33);
    pub const G: ScanCode = ScanCode(34);
    pub const H: ScanCode = ScanCode(35);
    pub const J: ScanCode = ScanCode(36);
    pub const K: ScanCode = ScanCode(37);
    pub const L: ScanCode = ScanCode(38);
    pub const LEFT_SHIFT: ScanCode = ScanCode(42);
    pub const Z: ScanCode = ScanCode(44);
    pub const X: ScanCode = ScanCode(45);
    pub const C: ScanCode = ScanCode(46);
    pub const V: ScanCode = ScanCode(47);
    pub const B: ScanCode = ScanCode(48);
    pub const N: ScanCode = ScanCode(49);
    pub const M: ScanCode = ScanCode(50);
    pub const RIGHT_SHIFT: ScanCode = ScanCode(54);
    pub const LEFT_ALT: ScanCode = ScanCode(56);
    pub const SPACE: ScanCode = ScanCode(57);
    pub const CAPS_LOCK: ScanCode = ScanCode(58);
    pub const F1: ScanCode = ScanCode(59);
    pub const F2: ScanCode = ScanCode(60);
    pub const F3: ScanCode = ScanCode(61);
    pub const F4: ScanCode = ScanCode(62);
    pub const F5: ScanCode = ScanCode(63);
    pub const F6: ScanCode = ScanCode(64);
    pub const F7: ScanCode = ScanCode(65);
    pub const F8: ScanCode = ScanCode(66);
    pub const F9: ScanCode = ScanCode(67);
    pub const F10: ScanCode = ScanCode(68);
    pub const F11: ScanCode = ScanCode(87);
    pub const F12: ScanCode = ScanCode(88);
    pub const RIGHT_CTRL: ScanCode = ScanCode(97);
    pub const RIGHT_ALT: ScanCode = ScanCode(100);
    pub const HOME: ScanCode = ScanCode(102);
    pub const UP: ScanCode = ScanCode(103);
    pub const PAGE_UP: ScanCode = ScanCode(104);
    pub const LEFT: ScanCode = ScanCode(105);
    pub const RIGHT: ScanCode = ScanCode(106);
    pub const END: ScanCode = ScanCode(107);
    pub const DOWN: ScanCode = ScanCode(108);
    pub const PAGE_DOWN: ScanCode = ScanCode(109);
    pub const INSERT: ScanCode = ScanCode(110);
    pub const DELETE: ScanCode = ScanCode(111);

    /// Ctrl on either side
    pub const CTRL: ScanCode = ScanCode(0x1001);
    /// Alt on either side
    pub const ALT: ScanCode = ScanCode(0x1002);
    /// Shift on either side
    pub const SHIFT: ScanCode = ScanCode(0x1003);

    /// Build a scan code from a raw value, mapping anything unknown to `NONE`.
    pub fn from_raw(code: u32) -> Self {
        let candidate = ScanCode(code);
        if candidate.is_known() {
            candidate
        } else {
            ScanCode::NONE
        }
    }

    /// Get the raw numeric code value
    pub fn code(self) -> u32 {
        self.0
    }

    pub fn is_none(self) -> bool {
        self == ScanCode::NONE
    }

    /// Whether this is a physical code with a name or one of the universal codes
    pub fn is_known(self) -> bool {
        self.is_universal_modifier() || names_by_code().get(self.0 as usize).is_some_and(Option::is_some)
    }

    pub fn is_universal_modifier(self) -> bool {
        matches!(self, ScanCode::CTRL | ScanCode::ALT | ScanCode::SHIFT)
    }

    /// Collapse a sided modifier key into its universal code.
    ///
    /// Non-modifier keys are returned unchanged.
    pub fn make_universal(self) -> Self {
        match self {
            ScanCode::LEFT_CTRL | ScanCode::RIGHT_CTRL => ScanCode::CTRL,
            ScanCode::LEFT_ALT | ScanCode::RIGHT_ALT => ScanCode::ALT,
            ScanCode::LEFT_SHIFT | ScanCode::RIGHT_SHIFT => ScanCode::SHIFT,
            other => other,
        }
    }

    /// Human-readable key name
    pub fn name(self) -> &'static str {
        scan_code_name(self)
    }

    /// Reverse lookup of [`ScanCode::name`], ignoring case, spaces and underscores.
    pub fn from_name(name: &str) -> Option<ScanCode> {
        let wanted = normalize_name(name);
        if wanted.is_empty() {
            return None;
        }
        KEY_NAMES
            .iter()
            .chain(UNIVERSAL_NAMES.iter())
            .chain(NAME_ALIASES.iter())
            .find(|(_, n)| normalize_name(n) == wanted)
            .map(|(code, _)| ScanCode(*code))
    }

    /// Map a printable character to the key that produces it on a US layout
    pub fn from_char(c: char) -> Option<ScanCode> {
        let code = match c.to_ascii_lowercase() {
            'a' => 30,
            'b' => 48,
            'c' => 46,
            'd' => 32,
            'e' => 18,
            'f' => 33,
            'g' => 34,
            'h' => 35,
            'i' => 23,
            'j' => 36,
            'k' => 37,
            'l' => 38,
            'm' => 50,
            'n' => 49,
            'o' => 24,
            'p' => 25,
            'q' => 16,
            'r' => 19,
            's' => 31,
            't' => 20,
            'u' => 22,
            'v' => 47,
            'w' => 17,
            'x' => 45,
            'y' => 21,
            'z' => 44,
            '1' | '!' => 2,
            '2' | '@' => 3,
            '3' | '#' => 4,
            '4' | '$' => 5,
            '5' | '%' => 6,
            '6' | '^' => 7,
            '7' | '&' => 8,
            '8' | '*' => 9,
            '9' | '(' => 10,
            '0' | ')' => 11,
            '-' | '_' => 12,
            '=' | '+' => 13,
            '[' | '{' => 26,
            ']' | '}' => 27,
            ';' | ':' => 39,
            '\'' | '"' => 40,
            '`' | '~' => 41,
            '\\' | '|' => 43,
            ',' | '<' => 51,
            '.' | '>' => 52,
            '/' | '?' => 53,
            ' ' => 57,
            _ => return None,
        };
        Some(ScanCode(code))
    }
}

impl From<ScanCode> for u32 {
    fn from(code: ScanCode) -> Self {
        code.0
    }
}

impl fmt::Display for ScanCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for ScanCode {
    type Err = String;

    /// Accepts either a key name or a raw numeric code
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if let Ok(raw) = trimmed.parse::<u32>() {
            let code = ScanCode::from_raw(raw);
            if code.is_none() && raw != 0 {
                return Err(format!("Unknown scan code: {}", raw));
            }
            return Ok(code);
        }
        ScanCode::from_name(trimmed).ok_or_else(|| format!("Unknown key: {}", s))
    }
}

/// Display name for a scan code, `"Unknown"` for anything out of range
pub fn scan_code_name(code: ScanCode) -> &'static str {
    if let Some((_, name)) = UNIVERSAL_NAMES.iter().find(|(c, _)| *c == code.0) {
        return name;
    }
    names_by_code()
        .get(code.0 as usize)
        .copied()
        .flatten()
        .unwrap_or("Unknown")
}

fn names_by_code() -> &'static [Option<&'static str>] {
    static NAMES: OnceLock<Vec<Option<&'static str>>> = OnceLock::new();
    NAMES.get_or_init(|| {
        let mut names = vec![None; 0x300];
        for &(code, name) in KEY_NAMES {
            names[code as usize] = Some(name);
        }
        names
    })
}

fn normalize_name(name: &str) -> String {
    name.chars()
        .filter(|c| !c.is_whitespace() && *c != '_')
        .map(|c| c.to_ascii_uppercase())
        .collect()
}

const UNIVERSAL_NAMES: &[(u32, &str)] = &[(0x1001, "Ctrl"), (0x1002, "Alt"), (0x1003, "Shift")];

// Accepted by from_name only, never displayed
const NAME_ALIASES: &[(u32, &str)] = &[
    (1, "Esc"),
    (28, "Return"),
    (29, "LCtrl"),
    (97, "RCtrl"),
    (56, "LAlt"),
    (100, "RAlt"),
    (42, "LShift"),
    (54, "RShift"),
    (0x1001, "Control"),
    (99, "PrtScr"),
];

const KEY_NAMES: &[(u32, &str)] = &[
    (1, "Escape"),
    (2, "1"),
    (3, "2"),
    (4, "3"),
    (5, "4"),
    (6, "5"),
    (7, "6"),
    (8, "7"),
    (9, "8"),
    (10, "9"),
    (11, "0"),
    (12, "Minus"),
    (13, "Equals"),
    (14, "Backspace"),
    (15, "Tab"),
    (16, "Q"),
    (17, "W"),
    (18, "E"),
    (19, "R"),
    (20, "T"),
    (21, "Y"),
    (22, "U"),
    (23, "I"),
    (24, "O"),
    (25, "P"),
    (26, "Left Bracket"),
    (27, "Right Bracket"),
    (28, "Enter"),
    (29, "Left Ctrl"),
    (30, "A"),
    (31, "S"),
    (32, "D"),
    (33, "F"),
    (34, "G"),
    (35, "H"),
    (36, "J"),
    (37, "K"),
    (38, "L"),
    (39, "Semicolon"),
    (40, "Apostrophe"),
    (41, "Grave"),
    (42, "Left Shift"),
    (43, "Backslash"),
    (44, "Z"),
    (45, "X"),
    (46, "C"),
    (47, "V"),
    (48, "B"),
    (49, "N"),
    (50, "M"),
    (51, "Comma"),
    (52, "Period"),
    (53, "Slash"),
    (54, "Right Shift"),
    (55, "Numpad *"),
    (56, "Left Alt"),
    (57, "Space"),
    (58, "Caps Lock"),
    (59, "F1"),
    (60, "F2"),
    (61, "F3"),
    (62, "F4"),
    (63, "F5"),
    (64, "F6"),
    (65, "F7"),
    (66, "F8"),
    (67, "F9"),
    (68, "F10"),
    (69, "Num Lock"),
    (70, "Scroll Lock"),
    (71, "Numpad 7"),
    (72, "Numpad 8"),
    (73, "Numpad 9"),
    (74, "Numpad -"),
    (75, "Numpad 4"),
    (76, "Numpad 5"),
    (77, "Numpad 6"),
    (78, "Numpad +"),
    (79, "Numpad 1"),
    (80, "Numpad 2"),
    (81, "Numpad 3"),
    (82, "Numpad 0"),
    (83, "Numpad ."),
    (86, "102nd"),
    (87, "F11"),
    (88, "F12"),
    (96, "Numpad Enter"),
    (97, "Right Ctrl"),
    (98, "Numpad /"),
    (99, "Print Screen"),
    (100, "Right Alt"),
    (102, "Home"),
    (103, "Up"),
    (104, "Page Up"),
    (105, "Left"),
    (106, "Right"),
    (107, "End"),
    (108, "Down"),
    (109, "Page Down"),
    (110, "Insert"),
    (111, "Delete"),
    (113, "Mute"),
    (114, "Volume Down"),
    (115, "Volume Up"),
    (119, "Pause"),
    (125, "Left Meta"),
    (126, "Right Meta"),
    (127, "Menu"),
    (163, "Next Track"),
    (164, "Play/Pause"),
    (165, "Previous Track"),
    (166, "Stop"),
    (183, "F13"),
    (184, "F14"),
    (185, "F15"),
    (186, "F16"),
    (187, "F17"),
    (188, "F18"),
    (189, "F19"),
    (190, "F20"),
    (191, "F21"),
    (192, "F22"),
    (193, "F23"),
    (194, "F24"),
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scan_code_name() {
        assert_eq!(ScanCode::K.name(), "K");
        assert_eq!(ScanCode::LEFT_CTRL.name(), "Left Ctrl");
        assert_eq!(ScanCode::CTRL.name(), "Ctrl");
        assert_eq!(ScanCode::PAGE_DOWN.to_string(), "Page Down");
    }

    #[test]
    fn test_unknown_codes_resolve_to_none() {
        assert_eq!(ScanCode::from_raw(84), ScanCode::NONE);
        assert_eq!(ScanCode::from_raw(0xFFFF), ScanCode::NONE);
        assert_eq!(ScanCode::from_raw(37), ScanCode::K);
        assert_eq!(ScanCode::from_raw(0x1002), ScanCode::ALT);
        assert_eq!(scan_code_name(ScanCode(0xBEEF)), "Unknown");
        assert_eq!(scan_code_name(ScanCode::NONE), "Unknown");
    }

    #[test]
    fn test_make_universal() {
        assert_eq!(ScanCode::LEFT_CTRL.make_universal(), ScanCode::CTRL);
        assert_eq!(ScanCode::RIGHT_CTRL.make_universal(), ScanCode::CTRL);
        assert_eq!(ScanCode::RIGHT_ALT.make_universal(), ScanCode::ALT);
        assert_eq!(ScanCode::LEFT_SHIFT.make_universal(), ScanCode::SHIFT);
        assert_eq!(ScanCode::SHIFT.make_universal(), ScanCode::SHIFT);
        assert_eq!(ScanCode::K.make_universal(), ScanCode::K);
    }

    #[test]
    fn test_from_name() {
        assert_eq!(ScanCode::from_name("k"), Some(ScanCode::K));
        assert_eq!(ScanCode::from_name("LEFT_CTRL"), Some(ScanCode::LEFT_CTRL));
        assert_eq!(ScanCode::from_name("page up"), Some(ScanCode::PAGE_UP));
        assert_eq!(ScanCode::from_name("Esc"), Some(ScanCode::ESCAPE));
        assert_eq!(ScanCode::from_name("shift"), Some(ScanCode::SHIFT));
        assert_eq!(ScanCode::from_name("NotAKey"), None);
        assert_eq!(ScanCode::from_name(""), None);
    }

    #[test]
    fn test_from_str_accepts_numbers_and_names() {
        assert_eq!("37".parse::<ScanCode>(), Ok(ScanCode::K));
        assert_eq!("M".parse::<ScanCode>(), Ok(ScanCode::M));
        assert_eq!("0".parse::<ScanCode>(), Ok(ScanCode::NONE));
        assert!("84".parse::<ScanCode>().is_err());
        assert!("bogus".parse::<ScanCode>().is_err());
    }

    #[test]
    fn test_from_char() {
        assert_eq!(ScanCode::from_char('k'), Some(ScanCode::K));
        assert_eq!(ScanCode::from_char('K'), Some(ScanCode::K));
        assert_eq!(ScanCode::from_char(' '), Some(ScanCode::SPACE));
        assert_eq!(ScanCode::from_char('1'), Some(ScanCode::DIGIT_1));
        assert_eq!(ScanCode::from_char('é'), None);
    }
}
