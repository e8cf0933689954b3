// Keymenu Legacy Virtual Keys
// Translation of Windows virtual-key codes found in the legacy [Keybinds] section

use crate::ScanCode;

/// Translate a Windows virtual-key code to a scan code.
///
/// The generic `VK_CONTROL`, `VK_MENU` and `VK_SHIFT` codes map to the
/// universal modifier codes; the sided variants map to the physical keys.
/// Anything without a physical equivalent maps to `ScanCode::NONE`.
pub fn virtual_key_to_scan_code(vk: u32) -> ScanCode {
    let raw = match vk {
        // Letters and digits share their ASCII values
        0x41..=0x5A => {
            return char::from_u32(vk)
                .and_then(ScanCode::from_char)
                .unwrap_or(ScanCode::NONE)
        }
        0x30..=0x39 => {
            return char::from_u32(vk)
                .and_then(ScanCode::from_char)
                .unwrap_or(ScanCode::NONE)
        }
        // F1-F10 are contiguous in both numberings
        0x70..=0x79 => 59 + (vk - 0x70),
        0x7A => 87,
        0x7B => 88,
        0x7C..=0x87 => 183 + (vk - 0x7C),
        // Numpad 0-9
        0x60 => 82,
        0x61 => 79,
        0x62 => 80,
        0x63 => 81,
        0x64 => 75,
        0x65 => 76,
        0x66 => 77,
        0x67 => 71,
        0x68 => 72,
        0x69 => 73,
        0x6A => 55,
        0x6B => 78,
        0x6D => 74,
        0x6E => 83,
        0x6F => 98,
        0x08 => 14,
        0x09 => 15,
        0x0D => 28,
        0x10 => return ScanCode::SHIFT,
        0x11 => return ScanCode::CTRL,
        0x12 => return ScanCode::ALT,
        0x13 => 119,
        0x14 => 58,
        0x1B => 1,
        0x20 => 57,
        0x21 => 104,
        0x22 => 109,
        0x23 => 107,
        0x24 => 102,
        0x25 => 105,
        0x26 => 103,
        0x27 => 106,
        0x28 => 108,
        0x2C => 99,
        0x2D => 110,
        0x2E => 111,
        0x5B => 125,
        0x5C => 126,
        0x5D => 127,
        0x90 => 69,
        0x91 => 70,
        0xA0 => 42,
        0xA1 => 54,
        0xA2 => 29,
        0xA3 => 97,
        0xA4 => 56,
        0xA5 => 100,
        0xAD => 113,
        0xAE => 114,
        0xAF => 115,
        0xB0 => 163,
        0xB1 => 165,
        0xB2 => 166,
        0xB3 => 164,
        0xBA => 39,
        0xBB => 13,
        0xBC => 51,
        0xBD => 12,
        0xBE => 52,
        0xBF => 53,
        0xC0 => 41,
        0xDB => 26,
        0xDC => 43,
        0xDD => 27,
        0xDE => 40,
        0xE2 => 86,
        _ => return ScanCode::NONE,
    };
    ScanCode::from_raw(raw)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_letters_and_digits() {
        assert_eq!(virtual_key_to_scan_code(0x4B), ScanCode::K); // 'K'
        assert_eq!(virtual_key_to_scan_code(0x41), ScanCode::A);
        assert_eq!(virtual_key_to_scan_code(0x31), ScanCode::DIGIT_1);
        assert_eq!(virtual_key_to_scan_code(0x30), ScanCode::DIGIT_0);
    }

    #[test]
    fn test_modifiers() {
        assert_eq!(virtual_key_to_scan_code(0x11), ScanCode::CTRL);
        assert_eq!(virtual_key_to_scan_code(0x10), ScanCode::SHIFT);
        assert_eq!(virtual_key_to_scan_code(0x12), ScanCode::ALT);
        assert_eq!(virtual_key_to_scan_code(0xA2), ScanCode::LEFT_CTRL);
        assert_eq!(virtual_key_to_scan_code(0xA5), ScanCode::RIGHT_ALT);
    }

    #[test]
    fn test_function_keys() {
        assert_eq!(virtual_key_to_scan_code(0x70), ScanCode::F1);
        assert_eq!(virtual_key_to_scan_code(0x79), ScanCode::F10);
        assert_eq!(virtual_key_to_scan_code(0x7A), ScanCode::F11);
        assert_eq!(virtual_key_to_scan_code(0x7B), ScanCode::F12);
        assert_eq!(virtual_key_to_scan_code(0x7C).name(), "F13");
    }

    #[test]
    fn test_unmapped_codes() {
        assert_eq!(virtual_key_to_scan_code(0x01), ScanCode::NONE); // mouse button
        assert_eq!(virtual_key_to_scan_code(0xFFFF), ScanCode::NONE);
    }
}
