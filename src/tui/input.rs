// Keymenu TUI - Key Translation
// crossterm key events to scan-code transitions

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers, ModifierKeyCode};
use keymenu_core::{EventKey, ScanCode};
use smallvec::SmallVec;

/// Transitions produced by one terminal key event
pub type Transitions = SmallVec<[EventKey; 8]>;

/// Converts terminal key events into press/release transitions.
///
/// Terminals with keyboard enhancement report releases and bare modifier
/// keys. Others only report presses with a modifier mask, so the translator
/// synthesizes the held modifiers and an immediate release around each key.
#[derive(Debug, Clone, Copy)]
pub struct KeyTranslator {
    reports_releases: bool,
}

impl KeyTranslator {
    pub fn new(reports_releases: bool) -> Self {
        Self { reports_releases }
    }

    pub fn reports_releases(&self) -> bool {
        self.reports_releases
    }

    pub fn translate(&self, event: &KeyEvent) -> Transitions {
        let code = scan_code_for(event.code);
        let mut out = Transitions::new();
        if code.is_none() {
            return out;
        }

        if self.reports_releases {
            out.push(EventKey {
                code,
                down: event.kind != KeyEventKind::Release,
            });
            return out;
        }

        if event.kind == KeyEventKind::Release {
            return out;
        }
        let modifiers = held_modifier_codes(event);
        out.extend(modifiers.iter().copied().map(EventKey::press));
        out.push(EventKey::press(code));
        out.push(EventKey::release(code));
        out.extend(modifiers.iter().rev().copied().map(EventKey::release));
        out
    }
}

fn held_modifier_codes(event: &KeyEvent) -> SmallVec<[ScanCode; 3]> {
    let mut codes = SmallVec::new();
    if event.modifiers.contains(KeyModifiers::CONTROL) {
        codes.push(ScanCode::LEFT_CTRL);
    }
    if event.modifiers.contains(KeyModifiers::ALT) {
        codes.push(ScanCode::LEFT_ALT);
    }
    let implied_shift = match event.code {
        KeyCode::BackTab => true,
        KeyCode::Char(c) => c.is_ascii_uppercase(),
        _ => false,
    };
    if event.modifiers.contains(KeyModifiers::SHIFT) || implied_shift {
        codes.push(ScanCode::LEFT_SHIFT);
    }
    codes
}

/// Scan code for a terminal key; keys without one map to `NONE`
pub fn scan_code_for(code: KeyCode) -> ScanCode {
    match code {
        KeyCode::Char(c) => ScanCode::from_char(c).unwrap_or(ScanCode::NONE),
        KeyCode::Enter => ScanCode::ENTER,
        KeyCode::Esc => ScanCode::ESCAPE,
        KeyCode::Tab | KeyCode::BackTab => ScanCode::TAB,
        KeyCode::Backspace => ScanCode::BACKSPACE,
        KeyCode::Up => ScanCode::UP,
        KeyCode::Down => ScanCode::DOWN,
        KeyCode::Left => ScanCode::LEFT,
        KeyCode::Right => ScanCode::RIGHT,
        KeyCode::Home => ScanCode::HOME,
        KeyCode::End => ScanCode::END,
        KeyCode::PageUp => ScanCode::PAGE_UP,
        KeyCode::PageDown => ScanCode::PAGE_DOWN,
        KeyCode::Insert => ScanCode::INSERT,
        KeyCode::Delete => ScanCode::DELETE,
        KeyCode::CapsLock => ScanCode::CAPS_LOCK,
        KeyCode::F(n) => function_key(n),
        KeyCode::Modifier(modifier) => match modifier {
            ModifierKeyCode::LeftControl => ScanCode::LEFT_CTRL,
            ModifierKeyCode::RightControl => ScanCode::RIGHT_CTRL,
            ModifierKeyCode::LeftAlt => ScanCode::LEFT_ALT,
            ModifierKeyCode::RightAlt => ScanCode::RIGHT_ALT,
            ModifierKeyCode::LeftShift => ScanCode::LEFT_SHIFT,
            ModifierKeyCode::RightShift => ScanCode::RIGHT_SHIFT,
            _ => ScanCode::NONE,
        },
        _ => ScanCode::NONE,
    }
}

fn function_key(n: u8) -> ScanCode {
    let raw = match n {
        1..=10 => 58 + u32::from(n),
        11 => 87,
        12 => 88,
        13..=24 => 170 + u32::from(n),
        _ => return ScanCode::NONE,
    };
    ScanCode::from_raw(raw)
}
