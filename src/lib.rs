// Keymenu
// Settings overlay and terminal host built on keymenu-core

pub mod menu;
pub mod tui;

pub use menu::{Implementer, KeybindsTab, MenuState, SettingsMenu, TabId};
