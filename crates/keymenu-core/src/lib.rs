// Keymenu Core Library
// Keybind data model, persistence and matching

pub mod config;
pub mod input;
pub mod keybind;
pub mod keyset;
pub mod modifier;
pub mod scan_code;
pub mod virtual_key;

pub use config::{
    encode_current, parse_current, parse_legacy, ConfigError, ConfigStore, FormatError,
    PassThroughKeys, Section, SharedConfig,
};
pub use input::{EventKey, InputDispatcher, InputListener, InputResponse, SharedListener};
pub use keybind::{
    ActivationKeybind, Keybind, KeybindContext, KeybindError, KeybindInfo, KeybindRegistry,
};
pub use keyset::{Keyset, ScanCodeSet};
pub use modifier::{is_modifier, to_modifier, Modifier, ModifierFamily};
pub use scan_code::{scan_code_name, ScanCode};
pub use virtual_key::virtual_key_to_scan_code;
