// Keymenu Config
// Persisted keybind storage and the value formats it holds

pub mod format;
pub mod store;

pub use format::{encode_current, parse_current, parse_legacy, FormatError};
pub use store::{ConfigError, ConfigStore, PassThroughKeys, Section, SharedConfig};
