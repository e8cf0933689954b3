// Keymenu Config Store
// TOML-backed storage for persisted keybinds and menu pass-through keys

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use parking_lot::Mutex;
use serde::{Deserialize, Serialize};

use crate::ScanCode;

/// Config store shared between every keybind that writes through
pub type SharedConfig = Arc<Mutex<ConfigStore>>;

/// Errors that can occur when loading or saving the config file
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(String),

    #[error("TOML serialize error: {0}")]
    TomlSerialize(String),
}

/// Keybind sections of the config file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    /// `[Keybinds]`, virtual-key lists, read-only
    Legacy,
    /// `["Keybinds.2"]`, `"<scanCode>, <modifierMask>"`
    Current,
}

impl Section {
    pub fn name(self) -> &'static str {
        match self {
            Section::Legacy => "Keybinds",
            Section::Current => "Keybinds.2",
        }
    }
}

/// Scan codes the settings menu lets through while it has focus
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PassThroughKeys {
    pub allow_through_alt: ScanCode,
    pub allow_through_shift: ScanCode,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct ConfigDoc {
    #[serde(rename = "Keybinds", default, skip_serializing_if = "BTreeMap::is_empty")]
    legacy: BTreeMap<String, String>,

    #[serde(rename = "Keybinds.2", default, skip_serializing_if = "BTreeMap::is_empty")]
    current: BTreeMap<String, String>,

    #[serde(rename = "Menu", default, skip_serializing_if = "Option::is_none")]
    menu: Option<MenuSection>,

    /// Sections this crate does not own, written back untouched
    #[serde(flatten)]
    other: BTreeMap<String, toml::Value>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct MenuSection {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    allow_through_alt: Option<toml::Value>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    allow_through_shift: Option<toml::Value>,
}

/// The persisted configuration file
#[derive(Debug, Clone, Default)]
pub struct ConfigStore {
    doc: ConfigDoc,
    /// Where `save` writes; `None` keeps the store in memory only
    path: Option<PathBuf>,
}

impl ConfigStore {
    /// Create an empty store that never touches disk
    pub fn in_memory() -> Self {
        Self::default()
    }

    /// Load from TOML text without a backing file
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let doc: ConfigDoc =
            toml::from_str(content).map_err(|e| ConfigError::TomlParse(e.to_string()))?;
        Ok(Self { doc, path: None })
    }

    /// Load from a file; a missing file yields an empty store bound to `path`
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let mut store = if path.exists() {
            let content = fs::read_to_string(path)?;
            Self::from_toml(&content)?
        } else {
            log::debug!("config file {} not found, starting empty", path.display());
            Self::in_memory()
        };
        store.path = Some(path.to_path_buf());
        Ok(store)
    }

    /// Default location (~/.config/keymenu/config.toml)
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("keymenu").join("config.toml"))
    }

    /// Wrap the store for sharing between keybinds
    pub fn into_shared(self) -> SharedConfig {
        Arc::new(Mutex::new(self))
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Bind the store to a file; the next `save` writes there
    pub fn set_path<P: AsRef<Path>>(&mut self, path: P) {
        self.path = Some(path.as_ref().to_path_buf());
    }

    /// Read a keybind value
    pub fn get(&self, section: Section, nickname: &str) -> Option<&str> {
        let table = match section {
            Section::Legacy => &self.doc.legacy,
            Section::Current => &self.doc.current,
        };
        table.get(nickname).map(String::as_str)
    }

    /// Store a current-format value. The legacy section is never written.
    pub fn set_current(&mut self, nickname: &str, value: &str) {
        self.doc
            .current
            .insert(nickname.to_string(), value.to_string());
    }

    /// Pass-through keys from the `[Menu]` section; invalid entries become `NONE`
    pub fn pass_through_keys(&self) -> PassThroughKeys {
        let Some(menu) = &self.doc.menu else {
            return PassThroughKeys::default();
        };
        PassThroughKeys {
            allow_through_alt: scan_code_setting("allow_through_alt", &menu.allow_through_alt),
            allow_through_shift: scan_code_setting("allow_through_shift", &menu.allow_through_shift),
        }
    }

    /// Render the whole document
    pub fn to_toml_string(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(&self.doc).map_err(|e| ConfigError::TomlSerialize(e.to_string()))
    }

    /// Write the whole document to disk atomically.
    ///
    /// In-memory stores succeed without writing anything.
    pub fn save(&self) -> Result<(), ConfigError> {
        let Some(path) = &self.path else {
            return Ok(());
        };
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let rendered = self.to_toml_string()?;
        let temp = path.with_extension("toml.tmp");
        fs::write(&temp, rendered)?;
        fs::rename(&temp, path)?;
        log::debug!("saved config to {}", path.display());
        Ok(())
    }
}

fn scan_code_setting(name: &str, value: &Option<toml::Value>) -> ScanCode {
    let parsed = match value {
        None => return ScanCode::NONE,
        Some(toml::Value::String(s)) => s.parse::<ScanCode>().ok(),
        Some(toml::Value::Integer(i)) => u32::try_from(*i).ok().map(ScanCode::from_raw),
        Some(_) => None,
    };
    parsed.unwrap_or_else(|| {
        log::warn!("ignoring invalid Menu.{} value {:?}", name, value);
        ScanCode::NONE
    })
}
