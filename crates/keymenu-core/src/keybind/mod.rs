// Keymenu Keybind
// Named, persistable chord bindings with write-through to the config store

mod activation;
mod registry;

use std::sync::Arc;

use parking_lot::RwLock;

use crate::config::{
    encode_current, parse_current, parse_legacy, ConfigError, ConfigStore, FormatError, Section,
    SharedConfig,
};
use crate::{Keyset, Modifier, ScanCode};

pub use activation::ActivationKeybind;
pub use registry::{KeybindInfo, KeybindRegistry};

/// Errors that can occur when creating or changing a keybind
#[derive(Debug, thiserror::Error)]
pub enum KeybindError {
    #[error("keybind nickname '{0}' is already registered")]
    DuplicateNickname(String),

    #[error("malformed keybind value: {0}")]
    Format(#[from] FormatError),

    #[error("failed to persist keybind: {0}")]
    Config(#[from] ConfigError),
}

/// Everything a keybind needs from the application: where to persist and
/// where to register for bulk operations.
#[derive(Debug, Clone)]
pub struct KeybindContext {
    pub config: SharedConfig,
    pub registry: KeybindRegistry,
}

impl KeybindContext {
    pub fn new(config: SharedConfig) -> Self {
        Self {
            config,
            registry: KeybindRegistry::new(),
        }
    }

    /// Context backed by a store that never touches disk
    pub fn in_memory() -> Self {
        Self::new(ConfigStore::in_memory().into_shared())
    }
}

#[derive(Debug)]
struct KeybindState {
    keyset: Keyset,
    is_being_modified: bool,
    display_string: String,
    save_to_config: bool,
}

/// Shared part of a keybind, reachable weakly from the registry
#[derive(Debug)]
pub(crate) struct KeybindEntry {
    nickname: String,
    display_name: String,
    category: String,
    config: SharedConfig,
    state: RwLock<KeybindState>,
}

impl KeybindEntry {
    fn keyset(&self) -> Keyset {
        self.state.read().keyset
    }

    fn is_being_modified(&self) -> bool {
        self.state.read().is_being_modified
    }

    fn set_being_modified(&self, value: bool) {
        self.state.write().is_being_modified = value;
    }

    /// Replace the chord, refresh the label and write through when enabled
    fn apply(&self, keyset: Keyset) -> Result<(), ConfigError> {
        let save = {
            let mut state = self.state.write();
            state.keyset = keyset;
            state.display_string = keyset.to_string();
            state.save_to_config
        };
        log::debug!("keybind '{}' set to '{}'", self.nickname, keyset);

        if save && !keyset.is_none() {
            self.persist(keyset)?;
        }
        Ok(())
    }

    fn persist(&self, keyset: Keyset) -> Result<(), ConfigError> {
        let Some(value) = encode_current(keyset) else {
            return Ok(());
        };
        let mut config = self.config.lock();
        config.set_current(&self.nickname, &value);
        config.save()
    }

    fn update_display_string(&self) {
        let mut state = self.state.write();
        state.display_string = state.keyset.to_string();
    }

    fn info(&self) -> KeybindInfo {
        let state = self.state.read();
        KeybindInfo {
            nickname: self.nickname.clone(),
            display_name: self.display_name.clone(),
            category: self.category.clone(),
            keyset: state.keyset,
            display_string: state.display_string.clone(),
            is_being_modified: state.is_being_modified,
        }
    }
}

/// A named chord binding.
///
/// The keybind is owned by the module that declares it and stays registered
/// with its [`KeybindRegistry`] until dropped.
#[derive(Debug)]
pub struct Keybind {
    entry: Arc<KeybindEntry>,
    registry: KeybindRegistry,
}

impl Keybind {
    /// Create a keybind with an explicit chord.
    ///
    /// With `save_to_config` the chord is written to the config store right
    /// away. A failed write is logged; the keybind is still created.
    pub fn new(
        ctx: &KeybindContext,
        nickname: impl Into<String>,
        display_name: impl Into<String>,
        category: impl Into<String>,
        keyset: Keyset,
        save_to_config: bool,
    ) -> Result<Self, KeybindError> {
        let keybind = Self::register(ctx, nickname.into(), display_name.into(), category.into(), save_to_config)?;
        if let Err(e) = keybind.entry.apply(keyset) {
            log::warn!("could not persist keybind '{}': {}", keybind.nickname(), e);
        }
        Ok(keybind)
    }

    /// Create a keybind from its persisted value.
    ///
    /// The current section is read first, then the legacy section. A
    /// malformed value is logged and leaves the keybind unset. Nothing is
    /// written back until the chord next changes.
    pub fn load(
        ctx: &KeybindContext,
        nickname: impl Into<String>,
        display_name: impl Into<String>,
        category: impl Into<String>,
    ) -> Result<Self, KeybindError> {
        Self::load_or(ctx, nickname, display_name, category, Keyset::NONE)
    }

    /// Like [`Keybind::load`], falling back to `default` when nothing is stored
    pub fn load_or(
        ctx: &KeybindContext,
        nickname: impl Into<String>,
        display_name: impl Into<String>,
        category: impl Into<String>,
        default: Keyset,
    ) -> Result<Self, KeybindError> {
        let keybind = Self::register(ctx, nickname.into(), display_name.into(), category.into(), true)?;

        let stored = {
            let config = ctx.config.lock();
            match config.get(Section::Current, keybind.nickname()) {
                Some(value) => Some(parse_current(value)),
                None => config
                    .get(Section::Legacy, keybind.nickname())
                    .map(parse_legacy),
            }
        };

        let keyset = match stored {
            Some(Ok(keyset)) => keyset,
            Some(Err(e)) => {
                log::warn!("ignoring stored value for keybind '{}': {}", keybind.nickname(), e);
                Keyset::NONE
            }
            None => default,
        };

        {
            let mut state = keybind.entry.state.write();
            state.keyset = keyset;
            state.display_string = keyset.to_string();
        }
        Ok(keybind)
    }

    fn register(
        ctx: &KeybindContext,
        nickname: String,
        display_name: String,
        category: String,
        save_to_config: bool,
    ) -> Result<Self, KeybindError> {
        let entry = Arc::new(KeybindEntry {
            nickname,
            display_name,
            category,
            config: ctx.config.clone(),
            state: RwLock::new(KeybindState {
                keyset: Keyset::NONE,
                is_being_modified: false,
                display_string: String::new(),
                save_to_config,
            }),
        });
        ctx.registry.register(&entry)?;
        Ok(Self {
            entry,
            registry: ctx.registry.clone(),
        })
    }

    pub fn nickname(&self) -> &str {
        &self.entry.nickname
    }

    pub fn display_name(&self) -> &str {
        &self.entry.display_name
    }

    pub fn category(&self) -> &str {
        &self.entry.category
    }

    pub fn key(&self) -> ScanCode {
        self.entry.keyset().key
    }

    pub fn modifier(&self) -> Modifier {
        self.entry.keyset().modifier
    }

    pub fn keyset(&self) -> Keyset {
        self.entry.keyset()
    }

    /// Cached label such as `"CTRL + SHIFT + K"`, empty when unset
    pub fn display_string(&self) -> String {
        self.entry.state.read().display_string.clone()
    }

    pub fn save_to_config(&self) -> bool {
        self.entry.state.read().save_to_config
    }

    pub fn set_save_to_config(&self, save: bool) {
        self.entry.state.write().save_to_config = save;
    }

    pub fn is_being_modified(&self) -> bool {
        self.entry.is_being_modified()
    }

    pub fn set_key(&self, key: ScanCode) -> Result<(), KeybindError> {
        let keyset = Keyset::new(key, self.modifier());
        self.set_keyset(keyset)
    }

    pub fn set_modifier(&self, modifier: Modifier) -> Result<(), KeybindError> {
        let keyset = Keyset::new(self.key(), modifier);
        self.set_keyset(keyset)
    }

    /// Replace the chord. The label is always refreshed; a failed save is
    /// returned after the in-memory chord has already changed.
    pub fn set_keyset(&self, keyset: Keyset) -> Result<(), KeybindError> {
        self.entry.apply(keyset).map_err(|e| {
            log::warn!("could not persist keybind '{}': {}", self.nickname(), e);
            KeybindError::from(e)
        })
    }

    /// Start an interactive rebind
    pub fn begin_capture(&self) {
        self.entry.set_being_modified(true);
    }

    /// Abort an interactive rebind, keeping the previous chord
    pub fn cancel_capture(&self) {
        self.entry.set_being_modified(false);
    }

    /// Finish an interactive rebind with the captured chord
    pub fn finish_capture(&self, keyset: Keyset) -> Result<(), KeybindError> {
        self.entry.set_being_modified(false);
        self.set_keyset(keyset)
    }

    /// Apply a legacy virtual-key list captured during an interactive rebind.
    ///
    /// Does nothing unless a rebind is in progress. An empty list clears the
    /// binding.
    pub fn parse_keys(&self, keys: &str) -> Result<(), KeybindError> {
        if !self.is_being_modified() {
            return Ok(());
        }
        let keyset = parse_legacy(keys)?;
        self.set_keyset(keyset)
    }

    /// Apply a current-format value without writing it back
    pub fn parse_config(&self, value: &str) -> Result<(), KeybindError> {
        let keyset = parse_current(value)?;
        let mut state = self.entry.state.write();
        state.keyset = keyset;
        state.display_string = keyset.to_string();
        Ok(())
    }

    /// Exact match on key and modifier
    pub fn matches(&self, keyset: &Keyset) -> bool {
        self.keyset() == *keyset
    }

    /// Match on key only, modifiers ignored
    pub fn matches_partial(&self, keyset: &Keyset) -> bool {
        self.key() == keyset.key
    }

    /// Match with left/right variants collapsed on both sides
    pub fn matches_no_left_right(&self, keyset: &Keyset) -> bool {
        self.keyset().make_universal() == keyset.make_universal()
    }

    pub fn update_display_string(&self) {
        self.entry.update_display_string();
    }

    pub fn info(&self) -> KeybindInfo {
        self.entry.info()
    }
}

impl Drop for Keybind {
    fn drop(&mut self) {
        self.registry.unregister(&self.entry);
    }
}
