// Keymenu Keybind Registry
// Non-owning index of every live keybind for bulk refresh and the rebind UI

use std::sync::{Arc, Weak};

use parking_lot::Mutex;

use super::{KeybindEntry, KeybindError};
use crate::Keyset;

/// Point-in-time view of one registered keybind
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeybindInfo {
    pub nickname: String,
    pub display_name: String,
    pub category: String,
    pub keyset: Keyset,
    pub display_string: String,
    pub is_being_modified: bool,
}

/// Registry of live keybinds.
///
/// Holds weak references only; the declaring module owns each keybind and
/// dropping it removes the entry. Cloning shares the same registry.
#[derive(Debug, Clone, Default)]
pub struct KeybindRegistry {
    entries: Arc<Mutex<Vec<Weak<KeybindEntry>>>>,
}

impl KeybindRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn register(&self, entry: &Arc<KeybindEntry>) -> Result<(), KeybindError> {
        let mut entries = self.entries.lock();
        entries.retain(|weak| weak.strong_count() > 0);

        let taken = entries
            .iter()
            .filter_map(Weak::upgrade)
            .any(|live| live.nickname == entry.nickname);
        if taken {
            return Err(KeybindError::DuplicateNickname(entry.nickname.clone()));
        }

        entries.push(Arc::downgrade(entry));
        log::trace!("registered keybind '{}'", entry.nickname);
        Ok(())
    }

    pub(crate) fn unregister(&self, entry: &Arc<KeybindEntry>) {
        let target = Arc::as_ptr(entry);
        self.entries
            .lock()
            .retain(|weak| weak.strong_count() > 0 && Weak::as_ptr(weak) != target);
    }

    /// Strong handles to every live entry. The registry lock is released
    /// before the caller touches any keybind.
    fn live(&self) -> Vec<Arc<KeybindEntry>> {
        self.entries.lock().iter().filter_map(Weak::upgrade).collect()
    }

    fn entry(&self, nickname: &str) -> Option<Arc<KeybindEntry>> {
        self.live().into_iter().find(|entry| entry.nickname == nickname)
    }

    fn capturing_entry(&self) -> Option<Arc<KeybindEntry>> {
        self.live().into_iter().find(|entry| entry.is_being_modified())
    }

    /// Number of live keybinds
    pub fn len(&self) -> usize {
        self.entries
            .lock()
            .iter()
            .filter(|weak| weak.strong_count() > 0)
            .count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn contains(&self, nickname: &str) -> bool {
        self.entry(nickname).is_some()
    }

    /// Current state of the live keybind with this nickname
    pub fn find(&self, nickname: &str) -> Option<KeybindInfo> {
        self.entry(nickname).map(|entry| entry.info())
    }

    /// Recompute the display string of every live keybind
    pub fn refresh_display_strings(&self) {
        let live = self.live();
        for entry in &live {
            entry.update_display_string();
        }
        log::debug!("refreshed {} keybind labels", live.len());
    }

    /// Registration-ordered view of every live keybind
    pub fn snapshot(&self) -> Vec<KeybindInfo> {
        self.live().iter().map(|entry| entry.info()).collect()
    }

    /// Nickname of the keybind currently being rebound, if any
    pub fn capturing(&self) -> Option<String> {
        self.capturing_entry().map(|entry| entry.nickname.clone())
    }

    /// Start rebinding `nickname`, cancelling any other rebind in progress.
    ///
    /// Returns false when no live keybind has that nickname.
    pub fn begin_capture(&self, nickname: &str) -> bool {
        let live = self.live();
        if !live.iter().any(|entry| entry.nickname == nickname) {
            return false;
        }
        for entry in &live {
            entry.set_being_modified(entry.nickname == nickname);
        }
        log::debug!("capturing keybind '{}'", nickname);
        true
    }

    /// Abort the rebind in progress, if any
    pub fn cancel_capture(&self) {
        if let Some(entry) = self.capturing_entry() {
            entry.set_being_modified(false);
            log::debug!("capture of keybind '{}' cancelled", entry.nickname);
        }
    }

    /// Apply `keyset` to the keybind being rebound.
    ///
    /// Returns the nickname that changed, or `None` when nothing was being
    /// captured. The chord is applied even if persisting it fails.
    pub fn finish_capture(&self, keyset: Keyset) -> Result<Option<String>, KeybindError> {
        let Some(entry) = self.capturing_entry() else {
            return Ok(None);
        };
        entry.set_being_modified(false);
        entry.apply(keyset).map_err(|e| {
            log::warn!("could not persist keybind '{}': {}", entry.nickname, e);
            KeybindError::from(e)
        })?;
        Ok(Some(entry.nickname.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keybind::{Keybind, KeybindContext};
    use crate::{Modifier, ScanCode};

    fn bind(ctx: &KeybindContext, nick: &str, key: ScanCode) -> Keybind {
        Keybind::new(ctx, nick, nick.to_uppercase(), "Test", Keyset::key_only(key), false).unwrap()
    }

    #[test]
    fn test_registration_follows_lifetime() {
        let ctx = KeybindContext::in_memory();
        let a = bind(&ctx, "a", ScanCode::A);
        let b = bind(&ctx, "b", ScanCode::B);
        assert_eq!(ctx.registry.len(), 2);
        assert!(ctx.registry.contains("a"));
        assert_eq!(ctx.registry.find("b").map(|i| i.display_name), Some("B".to_string()));

        drop(a);
        assert_eq!(ctx.registry.len(), 1);
        assert!(!ctx.registry.contains("a"));

        drop(b);
        assert!(ctx.registry.is_empty());
    }

    #[test]
    fn test_snapshot_in_registration_order() {
        let ctx = KeybindContext::in_memory();
        let _b = bind(&ctx, "b", ScanCode::B);
        let _a = bind(&ctx, "a", ScanCode::A);
        let names: Vec<String> = ctx.registry.snapshot().into_iter().map(|i| i.nickname).collect();
        assert_eq!(names, vec!["b", "a"]);
    }

    #[test]
    fn test_refresh_display_strings() {
        let ctx = KeybindContext::in_memory();
        let a = bind(&ctx, "a", ScanCode::A);
        ctx.registry.refresh_display_strings();
        assert_eq!(a.display_string(), "A");
        assert_eq!(ctx.registry.snapshot()[0].display_string, "A");
    }

    #[test]
    fn test_refresh_is_idempotent() {
        let ctx = KeybindContext::in_memory();
        let chords = [
            Keyset::new(ScanCode::K, Modifier::CTRL),
            Keyset::new(ScanCode::F5, Modifier::LALT | Modifier::RSHIFT),
            Keyset::new(ScanCode::M, Modifier::CTRL | Modifier::LSHIFT),
            Keyset::key_only(ScanCode::SHIFT),
            Keyset::NONE,
        ];
        let _binds: Vec<Keybind> = chords
            .iter()
            .enumerate()
            .map(|(i, chord)| {
                Keybind::new(&ctx, &format!("bind{}", i), "Bind", "Test", *chord, false).unwrap()
            })
            .collect();

        ctx.registry.refresh_display_strings();
        let first: Vec<String> = ctx.registry.snapshot().into_iter().map(|i| i.display_string).collect();
        ctx.registry.refresh_display_strings();
        let second: Vec<String> = ctx.registry.snapshot().into_iter().map(|i| i.display_string).collect();

        assert_eq!(first, second);
        assert_eq!(first[0], "CTRL + K");
        assert_eq!(first[1], "LALT + RSHIFT + F5");
        assert_eq!(first[2], "CTRL + LSHIFT + M");
        assert_eq!(first[4], "");
    }

    #[test]
    fn test_capture_through_registry() {
        let ctx = KeybindContext::in_memory();
        let a = bind(&ctx, "a", ScanCode::A);
        let b = bind(&ctx, "b", ScanCode::B);

        assert!(!ctx.registry.begin_capture("missing"));
        assert!(ctx.registry.begin_capture("a"));
        assert!(ctx.registry.begin_capture("b"));
        assert!(!a.is_being_modified());
        assert_eq!(ctx.registry.capturing().as_deref(), Some("b"));

        let changed = ctx
            .registry
            .finish_capture(Keyset::new(ScanCode::K, Modifier::LSHIFT))
            .unwrap();
        assert_eq!(changed.as_deref(), Some("b"));
        assert_eq!(b.display_string(), "LSHIFT + K");
        assert_eq!(ctx.registry.capturing(), None);
        assert_eq!(ctx.registry.finish_capture(Keyset::NONE).unwrap(), None);
    }

    #[test]
    fn test_cancel_capture_keeps_chord() {
        let ctx = KeybindContext::in_memory();
        let a = bind(&ctx, "a", ScanCode::A);
        ctx.registry.begin_capture("a");
        ctx.registry.cancel_capture();
        assert!(!a.is_being_modified());
        assert_eq!(a.keyset(), Keyset::key_only(ScanCode::A));
    }
}
