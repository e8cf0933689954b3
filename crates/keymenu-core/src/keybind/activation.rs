// Keymenu Activation Keybind
// Keybind that tracks whether its chord is currently held

use super::Keybind;
use crate::input::{EventKey, InputListener, InputResponse};
use crate::{Keyset, ScanCode, ScanCodeSet};

/// A keybind plus held/released state driven by the pressed-key set.
///
/// Modifiers are compared per family: a universal bit accepts either side,
/// sided bits must match exactly. A keybind that is being rebound never
/// activates.
#[derive(Debug)]
pub struct ActivationKeybind {
    keybind: Keybind,
    active: bool,
}

impl ActivationKeybind {
    pub fn new(keybind: Keybind) -> Self {
        Self {
            keybind,
            active: false,
        }
    }

    pub fn keybind(&self) -> &Keybind {
        &self.keybind
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Whether the bound chord is held in `pressed`
    pub fn is_held(&self, pressed: &ScanCodeSet) -> bool {
        let bound = self.keybind.keyset();
        if bound.is_none() || self.keybind.is_being_modified() {
            return false;
        }

        let Some(trigger) = find_trigger(bound.key, pressed) else {
            return false;
        };
        let held = Keyset::with_trigger(trigger, pressed);
        bound.modifier.accepts_held(held.modifier)
    }

    /// Recompute the active flag. Returns true only on the transition from
    /// released to held.
    pub fn update(&mut self, pressed: &ScanCodeSet) -> bool {
        let was_active = self.active;
        self.active = self.is_held(pressed);
        if self.active != was_active {
            log::trace!(
                "keybind '{}' {}",
                self.keybind.nickname(),
                if self.active { "activated" } else { "released" }
            );
        }
        self.active && !was_active
    }

    /// Drop the active flag without a release edge, e.g. on focus loss
    pub fn reset(&mut self) {
        self.active = false;
    }
}

/// The pressed code that stands in for `key`; a universal modifier accepts
/// either side
fn find_trigger(key: ScanCode, pressed: &ScanCodeSet) -> Option<ScanCode> {
    if pressed.contains(&key) {
        return Some(key);
    }
    if key.is_universal_modifier() {
        return pressed
            .iter()
            .copied()
            .find(|code| code.make_universal() == key);
    }
    None
}

impl InputListener for ActivationKeybind {
    fn on_input_change(
        &mut self,
        _changed: bool,
        pressed: &ScanCodeSet,
        _changed_keys: &[EventKey],
        _response: &mut InputResponse,
    ) {
        self.update(pressed);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keybind::KeybindContext;
    use crate::Modifier;

    fn activation(ctx: &KeybindContext, keyset: Keyset) -> ActivationKeybind {
        let kb = Keybind::new(ctx, "act", "Act", "Test", keyset, false).unwrap();
        ActivationKeybind::new(kb)
    }

    fn set(codes: &[ScanCode]) -> ScanCodeSet {
        codes.iter().copied().collect()
    }

    #[test]
    fn test_universal_modifier_accepts_either_side() {
        let ctx = KeybindContext::in_memory();
        let act = activation(&ctx, Keyset::new(ScanCode::K, Modifier::CTRL));
        assert!(act.is_held(&set(&[ScanCode::LEFT_CTRL, ScanCode::K])));
        assert!(act.is_held(&set(&[ScanCode::RIGHT_CTRL, ScanCode::K])));
        assert!(!act.is_held(&set(&[ScanCode::K])));
        assert!(!act.is_held(&set(&[ScanCode::LEFT_CTRL, ScanCode::LEFT_SHIFT, ScanCode::K])));
    }

    #[test]
    fn test_sided_modifier_is_exact() {
        let ctx = KeybindContext::in_memory();
        let act = activation(&ctx, Keyset::new(ScanCode::K, Modifier::LCTRL));
        assert!(act.is_held(&set(&[ScanCode::LEFT_CTRL, ScanCode::K])));
        assert!(!act.is_held(&set(&[ScanCode::RIGHT_CTRL, ScanCode::K])));
    }

    #[test]
    fn test_mixed_universal_and_sided_mask() {
        let ctx = KeybindContext::in_memory();
        let act = activation(&ctx, Keyset::new(ScanCode::K, Modifier::CTRL | Modifier::LSHIFT));
        assert!(act.is_held(&set(&[ScanCode::LEFT_CTRL, ScanCode::LEFT_SHIFT, ScanCode::K])));
        assert!(act.is_held(&set(&[ScanCode::RIGHT_CTRL, ScanCode::LEFT_SHIFT, ScanCode::K])));
        assert!(!act.is_held(&set(&[ScanCode::LEFT_CTRL, ScanCode::RIGHT_SHIFT, ScanCode::K])));
        assert!(!act.is_held(&set(&[ScanCode::LEFT_SHIFT, ScanCode::K])));
    }

    #[test]
    fn test_legacy_mixed_binding_activates() {
        let config = crate::ConfigStore::from_toml("[Keybinds]\nradial = \"17,160,75\"\n")
            .unwrap()
            .into_shared();
        let ctx = KeybindContext::new(config);
        let kb = Keybind::load(&ctx, "radial", "Radial", "Mounts").unwrap();
        assert_eq!(kb.keyset(), Keyset::new(ScanCode::K, Modifier::CTRL | Modifier::LSHIFT));

        let mut act = ActivationKeybind::new(kb);
        assert!(act.update(&set(&[ScanCode::LEFT_CTRL, ScanCode::LEFT_SHIFT, ScanCode::K])));
        assert!(act.is_active());
    }

    #[test]
    fn test_plain_key_rejects_extra_modifiers() {
        let ctx = KeybindContext::in_memory();
        let act = activation(&ctx, Keyset::key_only(ScanCode::F5));
        assert!(act.is_held(&set(&[ScanCode::F5])));
        assert!(act.is_held(&set(&[ScanCode::F5, ScanCode::A])));
        assert!(!act.is_held(&set(&[ScanCode::F5, ScanCode::LEFT_ALT])));
    }

    #[test]
    fn test_universal_modifier_as_key() {
        let ctx = KeybindContext::in_memory();
        let act = activation(&ctx, Keyset::key_only(ScanCode::SHIFT));
        assert!(act.is_held(&set(&[ScanCode::RIGHT_SHIFT])));
        assert!(!act.is_held(&set(&[ScanCode::LEFT_CTRL])));
    }

    #[test]
    fn test_rising_edge_only() {
        let ctx = KeybindContext::in_memory();
        let mut act = activation(&ctx, Keyset::new(ScanCode::M, Modifier::SHIFT));
        let chord = set(&[ScanCode::LEFT_SHIFT, ScanCode::M]);

        assert!(act.update(&chord));
        assert!(act.is_active());
        assert!(!act.update(&chord));
        assert!(!act.update(&set(&[ScanCode::LEFT_SHIFT])));
        assert!(!act.is_active());
        assert!(act.update(&chord));
    }

    #[test]
    fn test_unset_or_capturing_never_activates() {
        let ctx = KeybindContext::in_memory();
        let mut unset = activation(&ctx, Keyset::NONE);
        assert!(!unset.update(&set(&[ScanCode::A])));
        drop(unset);

        let mut act = activation(&ctx, Keyset::key_only(ScanCode::A));
        act.keybind().begin_capture();
        assert!(!act.update(&set(&[ScanCode::A])));
    }
}
