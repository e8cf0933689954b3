// Keymenu End-to-End Test Scenarios
//
// These tests drive keybinds through the input dispatcher the way a host
// application does, without a terminal or real keyboard.
//
// Run with: cargo test -p keymenu-core --test e2e_scenarios

mod e2e_tests {
    use std::sync::Arc;

    use keymenu_core::{
        ActivationKeybind, ConfigStore, EventKey, InputDispatcher, InputListener, InputResponse,
        Keybind, KeybindContext, Keyset, Modifier, ScanCode, ScanCodeSet,
    };
    use parking_lot::Mutex;

    // =========================================================================
    // Test Helpers
    // =========================================================================

    /// Simulate holding a key while pressing another
    fn hold_and_press(dispatcher: &mut InputDispatcher, hold: ScanCode, press: ScanCode) {
        dispatcher.process(&[EventKey::press(hold)]);
        dispatcher.process(&[EventKey::press(press)]);
        dispatcher.process(&[EventKey::release(press)]);
        dispatcher.process(&[EventKey::release(hold)]);
    }

    fn activation(ctx: &KeybindContext, nick: &str, keyset: Keyset) -> Arc<Mutex<ActivationKeybind>> {
        let kb = Keybind::new(ctx, nick, nick, "Scenarios", keyset, false).unwrap();
        Arc::new(Mutex::new(ActivationKeybind::new(kb)))
    }

    /// Counts rising edges of the wrapped binding
    struct EdgeCounter {
        binding: ActivationKeybind,
        edges: usize,
    }

    impl InputListener for EdgeCounter {
        fn on_input_change(
            &mut self,
            _changed: bool,
            pressed: &ScanCodeSet,
            _changed_keys: &[EventKey],
            _response: &mut InputResponse,
        ) {
            if self.binding.update(pressed) {
                self.edges += 1;
            }
        }
    }

    // =========================================================================
    // Scenarios
    // =========================================================================

    #[test]
    fn test_either_ctrl_triggers_universal_binding() {
        let ctx = KeybindContext::in_memory();
        let kb = Keybind::new(&ctx, "radial", "Radial", "Mounts", Keyset::new(ScanCode::K, Modifier::CTRL), false).unwrap();
        let counter = Arc::new(Mutex::new(EdgeCounter {
            binding: ActivationKeybind::new(kb),
            edges: 0,
        }));
        let mut dispatcher = InputDispatcher::new();
        dispatcher.subscribe(&counter);

        hold_and_press(&mut dispatcher, ScanCode::LEFT_CTRL, ScanCode::K);
        hold_and_press(&mut dispatcher, ScanCode::RIGHT_CTRL, ScanCode::K);
        hold_and_press(&mut dispatcher, ScanCode::LEFT_SHIFT, ScanCode::K);

        assert_eq!(counter.lock().edges, 2);
    }

    #[test]
    fn test_held_state_follows_chord() {
        let ctx = KeybindContext::in_memory();
        let binding = activation(&ctx, "marker", Keyset::new(ScanCode::F, Modifier::LSHIFT));
        let mut dispatcher = InputDispatcher::new();
        dispatcher.subscribe(&binding);

        dispatcher.process(&[EventKey::press(ScanCode::LEFT_SHIFT)]);
        assert!(!binding.lock().is_active());
        dispatcher.process(&[EventKey::press(ScanCode::F)]);
        assert!(binding.lock().is_active());

        // Releasing the modifier first ends the chord
        dispatcher.process(&[EventKey::release(ScanCode::LEFT_SHIFT)]);
        assert!(!binding.lock().is_active());
        dispatcher.process(&[EventKey::release(ScanCode::F)]);
        assert!(!binding.lock().is_active());
    }

    #[test]
    fn test_focus_loss_releases_everything() {
        let ctx = KeybindContext::in_memory();
        let binding = activation(&ctx, "dismount", Keyset::key_only(ScanCode::F5));
        let mut dispatcher = InputDispatcher::new();
        dispatcher.subscribe(&binding);

        dispatcher.process(&[EventKey::press(ScanCode::F5)]);
        assert!(binding.lock().is_active());
        dispatcher.release_all();
        assert!(!binding.lock().is_active());
        assert!(dispatcher.pressed().is_empty());
    }

    #[test]
    fn test_rebinding_applies_to_next_chord() {
        let ctx = KeybindContext::in_memory();
        let binding = activation(&ctx, "novelty", Keyset::key_only(ScanCode::N));
        let mut dispatcher = InputDispatcher::new();
        dispatcher.subscribe(&binding);

        binding.lock().keybind().begin_capture();
        dispatcher.process(&[EventKey::press(ScanCode::N)]);
        assert!(!binding.lock().is_active());
        dispatcher.process(&[EventKey::release(ScanCode::N)]);

        assert_eq!(ctx.registry.finish_capture(Keyset::key_only(ScanCode::B)).unwrap().as_deref(), Some("novelty"));
        dispatcher.process(&[EventKey::press(ScanCode::B)]);
        assert!(binding.lock().is_active());
    }

    #[test]
    fn test_dropping_binding_unsubscribes_and_unregisters() {
        let ctx = KeybindContext::in_memory();
        let binding = activation(&ctx, "temp", Keyset::key_only(ScanCode::T));
        let mut dispatcher = InputDispatcher::new();
        dispatcher.subscribe(&binding);
        assert_eq!(ctx.registry.len(), 1);

        drop(binding);
        assert_eq!(dispatcher.listener_count(), 0);
        assert!(ctx.registry.is_empty());
        dispatcher.process(&[EventKey::press(ScanCode::T)]);
    }

    #[test]
    fn test_refresh_after_config_reload() {
        let store = ConfigStore::from_toml("[\"Keybinds.2\"]\nradial = \"37, 2\"\n").unwrap();
        let ctx = KeybindContext::new(store.into_shared());
        let kb = Keybind::load(&ctx, "radial", "Radial", "Mounts").unwrap();
        assert_eq!(kb.display_string(), "LCTRL + K");

        kb.parse_config("37, 4").unwrap();
        ctx.registry.refresh_display_strings();
        assert_eq!(ctx.registry.find("radial").unwrap().display_string, "RCTRL + K");
    }
}
