use std::sync::Arc;

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use keymenu_core::{
    ActivationKeybind, EventKey, InputDispatcher, Keybind, KeybindContext, KeybindError, Keyset,
    Modifier, PassThroughKeys, ScanCode,
};
use parking_lot::Mutex;

use crate::menu::{KeybindsTab, MenuState, SettingsMenu};
use crate::tui::actions_tab::ActionsTab;
use crate::tui::input::KeyTranslator;

const MAX_OUTPUT_LINES: usize = 800;

/// Feature bindings the demo host declares: nickname, label, category, default
const FEATURE_BINDINGS: &[(&str, &str, &str, ScanCode, Modifier)] = &[
    ("mount_radial", "Mount radial", "Mounts", ScanCode::F5, Modifier::NONE),
    ("dismount", "Dismount", "Mounts", ScanCode::F5, Modifier::SHIFT),
    ("novelty_radial", "Novelty radial", "Novelties", ScanCode::N, Modifier::CTRL),
    ("marker_radial", "Marker radial", "Markers", ScanCode::NONE, Modifier::NONE),
];

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum OutputKind {
    Passed,
    Consumed,
    Activation,
    Info,
}

#[derive(Clone, Debug)]
pub struct OutputLine {
    pub kind: OutputKind,
    pub text: String,
}

/// A feature binding owned by the host, with the last state it logged
pub struct FeatureAction {
    pub binding: Arc<Mutex<ActivationKeybind>>,
    was_active: bool,
}

pub struct App {
    pub context: KeybindContext,
    pub menu: Arc<Mutex<SettingsMenu>>,
    pub actions: Vec<FeatureAction>,
    pub status: String,
    pub output: Vec<OutputLine>,
    dispatcher: InputDispatcher,
    translator: KeyTranslator,
    terminal_focused: bool,
}

impl App {
    pub fn new(context: KeybindContext, pass_through: PassThroughKeys) -> Result<Self, KeybindError> {
        let mut menu = SettingsMenu::new(&context, pass_through)?;

        let mut actions = Vec::with_capacity(FEATURE_BINDINGS.len());
        for &(nickname, label, category, key, modifier) in FEATURE_BINDINGS {
            let keybind = Keybind::load_or(&context, nickname, label, category, Keyset::new(key, modifier))?;
            actions.push(FeatureAction {
                binding: Arc::new(Mutex::new(ActivationKeybind::new(keybind))),
                was_active: false,
            });
        }

        menu.add_implementer(KeybindsTab::new(context.registry.clone()));
        menu.add_implementer(ActionsTab::new(
            actions.iter().map(|a| a.binding.clone()).collect(),
        ));

        let menu = Arc::new(Mutex::new(menu));
        let mut dispatcher = InputDispatcher::new();
        dispatcher.subscribe(&menu);
        for action in &actions {
            dispatcher.subscribe(&action.binding);
        }

        Ok(Self {
            context,
            menu,
            actions,
            status: "Ready".to_string(),
            output: vec![],
            dispatcher,
            translator: KeyTranslator::new(false),
            terminal_focused: true,
        })
    }

    pub fn set_translator(&mut self, translator: KeyTranslator) {
        self.translator = translator;
    }

    pub fn menu_state(&self) -> MenuState {
        self.menu.lock().state()
    }

    /// Display string of the show-menu chord
    pub fn show_chord(&self) -> String {
        self.menu.lock().show_keybind().keybind().display_string()
    }

    pub fn set_status<S: Into<String>>(&mut self, msg: S) {
        self.status = msg.into();
    }

    pub fn push_output<S: Into<String>>(&mut self, kind: OutputKind, msg: S) {
        self.output.push(OutputLine {
            kind,
            text: msg.into(),
        });
        if self.output.len() > MAX_OUTPUT_LINES {
            let drain = self.output.len() - MAX_OUTPUT_LINES;
            self.output.drain(0..drain);
        }
    }

    /// Handle one terminal key event. Returns true when the app should quit.
    pub fn handle_key_event(&mut self, event: KeyEvent) -> bool {
        if is_quit(&event) {
            return true;
        }
        for transition in self.translator.translate(&event) {
            self.process(transition);
        }
        false
    }

    fn process(&mut self, transition: EventKey) {
        let response = self.dispatcher.process(&[transition]);
        self.sync_menu_focus();

        if transition.down && !transition.code.is_modifier() {
            let keyset = Keyset::with_trigger(transition.code, self.dispatcher.pressed());
            let chord = keyset.to_string();
            // Only chords the menu intercepted drive its navigation
            if response.is_consumed() {
                self.menu.lock().handle_key(keyset);
                self.push_output(OutputKind::Consumed, format!("{} kept by settings menu", chord));
            } else {
                self.push_output(OutputKind::Passed, format!("{} passed to application", chord));
            }
        }

        self.log_activations();
    }

    /// Focus follows the terminal while the menu is showing
    fn sync_menu_focus(&mut self) {
        let mut menu = self.menu.lock();
        if menu.is_visible() && menu.is_focused() != self.terminal_focused {
            menu.set_focused(self.terminal_focused);
        }
    }

    fn log_activations(&mut self) {
        let mut lines = Vec::new();
        for action in &mut self.actions {
            let binding = action.binding.lock();
            let active = binding.is_active();
            if active && !action.was_active {
                lines.push(format!("{} activated", binding.keybind().display_name()));
            }
            action.was_active = active;
        }
        for line in lines {
            self.push_output(OutputKind::Activation, line);
        }
    }

    pub fn set_terminal_focus(&mut self, focused: bool) {
        self.terminal_focused = focused;
        if !focused {
            self.dispatcher.release_all();
            for action in &mut self.actions {
                action.binding.lock().reset();
                action.was_active = false;
            }
        }
        self.sync_menu_focus();
        self.set_status(if focused { "Focus gained" } else { "Focus lost" });
    }
}

fn is_quit(event: &KeyEvent) -> bool {
    event.kind != KeyEventKind::Release
        && event.code == KeyCode::Char('c')
        && event.modifiers.contains(KeyModifiers::CONTROL)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn app() -> App {
        App::new(KeybindContext::in_memory(), PassThroughKeys::default()).unwrap()
    }

    fn press(app: &mut App, code: KeyCode, modifiers: KeyModifiers) -> bool {
        app.handle_key_event(KeyEvent::new(code, modifiers))
    }

    #[test]
    fn test_show_chord_opens_menu_and_focuses() {
        let mut app = app();
        assert_eq!(app.menu_state(), MenuState::Hidden);
        assert_eq!(app.show_chord(), "ALT + SHIFT + M");

        press(&mut app, KeyCode::Char('M'), KeyModifiers::ALT | KeyModifiers::SHIFT);
        assert_eq!(app.menu_state(), MenuState::VisibleFocused);

        press(&mut app, KeyCode::Char('a'), KeyModifiers::NONE);
        assert_eq!(app.output.last().map(|l| l.kind.clone()), Some(OutputKind::Consumed));
    }

    #[test]
    fn test_keys_pass_while_hidden() {
        let mut app = app();
        press(&mut app, KeyCode::Char('a'), KeyModifiers::NONE);
        let last = app.output.last().unwrap();
        assert_eq!(last.kind, OutputKind::Passed);
        assert_eq!(last.text, "A passed to application");
    }

    #[test]
    fn test_feature_activation_logged() {
        let mut app = app();
        press(&mut app, KeyCode::F(5), KeyModifiers::NONE);
        assert!(app
            .output
            .iter()
            .any(|l| l.kind == OutputKind::Activation && l.text == "Mount radial activated"));
    }

    #[test]
    fn test_rebind_through_menu() {
        let mut app = app();
        press(&mut app, KeyCode::Char('M'), KeyModifiers::ALT | KeyModifiers::SHIFT);

        // Keybinds tab lists the show chord first, then the features
        press(&mut app, KeyCode::Down, KeyModifiers::NONE);
        press(&mut app, KeyCode::Enter, KeyModifiers::NONE);
        assert_eq!(app.context.registry.capturing().as_deref(), Some("mount_radial"));

        press(&mut app, KeyCode::Char('j'), KeyModifiers::CONTROL);
        assert_eq!(app.context.registry.capturing(), None);
        let info = app.context.registry.find("mount_radial").unwrap();
        assert_eq!(info.display_string, "LCTRL + J");
    }

    #[test]
    fn test_pass_through_chord_leaves_menu_alone() {
        let pass_through = PassThroughKeys {
            allow_through_alt: ScanCode::NONE,
            allow_through_shift: ScanCode::TAB,
        };
        let mut app = App::new(KeybindContext::in_memory(), pass_through).unwrap();
        press(&mut app, KeyCode::Char('M'), KeyModifiers::ALT | KeyModifiers::SHIFT);
        assert_eq!(app.menu_state(), MenuState::VisibleFocused);
        let before = app.menu.lock().current_tab();

        press(&mut app, KeyCode::BackTab, KeyModifiers::SHIFT);
        assert_eq!(app.menu.lock().current_tab(), before);
        let last = app.output.last().unwrap();
        assert_eq!(last.kind, OutputKind::Passed);
        assert_eq!(last.text, "LSHIFT + Tab passed to application");

        press(&mut app, KeyCode::Tab, KeyModifiers::NONE);
        assert_ne!(app.menu.lock().current_tab(), before);
    }

    #[test]
    fn test_focus_loss_unfocuses_menu() {
        let mut app = app();
        press(&mut app, KeyCode::Char('M'), KeyModifiers::ALT | KeyModifiers::SHIFT);
        app.set_terminal_focus(false);
        assert_eq!(app.menu_state(), MenuState::VisibleUnfocused);
        app.set_terminal_focus(true);
        assert_eq!(app.menu_state(), MenuState::VisibleFocused);
    }

    #[test]
    fn test_ctrl_c_quits() {
        let mut app = app();
        assert!(press(&mut app, KeyCode::Char('c'), KeyModifiers::CONTROL));
        assert!(!press(&mut app, KeyCode::Char('c'), KeyModifiers::NONE));
    }
}
