// Keymenu Settings Menu
// Tab coordinator: visibility toggle, input interception and rebind capture

mod implementer;
mod keybinds_tab;

use indexmap::IndexMap;
use keymenu_core::{
    ActivationKeybind, EventKey, InputListener, InputResponse, Keybind, KeybindContext,
    KeybindError, KeybindRegistry, Keyset, Modifier, PassThroughKeys, ScanCode, ScanCodeSet,
};
use ratatui::prelude::*;
use ratatui::widgets::{Block, BorderType, Borders, Clear, Paragraph, Tabs};

use crate::tui::theme::theme;

pub use implementer::{Implementer, TabId};
pub use keybinds_tab::KeybindsTab;

/// Nickname under which the show-menu chord is persisted
pub const SHOW_KEYBIND_NICKNAME: &str = "show_settings";

/// Show-menu chord used when nothing is persisted
pub fn default_show_keyset() -> Keyset {
    Keyset::new(ScanCode::M, Modifier::ALT | Modifier::SHIFT)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuState {
    Hidden,
    VisibleUnfocused,
    VisibleFocused,
}

/// The settings overlay.
///
/// Owns the registered tabs, toggles on its show keybind and, while focused,
/// keeps input away from the host application.
pub struct SettingsMenu {
    implementers: IndexMap<TabId, Box<dyn Implementer>>,
    next_id: u64,
    current_tab: Option<TabId>,
    is_visible: bool,
    is_focused: bool,
    show_keybind: ActivationKeybind,
    pass_through: PassThroughKeys,
    registry: KeybindRegistry,
    // Set once a key goes down after a rebind started
    capture_armed: bool,
}

impl std::fmt::Debug for SettingsMenu {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SettingsMenu")
            .field("tabs", &self.implementers.len())
            .field("current_tab", &self.current_tab)
            .field("state", &self.state())
            .field("pass_through", &self.pass_through)
            .finish()
    }
}

impl SettingsMenu {
    pub fn new(ctx: &KeybindContext, pass_through: PassThroughKeys) -> Result<Self, KeybindError> {
        let show = Keybind::load_or(
            ctx,
            SHOW_KEYBIND_NICKNAME,
            "Show settings",
            "Menu",
            default_show_keyset(),
        )?;
        Ok(Self {
            implementers: IndexMap::new(),
            next_id: 0,
            current_tab: None,
            is_visible: false,
            is_focused: false,
            show_keybind: ActivationKeybind::new(show),
            pass_through,
            registry: ctx.registry.clone(),
            capture_armed: false,
        })
    }

    /// Append a tab. It becomes the current tab when none is selected.
    pub fn add_implementer<I: Implementer + 'static>(&mut self, implementer: I) -> TabId {
        let id = TabId(self.next_id);
        self.next_id += 1;
        log::debug!("adding settings tab '{}' as {}", implementer.tab_name(), id);
        self.implementers.insert(id, Box::new(implementer));
        if self.current_tab.is_none() {
            self.current_tab = Some(id);
        }
        id
    }

    /// Remove a tab. Selection is cleared, not moved, when it was current.
    pub fn remove_implementer(&mut self, id: TabId) -> Option<Box<dyn Implementer>> {
        let removed = self.implementers.shift_remove(&id)?;
        if self.current_tab == Some(id) {
            self.current_tab = None;
        }
        log::debug!("removed settings tab '{}'", removed.tab_name());
        Some(removed)
    }

    pub fn tab_count(&self) -> usize {
        self.implementers.len()
    }

    pub fn tab_ids(&self) -> impl Iterator<Item = TabId> + '_ {
        self.implementers.keys().copied()
    }

    pub fn implementer(&self, id: TabId) -> Option<&dyn Implementer> {
        self.implementers.get(&id).map(|boxed| boxed.as_ref())
    }

    pub fn current_tab(&self) -> Option<TabId> {
        self.current_tab
    }

    /// Select a registered tab; unknown ids are ignored
    pub fn select_tab(&mut self, id: TabId) -> bool {
        if !self.implementers.contains_key(&id) {
            return false;
        }
        self.current_tab = Some(id);
        true
    }

    pub fn next_tab(&mut self) {
        self.step_tab(1);
    }

    pub fn previous_tab(&mut self) {
        self.step_tab(-1);
    }

    fn step_tab(&mut self, step: isize) {
        let visible = self.visible_tabs();
        if visible.is_empty() {
            return;
        }
        let count = visible.len() as isize;
        let next = match self.current_tab.and_then(|c| visible.iter().position(|id| *id == c)) {
            Some(pos) => (pos as isize + step).rem_euclid(count) as usize,
            None => 0,
        };
        self.current_tab = visible.get(next).copied();
    }

    fn visible_tabs(&self) -> Vec<TabId> {
        self.implementers
            .iter()
            .filter(|(_, imp)| imp.visible())
            .map(|(id, _)| *id)
            .collect()
    }

    pub fn state(&self) -> MenuState {
        match (self.is_visible, self.is_focused) {
            (false, _) => MenuState::Hidden,
            (true, false) => MenuState::VisibleUnfocused,
            (true, true) => MenuState::VisibleFocused,
        }
    }

    pub fn is_visible(&self) -> bool {
        self.is_visible
    }

    pub fn is_focused(&self) -> bool {
        self.is_focused
    }

    pub fn set_visible(&mut self, visible: bool) {
        if self.is_visible == visible {
            return;
        }
        self.is_visible = visible;
        if !visible {
            self.is_focused = false;
        }
        log::debug!("settings menu {}", if visible { "shown" } else { "hidden" });
    }

    pub fn toggle_visibility(&mut self) {
        self.set_visible(!self.is_visible);
    }

    /// Input focus from the host. Ignored while hidden.
    pub fn set_focused(&mut self, focused: bool) {
        if self.is_visible {
            self.is_focused = focused;
        }
    }

    pub fn show_keybind(&self) -> &ActivationKeybind {
        &self.show_keybind
    }

    pub fn pass_through(&self) -> PassThroughKeys {
        self.pass_through
    }

    pub fn set_pass_through(&mut self, keys: PassThroughKeys) {
        self.pass_through = keys;
    }

    /// In-menu navigation for a key press. Returns true when the key was used.
    pub fn handle_key(&mut self, keyset: Keyset) -> bool {
        if self.state() != MenuState::VisibleFocused {
            return false;
        }
        // Chords during a rebind belong to the capture
        if self.registry.capturing().is_some() {
            return true;
        }
        // Pass-through chords belong to the application
        if self.allowed_through(keyset.key, keyset.modifier) {
            return false;
        }
        if keyset.key == ScanCode::TAB {
            if keyset.modifier.has_shift() {
                self.previous_tab();
            } else {
                self.next_tab();
            }
            return true;
        }
        match self.current_tab.and_then(|id| self.implementers.get_mut(&id)) {
            Some(imp) => imp.handle_key(keyset),
            None => false,
        }
    }

    /// Render the overlay into `area`. Does nothing while hidden.
    pub fn draw(&mut self, frame: &mut Frame, area: Rect) {
        if !self.is_visible {
            return;
        }
        let visible = self.visible_tabs();
        if self.current_tab.is_none() {
            self.current_tab = visible.first().copied();
        }

        let t = theme();
        let block = Block::default()
            .title(t.panel_title("SETTINGS", self.is_focused))
            .borders(Borders::ALL)
            .border_style(t.panel_border(self.is_focused))
            .border_type(if self.is_focused {
                BorderType::Thick
            } else {
                BorderType::Plain
            });
        let inner = block.inner(area);
        frame.render_widget(Clear, area);
        frame.render_widget(block, area);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(2), Constraint::Min(1)])
            .split(inner);

        if visible.is_empty() {
            let empty = Paragraph::new(Line::styled("No settings tabs registered", t.text_muted()));
            frame.render_widget(empty, chunks[1]);
            return;
        }

        let titles: Vec<Line> = visible
            .iter()
            .filter_map(|id| self.implementers.get(id))
            .map(|imp| Line::from(imp.tab_name().to_string()))
            .collect();
        let mut tabs = Tabs::new(titles)
            .style(t.text_muted())
            .highlight_style(t.tab_selected())
            .divider(Span::styled("|", t.text_muted()))
            .block(Block::default().borders(Borders::BOTTOM).border_style(t.panel_border(false)));
        if let Some(pos) = self.current_tab.and_then(|c| visible.iter().position(|id| *id == c)) {
            tabs = tabs.select(pos);
        }
        frame.render_widget(tabs, chunks[0]);

        if let Some(imp) = self.current_tab.and_then(|id| self.implementers.get_mut(&id)) {
            imp.draw_menu(frame, chunks[1]);
        }
    }

    fn capture_input(&mut self, pressed: &ScanCodeSet, changed_keys: &[EventKey]) {
        if changed_keys.iter().any(|event| event.down) {
            self.capture_armed = true;
            return;
        }
        let released: Vec<ScanCode> = changed_keys
            .iter()
            .filter(|event| !event.down)
            .map(|event| event.code)
            .collect();
        if released.is_empty() || !self.capture_armed {
            return;
        }
        self.capture_armed = false;

        let mut chord = pressed.clone();
        chord.extend(released.iter().copied());

        if chord.len() == 1 && chord.contains(&ScanCode::ESCAPE) {
            self.registry.cancel_capture();
            return;
        }

        let trigger = released
            .iter()
            .copied()
            .find(|code| !code.is_modifier())
            .or_else(|| chord.iter().rev().copied().find(|code| !code.is_modifier()))
            .or_else(|| released.first().copied());
        let Some(trigger) = trigger else {
            return;
        };

        let keyset = Keyset::with_trigger(trigger, &chord);
        match self.registry.finish_capture(keyset) {
            Ok(Some(nickname)) => log::info!("keybind '{}' set to {}", nickname, keyset),
            Ok(None) => {}
            Err(e) => log::debug!("rebind kept in memory only: {}", e),
        }
    }

    fn passes_through(&self, pressed: &ScanCodeSet, changed_keys: &[EventKey]) -> bool {
        if changed_keys.is_empty() {
            return false;
        }
        let held = Keyset::held_modifiers(pressed, ScanCode::NONE);
        changed_keys
            .iter()
            .all(|event| self.allowed_through(event.code, held))
    }

    fn allowed_through(&self, code: ScanCode, held: Modifier) -> bool {
        let alt = self.pass_through.allow_through_alt;
        let shift = self.pass_through.allow_through_shift;
        (!alt.is_none() && code == alt && held.has_alt())
            || (!shift.is_none() && code == shift && held.has_shift())
    }
}

impl InputListener for SettingsMenu {
    fn on_input_change(
        &mut self,
        _changed: bool,
        pressed: &ScanCodeSet,
        changed_keys: &[EventKey],
        response: &mut InputResponse,
    ) {
        let capturing = self.registry.capturing().is_some();
        if capturing {
            self.capture_input(pressed, changed_keys);
        } else {
            self.capture_armed = false;
        }

        if self.show_keybind.update(pressed) && !capturing {
            self.toggle_visibility();
            response.consume();
            return;
        }

        if capturing || (self.is_focused && !self.passes_through(pressed, changed_keys)) {
            response.consume();
        }
    }
}
