// Keymenu Settings Menu - Tab Contract
// What a feature module provides to appear as a settings tab

use std::fmt;

use keymenu_core::Keyset;
use ratatui::layout::Rect;
use ratatui::Frame;

/// Handle returned by [`super::SettingsMenu::add_implementer`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TabId(pub(crate) u64);

impl fmt::Display for TabId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "tab#{}", self.0)
    }
}

/// A settings tab contributed by a feature module
pub trait Implementer: Send {
    /// Label shown in the tab bar
    fn tab_name(&self) -> &str;

    /// Render the tab body into `area`
    fn draw_menu(&mut self, frame: &mut Frame, area: Rect);

    /// Hidden tabs stay registered but are left out of the tab bar
    fn visible(&self) -> bool {
        true
    }

    /// Key pressed while this tab is showing and the menu has focus.
    /// Returns true when the key was used.
    fn handle_key(&mut self, _keyset: Keyset) -> bool {
        false
    }
}
