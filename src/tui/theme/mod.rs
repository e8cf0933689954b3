mod palette;

use ratatui::prelude::*;

use crate::menu::MenuState;

pub use palette::Palette;

pub struct Theme {
    pub palette: Palette,
}

impl Default for Theme {
    fn default() -> Self {
        Self::new()
    }
}

impl Theme {
    pub fn new() -> Self {
        Self {
            palette: Palette::default(),
        }
    }

    // Panel border style
    pub fn panel_border(&self, focused: bool) -> Style {
        if focused {
            Style::default()
                .fg(self.palette.blue)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(self.palette.surface)
        }
    }

    // Header badge for the settings menu state
    pub fn menu_badge(&self, state: MenuState) -> Style {
        let bg = match state {
            MenuState::VisibleFocused => self.palette.green,
            MenuState::VisibleUnfocused => self.palette.yellow,
            MenuState::Hidden => self.palette.overlay,
        };
        Style::default()
            .fg(Color::Black)
            .bg(bg)
            .add_modifier(Modifier::BOLD)
    }

    pub fn text_primary(&self) -> Style {
        Style::default().fg(self.palette.text)
    }

    pub fn text_muted(&self) -> Style {
        Style::default().fg(self.palette.overlay)
    }

    pub fn title_focused(&self) -> Style {
        Style::default()
            .fg(self.palette.blue)
            .add_modifier(Modifier::BOLD)
    }

    pub fn title_unfocused(&self) -> Style {
        Style::default().fg(self.palette.overlay)
    }

    // Selected tab in the settings tab bar
    pub fn tab_selected(&self) -> Style {
        Style::default()
            .fg(self.palette.crust)
            .bg(self.palette.blue)
            .add_modifier(Modifier::BOLD)
    }

    // Highlighted row in a list
    pub fn selection(&self) -> Style {
        Style::default()
            .fg(self.palette.blue)
            .add_modifier(Modifier::BOLD)
    }

    pub fn category_header(&self) -> Style {
        Style::default()
            .fg(self.palette.subtext)
            .add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
    }

    // Log lines for input the menu consumed
    pub fn output_consumed(&self) -> Style {
        Style::default().fg(self.palette.yellow)
    }

    // Log lines for keybind activations
    pub fn output_activation(&self) -> Style {
        Style::default()
            .fg(self.palette.blue)
            .add_modifier(Modifier::BOLD)
    }

    pub fn output_text(&self) -> Style {
        Style::default().fg(self.palette.text)
    }

    // Key hint style (the key part like "Tab")
    pub fn key_hint(&self) -> Style {
        Style::default()
            .fg(self.palette.blue)
            .add_modifier(Modifier::BOLD)
    }

    // Shown in place of a binding while it is being rebound
    pub fn capture_prompt(&self) -> Style {
        Style::default()
            .fg(self.palette.red)
            .add_modifier(Modifier::BOLD | Modifier::SLOW_BLINK)
    }

    pub fn status_message(&self) -> Style {
        Style::default().fg(self.palette.yellow)
    }

    pub fn setting_key(&self) -> Style {
        Style::default().fg(self.palette.subtext)
    }

    // Bound chords are highlighted, unset ones muted
    pub fn setting_value(&self, bound: bool) -> Style {
        if bound {
            Style::default().fg(self.palette.green)
        } else {
            Style::default().fg(self.palette.overlay)
        }
    }

    // Panel title with optional focus indicator
    pub fn panel_title(&self, title: &str, focused: bool) -> Line<'_> {
        if focused {
            Line::styled(format!(" {} ", title), self.title_focused())
        } else {
            Line::styled(format!(" {} ", title), self.title_unfocused())
        }
    }
}

/// Global theme instance
pub static THEME: std::sync::OnceLock<Theme> = std::sync::OnceLock::new();

pub fn theme() -> &'static Theme {
    THEME.get_or_init(Theme::new)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_menu_badge_differs_per_state() {
        let t = Theme::new();
        let focused = t.menu_badge(MenuState::VisibleFocused).bg;
        let unfocused = t.menu_badge(MenuState::VisibleUnfocused).bg;
        let hidden = t.menu_badge(MenuState::Hidden).bg;
        assert_ne!(focused, unfocused);
        assert_ne!(unfocused, hidden);
        assert_eq!(hidden, Some(t.palette.overlay));
    }
}
