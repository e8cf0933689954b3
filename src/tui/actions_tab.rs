// Keymenu TUI - Actions Tab
// Live held/released state of the host's feature bindings

use std::sync::Arc;

use keymenu_core::ActivationKeybind;
use parking_lot::Mutex;
use ratatui::prelude::*;
use ratatui::widgets::Paragraph;

use crate::menu::Implementer;
use crate::tui::theme::theme;

pub struct ActionsTab {
    bindings: Vec<Arc<Mutex<ActivationKeybind>>>,
}

impl ActionsTab {
    pub fn new(bindings: Vec<Arc<Mutex<ActivationKeybind>>>) -> Self {
        Self { bindings }
    }
}

impl Implementer for ActionsTab {
    fn tab_name(&self) -> &str {
        "Actions"
    }

    fn draw_menu(&mut self, frame: &mut Frame, area: Rect) {
        let t = theme();
        let lines: Vec<Line> = self
            .bindings
            .iter()
            .map(|binding| {
                let binding = binding.lock();
                let keybind = binding.keybind();
                let (marker, style) = if binding.is_active() {
                    ("[held]    ", t.setting_value(true))
                } else {
                    ("[released]", t.setting_value(false))
                };
                Line::from(vec![
                    Span::styled(marker, style),
                    Span::styled(format!(" {}", keybind.display_name()), t.text_primary()),
                    Span::styled(format!("  {}", keybind.display_string()), t.text_muted()),
                ])
            })
            .collect();
        frame.render_widget(Paragraph::new(lines), area);
    }

    // Nothing to show without feature bindings
    fn visible(&self) -> bool {
        !self.bindings.is_empty()
    }
}
