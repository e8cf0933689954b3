// Keymenu Settings Menu - Keybinds Tab
// Lists every registered keybind by category and starts rebinds

use indexmap::IndexMap;
use keymenu_core::{KeybindInfo, KeybindRegistry, Keyset, ScanCode};
use ratatui::prelude::*;
use ratatui::widgets::Paragraph;

use super::Implementer;
use crate::tui::theme::theme;

const NAME_WIDTH: usize = 28;

/// Built-in tab showing every live keybind
#[derive(Debug)]
pub struct KeybindsTab {
    registry: KeybindRegistry,
    selected: usize,
}

impl KeybindsTab {
    pub fn new(registry: KeybindRegistry) -> Self {
        Self {
            registry,
            selected: 0,
        }
    }

    pub fn selected(&self) -> usize {
        self.selected
    }

    /// Keybinds in display order: categories by first appearance, then
    /// registration order within each category
    fn entries(&self) -> Vec<KeybindInfo> {
        group_by_category(self.registry.snapshot())
            .into_values()
            .flatten()
            .collect()
    }
}

fn group_by_category(snapshot: Vec<KeybindInfo>) -> IndexMap<String, Vec<KeybindInfo>> {
    let mut groups: IndexMap<String, Vec<KeybindInfo>> = IndexMap::new();
    for info in snapshot {
        groups.entry(info.category.clone()).or_default().push(info);
    }
    groups
}

impl Implementer for KeybindsTab {
    fn tab_name(&self) -> &str {
        "Keybinds"
    }

    fn draw_menu(&mut self, frame: &mut Frame, area: Rect) {
        let t = theme();
        let groups = group_by_category(self.registry.snapshot());
        let total: usize = groups.values().map(Vec::len).sum();
        self.selected = self.selected.min(total.saturating_sub(1));

        if total == 0 {
            let empty = Paragraph::new(Line::styled("No keybinds registered", t.text_muted()));
            frame.render_widget(empty, area);
            return;
        }

        let mut lines: Vec<Line<'static>> = Vec::new();
        let mut index = 0;
        for (category, infos) in &groups {
            lines.push(Line::styled(category.clone(), t.category_header()));
            for info in infos {
                let sel = index == self.selected;
                let name = format!(
                    "{}{}",
                    info.display_name,
                    " ".repeat(NAME_WIDTH.saturating_sub(info.display_name.len()))
                );

                let value = if info.is_being_modified {
                    Span::styled("<press a chord, Esc to cancel>", t.capture_prompt())
                } else if info.display_string.is_empty() {
                    Span::styled("[unset]", t.setting_value(false))
                } else {
                    Span::styled(format!("[{}]", info.display_string), t.setting_value(true))
                };

                lines.push(Line::from(vec![
                    Span::styled(if sel { " > " } else { "   " }, t.key_hint()),
                    Span::styled(name, if sel { t.selection() } else { t.setting_key() }),
                    value,
                ]));
                index += 1;
            }
        }

        lines.push(Line::raw(""));
        lines.push(Line::from(vec![
            Span::styled("Enter", t.key_hint()),
            Span::styled(":rebind  ", t.text_muted()),
            Span::styled("Up/Down", t.key_hint()),
            Span::styled(":select", t.text_muted()),
        ]));

        frame.render_widget(Paragraph::new(lines), area);
    }

    fn handle_key(&mut self, keyset: Keyset) -> bool {
        if self.registry.capturing().is_some() {
            return true;
        }
        let entries = self.entries();
        match keyset.key {
            ScanCode::UP => {
                self.selected = self.selected.saturating_sub(1);
                true
            }
            ScanCode::DOWN => {
                if self.selected + 1 < entries.len() {
                    self.selected += 1;
                }
                true
            }
            ScanCode::ENTER => {
                if let Some(info) = entries.get(self.selected) {
                    self.registry.begin_capture(&info.nickname);
                }
                true
            }
            _ => false,
        }
    }
}
