use ratatui::prelude::*;
use ratatui::widgets::Paragraph;

use crate::menu::MenuState;
use crate::tui::app::App;
use crate::tui::theme::theme;

pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let t = theme();
    let state = app.menu_state();

    let state_label = match state {
        MenuState::Hidden => "MENU HIDDEN",
        MenuState::VisibleUnfocused => "MENU OPEN",
        MenuState::VisibleFocused => "MENU FOCUSED",
    };

    let config_path = app
        .context
        .config
        .lock()
        .path()
        .map(|p| p.display().to_string())
        .unwrap_or_else(|| "(in memory)".to_string());
    let path_display = match config_path.char_indices().rev().nth(41) {
        Some((start, _)) if config_path.chars().count() > 45 => {
            format!("...{}", &config_path[start..])
        }
        _ => config_path,
    };

    let line = Line::from(vec![
        Span::styled("keymenu ", t.text_primary().add_modifier(Modifier::BOLD)),
        Span::styled(format!("[{}] ", state_label), t.menu_badge(state)),
        Span::styled(path_display, t.text_muted()),
        Span::raw(" "),
        Span::styled("Ctrl+C:quit", t.key_hint()),
    ]);

    frame.render_widget(Paragraph::new(line).alignment(Alignment::Left), area);
}
