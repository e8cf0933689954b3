use ratatui::prelude::*;
use ratatui::widgets::Paragraph;

use crate::menu::MenuState;
use crate::tui::app::App;
use crate::tui::theme::theme;

pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let t = theme();

    let line1 = Line::styled(format!("Status: {}", app.status), t.status_message());

    let show = app.show_chord();
    let show = if show.is_empty() { "unbound".to_string() } else { show };
    let mut hints = vec![
        Span::styled(show, t.key_hint()),
        Span::styled(":settings  ", t.text_muted()),
    ];
    if app.menu_state() == MenuState::VisibleFocused {
        hints.extend([
            Span::styled("Tab", t.key_hint()),
            Span::styled(":next tab  ", t.text_muted()),
            Span::styled("Enter", t.key_hint()),
            Span::styled(":rebind  ", t.text_muted()),
        ]);
    }
    hints.extend([
        Span::styled("Ctrl+C", t.key_hint()),
        Span::styled(":quit", t.text_muted()),
    ]);

    frame.render_widget(Paragraph::new(vec![line1, Line::from(hints)]), area);
}
