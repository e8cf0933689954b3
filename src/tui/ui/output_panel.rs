use ratatui::prelude::*;
use ratatui::widgets::*;

use crate::tui::app::{App, OutputKind};
use crate::tui::theme::theme;

pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let t = theme();

    let block = Block::default()
        .title(t.panel_title("APPLICATION INPUT", false))
        .borders(Borders::ALL)
        .border_style(t.panel_border(false))
        .border_type(BorderType::Plain);

    let inner = block.inner(area);
    frame.render_widget(block, area);

    if app.output.is_empty() {
        let empty = Paragraph::new(Line::styled(
            format!("No input yet. Press {} to open settings.", app.show_chord()),
            t.text_muted(),
        ));
        frame.render_widget(empty, inner);
        return;
    }

    // Newest lines stay visible
    let visible_height = inner.height as usize;
    let start = app.output.len().saturating_sub(visible_height);

    let lines: Vec<Line> = app.output[start..]
        .iter()
        .map(|l| {
            let style = match l.kind {
                OutputKind::Consumed => t.output_consumed(),
                OutputKind::Activation => t.output_activation(),
                OutputKind::Passed | OutputKind::Info => t.output_text(),
            };
            Line::styled(l.text.clone(), style)
        })
        .collect();

    frame.render_widget(Paragraph::new(lines), inner);
}
