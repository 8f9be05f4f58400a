//! Field rendering utilities for forms

use ratatui::{
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use signup_form::form::FieldName;

/// Rows taken by one field: bordered input plus its error line
pub const FIELD_HEIGHT: u16 = 4;

/// Draw an input with its label, value and (visible) error message
pub fn draw_field(
    frame: &mut Frame,
    area: Rect,
    field: FieldName,
    value: &str,
    error: Option<&str>,
    is_active: bool,
) {
    let input_area = Rect {
        height: area.height.min(3),
        ..area
    };
    let error_area = Rect {
        y: area.y.saturating_add(3),
        height: area.height.saturating_sub(3),
        ..area
    };

    let border_style = match (error.is_some(), is_active) {
        (true, _) => Style::default().fg(Color::Red),
        (false, true) => Style::default().fg(Color::Cyan),
        (false, false) => Style::default().fg(Color::DarkGray),
    };

    let text_style = if is_active {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default()
    };

    let display_value = if field.is_secret() {
        "•".repeat(value.chars().count())
    } else {
        value.to_string()
    };

    let cursor = if is_active { "▌" } else { "" };

    let content = Paragraph::new(Line::from(vec![
        Span::styled(display_value, text_style),
        Span::styled(cursor, Style::default().fg(Color::Cyan)),
    ]));

    let block = Block::default()
        .title(format!(" {} ", field.label()))
        .borders(Borders::ALL)
        .border_style(border_style);

    frame.render_widget(content.block(block), input_area);

    if let Some(message) = error {
        if error_area.height > 0 {
            let helper = Paragraph::new(Span::styled(
                format!(" {message}"),
                Style::default().fg(Color::Red),
            ));
            frame.render_widget(helper, error_area);
        }
    }
}
