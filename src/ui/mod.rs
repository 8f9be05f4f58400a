//! UI module for rendering the TUI

mod button;
mod field_renderer;

use crate::app::{App, Focus};
use button::{render_button, BUTTON_HEIGHT};
use field_renderer::{draw_field, FIELD_HEIGHT};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};
use signup_form::form::{FieldName, SubmissionPhase};

/// Maximum width of the form
const FORM_WIDTH: u16 = 50;

const SPINNER: [&str; 4] = ["|", "/", "-", "\\"];

/// Main draw function
pub fn draw(frame: &mut Frame, app: &App) {
    let area = centered(frame.area());

    let block = Block::default()
        .title(Span::styled(
            " User form ",
            Style::default().add_modifier(Modifier::BOLD),
        ))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let mut constraints: Vec<Constraint> = FieldName::ALL
        .iter()
        .map(|_| Constraint::Length(FIELD_HEIGHT))
        .collect();
    constraints.push(Constraint::Length(BUTTON_HEIGHT));
    constraints.push(Constraint::Min(2)); // Banner
    constraints.push(Constraint::Length(1)); // Help

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .margin(1)
        .split(inner);

    let visible = app.controller.visible_errors();
    for (index, field) in FieldName::ALL.iter().enumerate() {
        draw_field(
            frame,
            chunks[index],
            *field,
            app.controller.form().value(*field),
            visible.get(*field),
            app.focus == Focus::Field(*field),
        );
    }

    let submitting = app.controller.is_submitting();
    let label = if submitting {
        format!("{} Sign Up", SPINNER[app.tick % SPINNER.len()])
    } else {
        "Sign Up".to_string()
    };
    render_button(
        frame,
        chunks[4],
        &label,
        app.focus == Focus::SubmitButton,
        !submitting,
    );

    draw_banner(frame, chunks[5], app.controller.phase());
    draw_help(frame, chunks[6]);
}

/// Success or failure message of the last submission
fn draw_banner(frame: &mut Frame, area: Rect, phase: &SubmissionPhase) {
    let (text, color) = match phase {
        SubmissionPhase::Success => ("Registration successful! Welcome.".to_string(), Color::Green),
        SubmissionPhase::Error(message) => (format!("Registration failed. {message}"), Color::Red),
        SubmissionPhase::Idle | SubmissionPhase::Submitting => return,
    };

    let banner = Paragraph::new(Line::from(Span::styled(
        text,
        Style::default().fg(color).add_modifier(Modifier::BOLD),
    )))
    .wrap(Wrap { trim: true });
    frame.render_widget(banner, area);
}

fn draw_help(frame: &mut Frame, area: Rect) {
    let help = Paragraph::new(Line::from(vec![
        Span::styled("Tab", Style::default().fg(Color::Cyan)),
        Span::raw(" next  "),
        Span::styled("Enter", Style::default().fg(Color::Cyan)),
        Span::raw(" sign up  "),
        Span::styled("Esc", Style::default().fg(Color::Cyan)),
        Span::raw(" quit"),
    ]))
    .style(Style::default().fg(Color::DarkGray));
    frame.render_widget(help, area);
}

/// Center the form horizontally, keeping the full height
fn centered(area: Rect) -> Rect {
    let width = FORM_WIDTH.min(area.width);
    Rect {
        x: area.x + (area.width - width) / 2,
        width,
        ..area
    }
}
