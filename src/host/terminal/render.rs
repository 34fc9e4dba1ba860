//! Drawing the form with ratatui.

use super::form::{Field, Form};
use crate::constants::HELP_PANEL_WIDTH_PERCENT;
use crate::widget::WidgetType;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph, Wrap},
    Frame,
};

/// Rounded frame around a form panel, titled in its accent color.
fn panel_block(title: &str, accent: Color) -> Block<'_> {
    Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .title(title)
        .title_style(Style::default().fg(accent).add_modifier(Modifier::BOLD))
        .style(Style::default().fg(accent))
}

/// One entry of the key bar under the form.
#[derive(Debug, Clone, Copy)]
pub struct KeyHint {
    pub key: &'static str,
    pub action: &'static str,
    pub color: Color,
}

/// Keys understood by [`Form::handle_key`], in display order.
pub const KEY_HINTS: [KeyHint; 5] = [
    KeyHint { key: "Tab", action: "Next field", color: Color::Cyan },
    KeyHint { key: "Enter", action: "Activate", color: Color::Green },
    KeyHint { key: "Space", action: "Toggle", color: Color::Yellow },
    KeyHint { key: "F1", action: "Help", color: Color::Magenta },
    KeyHint { key: "Esc", action: "Abort", color: Color::Red },
];

const HINT_SEPARATOR: &str = " • ";

pub fn key_bar_spans(hints: &[KeyHint]) -> Vec<Span<'static>> {
    let mut spans = Vec::with_capacity(hints.len() * 3);
    for (index, hint) in hints.iter().enumerate() {
        if index > 0 {
            spans.push(Span::styled(HINT_SEPARATOR, Style::default().fg(Color::Gray)));
        }
        spans.push(Span::styled(
            hint.key,
            Style::default().fg(hint.color).add_modifier(Modifier::BOLD),
        ));
        spans.push(Span::styled(format!(" {}", hint.action), Style::default().fg(Color::Gray)));
    }
    spans
}

pub fn render_form(f: &mut Frame, form: &Form) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(3), Constraint::Length(1)])
        .split(f.area());

    let body = if form.show_help && !form.help.is_empty() {
        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Percentage(100 - HELP_PANEL_WIDTH_PERCENT),
                Constraint::Percentage(HELP_PANEL_WIDTH_PERCENT),
            ])
            .split(rows[0]);
        render_help(f, columns[1], &form.help);
        columns[0]
    } else {
        rows[0]
    };

    render_fields(f, body, form);

    let key_bar = Paragraph::new(Line::from(key_bar_spans(&KEY_HINTS))).alignment(Alignment::Center);
    f.render_widget(key_bar, rows[1]);
}

fn render_fields(f: &mut Frame, area: Rect, form: &Form) {
    let mut lines: Vec<Line> = Vec::new();
    let mut buttons: Vec<Span> = Vec::new();

    for (index, field) in form.fields.iter().enumerate() {
        let style = field_style(field, index == form.focus);
        if field.widget_type == WidgetType::PushButton {
            buttons.push(Span::styled(format!("[ {} ]", field.label), style));
            buttons.push(Span::raw("  "));
            continue;
        }
        lines.push(Line::from(vec![
            Span::styled(format!("{}: ", field.label), style),
            Span::styled(field.display_value(), style.add_modifier(Modifier::UNDERLINED)),
        ]));
    }
    lines.push(Line::default());
    lines.push(Line::from(buttons).alignment(Alignment::Right));

    let paragraph = Paragraph::new(lines)
        .block(panel_block(&form.title, Color::Cyan))
        .wrap(Wrap { trim: false });
    f.render_widget(paragraph, area);
}

fn render_help(f: &mut Frame, area: Rect, help: &str) {
    let paragraph = Paragraph::new(help.to_string())
        .block(panel_block(" Help ", Color::Magenta))
        .style(Style::default().fg(Color::White))
        .wrap(Wrap { trim: true });
    f.render_widget(paragraph, area);
}

fn field_style(field: &Field, focused: bool) -> Style {
    if !field.enabled {
        Style::default().fg(Color::DarkGray)
    } else if focused {
        Style::default().fg(Color::Black).bg(Color::Cyan).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::White)
    }
}
