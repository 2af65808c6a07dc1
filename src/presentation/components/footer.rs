use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Paragraph, Wrap},
};

use crate::form::SchemaStatus;

use super::super::view::UiContext;

pub fn render_footer(frame: &mut Frame<'_>, area: Rect, ctx: &UiContext<'_>) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(2), Constraint::Length(2)])
        .split(area);

    let actions = ctx.help.unwrap_or(" ");
    let actions_widget = Paragraph::new(format!("Actions: {actions}"))
        .wrap(Wrap { trim: true })
        .style(Style::default().fg(Color::Yellow));
    frame.render_widget(actions_widget, rows[0]);

    let status = if ctx.status_message.trim().is_empty() {
        "Ready"
    } else {
        ctx.status_message
    };
    let badge = match ctx.session.status() {
        SchemaStatus::Ready => Span::styled("[ok]", Style::default().fg(Color::Green)),
        SchemaStatus::Loading => Span::styled("[…]", Style::default().fg(Color::Yellow)),
        SchemaStatus::Missing => Span::styled(
            "[no schema]",
            Style::default().fg(Color::Red).bg(Color::Black),
        ),
    };

    let status_widget = Paragraph::new(Line::from(vec![
        Span::raw("Status: "),
        Span::raw(status.to_string()),
        Span::raw(" "),
        badge,
    ]))
    .wrap(Wrap { trim: true });
    frame.render_widget(status_widget, rows[1]);
}
