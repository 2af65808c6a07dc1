use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};
use textwrap::wrap;

use crate::form::SchemaStatus;

use super::{
    super::view::UiContext, fields::render_fields, header::render_header,
    tabstrip::render_tab_strip,
};

pub fn render_body(frame: &mut Frame<'_>, area: Rect, ctx: &UiContext<'_>, enable_cursor: bool) {
    match ctx.session.status() {
        SchemaStatus::Loading => {
            let placeholder = Paragraph::new(format!("Loading form schema from {}…", ctx.source_label))
                .block(Block::default().borders(Borders::ALL));
            frame.render_widget(placeholder, area);
        }
        SchemaStatus::Missing => render_missing(frame, area, ctx),
        SchemaStatus::Ready => render_form(frame, area, ctx, enable_cursor),
    }
}

fn render_form(frame: &mut Frame<'_>, area: Rect, ctx: &UiContext<'_>, enable_cursor: bool) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(5),
            Constraint::Length(3),
            Constraint::Min(3),
        ])
        .split(area);

    let session = ctx.session;
    let title = ctx.title.unwrap_or("Form");
    render_header(frame, chunks[0], title, session.values(), ctx.focus, enable_cursor);

    let (titles, selected) = session
        .schema()
        .map(|schema| {
            let titles = schema
                .tabs
                .iter()
                .map(|tab| tab.label.clone())
                .collect::<Vec<_>>();
            let selected = schema.tab_position(session.active_tab_id()).unwrap_or(0);
            (titles, selected)
        })
        .unwrap_or_default();
    render_tab_strip(frame, chunks[1], &titles, selected);

    render_fields(
        frame,
        chunks[2],
        session.active_tab(),
        session.values(),
        ctx.focus,
        enable_cursor,
    );
}

fn render_missing(frame: &mut Frame<'_>, area: Rect, ctx: &UiContext<'_>) {
    let width = area.width.saturating_sub(4).max(10) as usize;
    let mut lines = vec![
        Line::from(Span::styled(
            "Schema not found",
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        )),
        Line::from(format!("source: {}", ctx.source_label)),
        Line::from(""),
    ];
    if let Some(error) = ctx.session.last_error() {
        lines.extend(
            wrap(error, width)
                .into_iter()
                .map(|segment| Line::from(segment.into_owned())),
        );
        lines.push(Line::from(""));
    }
    lines.push(Line::from(Span::styled(
        "Press Ctrl+R to retry or Ctrl+O to write a schema in the editor.",
        Style::default().fg(Color::Yellow),
    )));
    let notice = Paragraph::new(lines).block(
        Block::default()
            .title("Form schema")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Red)),
    );
    frame.render_widget(notice, area);
}
