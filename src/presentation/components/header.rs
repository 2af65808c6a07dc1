use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::Line,
    widgets::{Block, Borders, Paragraph},
};
use unicode_width::UnicodeWidthStr;

use crate::form::{FormStore, HEADER_FIELDS};

use super::{
    super::view::Focus,
    fields::{control_spans, cursor_offset, label_span},
};

pub fn render_header(
    frame: &mut Frame<'_>,
    area: Rect,
    title: &str,
    store: &FormStore,
    focus: Option<Focus>,
    enable_cursor: bool,
) {
    let label_width = HEADER_FIELDS
        .iter()
        .map(|header| UnicodeWidthStr::width(header.label()))
        .max()
        .unwrap_or(0);

    let mut cursor = None;
    let lines = HEADER_FIELDS
        .iter()
        .enumerate()
        .map(|(index, header)| {
            let focused = focus == Some(Focus::Header(index));
            let control = header.control(store);
            let mut spans = vec![label_span(header.label(), label_width, focused)];
            let mut value_spans = control_spans(&control, focused);
            if header.shows_default(store) {
                for span in &mut value_spans {
                    span.style = span.style.fg(Color::DarkGray);
                }
            }
            spans.extend(value_spans);
            if focused {
                cursor = cursor_offset(&control)
                    .map(|offset| (index, label_width as u16 + 1 + offset));
            }
            Line::from(spans)
        })
        .collect::<Vec<_>>();

    let block = Block::default()
        .title(Line::styled(
            title.to_string(),
            Style::default().add_modifier(Modifier::BOLD),
        ))
        .borders(Borders::ALL);
    frame.render_widget(Paragraph::new(lines).block(block), area);

    if enable_cursor && let Some((row, column)) = cursor {
        frame.set_cursor_position((
            area.x.saturating_add(1).saturating_add(column),
            area.y.saturating_add(1).saturating_add(row as u16),
        ));
    }
}
