use std::ops::Range;

use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Tabs},
};
use unicode_width::UnicodeWidthStr;

const LEFT_MORE: &str = "◀";
const RIGHT_MORE: &str = "▶";
// " label " plus the divider drawn between tabs
const TAB_CHROME: usize = 3;

pub(crate) fn render_tab_strip(frame: &mut Frame<'_>, area: Rect, titles: &[String], selected: usize) {
    let block = Block::default().title("Tabs").borders(Borders::ALL);
    if titles.is_empty() {
        frame.render_widget(block, area);
        return;
    }

    let selected = selected.min(titles.len() - 1);
    let widths = titles
        .iter()
        .map(|title| UnicodeWidthStr::width(title.as_str()) + TAB_CHROME)
        .collect::<Vec<_>>();
    let available = area.width.saturating_sub(2) as usize;
    let window = visible_window(&widths, selected, available);

    let more_style = Style::default().fg(Color::DarkGray);
    let last = window.end - 1;
    let labels = window
        .clone()
        .map(|index| {
            let mut spans = Vec::with_capacity(3);
            if index == window.start && window.start > 0 {
                spans.push(Span::styled(LEFT_MORE, more_style));
            }
            spans.push(Span::raw(titles[index].clone()));
            if index == last && window.end < titles.len() {
                spans.push(Span::styled(RIGHT_MORE, more_style));
            }
            Line::from(spans)
        })
        .collect::<Vec<_>>();

    let tabs = Tabs::new(labels)
        .block(block)
        .select(selected - window.start)
        .style(Style::default().fg(Color::Gray))
        .highlight_style(
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
        );
    frame.render_widget(tabs, area);
}

/// Range of tabs to draw. Grows outward from `selected`, preferring the
/// right side, until the next tab no longer fits.
fn visible_window(widths: &[usize], selected: usize, available: usize) -> Range<usize> {
    let mut start = selected;
    let mut end = selected + 1;
    let mut used = widths[selected];
    loop {
        let mut grew = false;
        if end < widths.len() && used + widths[end] <= available {
            used += widths[end];
            end += 1;
            grew = true;
        }
        if start > 0 && used + widths[start - 1] <= available {
            start -= 1;
            used += widths[start];
            grew = true;
        }
        if !grew {
            break;
        }
    }
    start..end
}
