use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
};
use textwrap::wrap;
use unicode_width::UnicodeWidthStr;

use super::super::view::EditorRender;
use super::layout::percent_rect;

const TITLE: &str = "Edit form schema (JSON) • Ctrl+S apply • Esc cancel";

pub fn render_editor(frame: &mut Frame<'_>, editor: &EditorRender<'_>) {
    let area = percent_rect(frame.area(), 80, 80);
    frame.render_widget(Clear, area);

    let block = Block::default()
        .title(TITLE)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let error_lines = editor
        .error
        .map(|error| wrap(error, inner.width.max(1) as usize))
        .unwrap_or_default();
    let error_height = (error_lines.len() as u16).min(inner.height / 2);
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(1), Constraint::Length(error_height)])
        .split(inner);
    let text_area = chunks[0];

    let (row, column) = editor.cursor;
    let height = text_area.height.max(1) as usize;
    let top = (row + 1).saturating_sub(height);
    let prefix_width = editor
        .lines
        .get(row)
        .map(|line| {
            let prefix: String = line.chars().take(column).collect();
            UnicodeWidthStr::width(prefix.as_str())
        })
        .unwrap_or(0);
    let left = (prefix_width + 1).saturating_sub(text_area.width.max(1) as usize);

    let text = editor
        .lines
        .iter()
        .skip(top)
        .take(height)
        .map(|line| Line::from(line.as_str()))
        .collect::<Vec<_>>();
    frame.render_widget(Paragraph::new(text).scroll((0, left as u16)), text_area);

    if error_height > 0 {
        let error_style = Style::default().fg(Color::Red).add_modifier(Modifier::BOLD);
        let lines = error_lines
            .into_iter()
            .map(|segment| Line::from(Span::styled(segment.into_owned(), error_style)))
            .collect::<Vec<_>>();
        frame.render_widget(Paragraph::new(lines), chunks[1]);
    }

    frame.set_cursor_position((
        text_area.x + (prefix_width - left) as u16,
        text_area.y + (row - top) as u16,
    ));
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::{Terminal, backend::TestBackend};

    fn draw_editor(lines: &[String], cursor: (usize, usize), error: Option<&str>) -> String {
        let mut terminal = Terminal::new(TestBackend::new(60, 20)).unwrap();
        terminal
            .draw(|frame| {
                render_editor(
                    frame,
                    &EditorRender {
                        lines,
                        cursor,
                        error,
                    },
                )
            })
            .unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    #[test]
    fn shows_text_and_error() {
        let lines = vec!["{".to_string(), "  \"tabs\": [".to_string(), "}".to_string()];
        let text = draw_editor(&lines, (1, 3), Some("expected value at line 3"));
        assert!(text.contains("\"tabs\": ["));
        assert!(text.contains("expected value"));
        assert!(text.contains("Ctrl+S apply"));
    }

    #[test]
    fn scrolls_to_keep_cursor_row_visible() {
        let lines = (0..40).map(|n| format!("line-{n}")).collect::<Vec<_>>();
        let text = draw_editor(&lines, (39, 0), None);
        assert!(text.contains("line-39"));
        assert!(!text.contains("line-0 "));
    }
}
