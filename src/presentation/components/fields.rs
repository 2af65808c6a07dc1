use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
};
use unicode_width::UnicodeWidthStr;

use crate::{
    domain::Tab,
    form::{Background, FieldControl, FormStore, render_field},
};

use super::super::view::Focus;

const FIELD_MIN_WIDTH: usize = 16;
const DATE_HINT: &str = "YYYY-MM-DD";
const HIGHLIGHT_SYMBOL: &str = "» ";

pub fn render_fields(
    frame: &mut Frame<'_>,
    area: Rect,
    tab: Option<&Tab>,
    store: &FormStore,
    focus: Option<Focus>,
    enable_cursor: bool,
) {
    let Some(tab) = tab else {
        let placeholder =
            Paragraph::new("No tab selected").block(Block::default().borders(Borders::ALL));
        frame.render_widget(placeholder, area);
        return;
    };

    if tab.fields.is_empty() {
        let placeholder = Paragraph::new("This tab has no fields")
            .block(Block::default().title(tab.label.clone()).borders(Borders::ALL));
        frame.render_widget(placeholder, area);
        return;
    }

    let label_width = tab
        .fields
        .iter()
        .map(|field| UnicodeWidthStr::width(field.label.as_str()))
        .max()
        .unwrap_or(0);
    let selected = match focus {
        Some(Focus::Field(index)) if index < tab.fields.len() => Some(index),
        _ => None,
    };

    let mut cursor_column = None;
    let items = tab
        .fields
        .iter()
        .enumerate()
        .map(|(index, field)| {
            let focused = selected == Some(index);
            let control = render_field(field, store.get(&field.id));
            let mut spans = vec![label_span(&field.label, label_width, focused)];
            spans.extend(control_spans(&control, focused));
            if focused {
                cursor_column = cursor_offset(&control);
            }
            ListItem::new(Line::from(spans))
        })
        .collect::<Vec<_>>();

    let mut list_state = ListState::default();
    list_state.select(selected);
    let list = List::new(items)
        .block(Block::default().title(tab.label.clone()).borders(Borders::ALL))
        .highlight_symbol(HIGHLIGHT_SYMBOL);
    frame.render_stateful_widget(list, area, &mut list_state);

    if enable_cursor
        && let (Some(row), Some(column)) = (selected, cursor_column)
        && row >= list_state.offset()
    {
        let symbol_width = UnicodeWidthStr::width(HIGHLIGHT_SYMBOL) as u16;
        let x = area
            .x
            .saturating_add(1)
            .saturating_add(symbol_width)
            .saturating_add(label_width as u16 + 1)
            .saturating_add(column);
        let y = area
            .y
            .saturating_add(1)
            .saturating_add((row - list_state.offset()) as u16);
        frame.set_cursor_position((x, y));
    }
}

pub(super) fn label_span(label: &str, width: usize, focused: bool) -> Span<'static> {
    let pad = width.saturating_sub(UnicodeWidthStr::width(label));
    let style = if focused {
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD)
    };
    Span::styled(format!("{label}{} ", " ".repeat(pad)), style)
}

pub(super) fn background_style(background: Background) -> Style {
    let base = Style::default().fg(Color::Black);
    match background {
        Background::Yellow => base.bg(Color::LightYellow),
        Background::White => base.bg(Color::White),
    }
}

/// Spans drawing a control after its label. `Nothing` draws nothing.
pub(super) fn control_spans(control: &FieldControl, focused: bool) -> Vec<Span<'static>> {
    let emphasis = if focused {
        Modifier::BOLD
    } else {
        Modifier::empty()
    };
    match control {
        FieldControl::TextInput {
            value,
            placeholder,
            background,
        } => vec![input_box(
            value,
            placeholder.as_deref(),
            background_style(*background).add_modifier(emphasis),
        )],
        FieldControl::DatePicker { value, background } => vec![input_box(
            value,
            Some(DATE_HINT),
            background_style(*background).add_modifier(emphasis),
        )],
        FieldControl::Dropdown {
            choices,
            selected,
            background,
        } => {
            let value = choices.get(*selected).map(String::as_str).unwrap_or("");
            vec![Span::styled(
                format!(" {} ▾ ", pad_to(value, FIELD_MIN_WIDTH)),
                background_style(*background).add_modifier(emphasis),
            )]
        }
        FieldControl::RadioGroup {
            options,
            checked,
            background,
            ..
        } => {
            let style = background_style(*background);
            let mut spans = Vec::with_capacity(options.len() * 2);
            for (index, option) in options.iter().enumerate() {
                if index > 0 {
                    spans.push(Span::raw(" "));
                }
                let is_checked = *checked == Some(index);
                let mark = if is_checked { "(●)" } else { "( )" };
                let option_style = if is_checked {
                    style.add_modifier(Modifier::BOLD)
                } else {
                    style
                };
                spans.push(Span::styled(
                    format!(" {mark} {option} "),
                    option_style.add_modifier(emphasis),
                ));
            }
            spans
        }
        FieldControl::Nothing => Vec::new(),
    }
}

/// Columns from the start of the control to the text cursor, for editable
/// text-like controls.
pub(super) fn cursor_offset(control: &FieldControl) -> Option<u16> {
    match control {
        FieldControl::TextInput { value, .. } | FieldControl::DatePicker { value, .. } => {
            Some(1 + UnicodeWidthStr::width(value.as_str()) as u16)
        }
        _ => None,
    }
}

fn input_box(value: &str, placeholder: Option<&str>, style: Style) -> Span<'static> {
    match placeholder {
        Some(hint) if value.is_empty() => Span::styled(
            format!(" {} ", pad_to(hint, FIELD_MIN_WIDTH)),
            style.fg(Color::DarkGray).add_modifier(Modifier::ITALIC),
        ),
        _ => Span::styled(format!(" {} ", pad_to(value, FIELD_MIN_WIDTH)), style),
    }
}

fn pad_to(text: &str, width: usize) -> String {
    let pad = width.saturating_sub(UnicodeWidthStr::width(text));
    format!("{text}{}", " ".repeat(pad))
}
