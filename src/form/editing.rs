use std::sync::LazyLock;

use chrono::{Local, NaiveDate};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use regex::Regex;

use crate::domain::{Field, FieldKind};

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Prefixes of `YYYY-MM-DD` that may still grow into a full date.
static PARTIAL_DATE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(\d{0,3}|\d{4}(-(\d?|\d{2}(-\d{0,2})?))?)$").expect("valid date mask")
});

/// Produce the value a key press turns `current` into, or `None` when the key
/// does not change the field. The caller writes the result into the store.
pub fn edit_value(field: &Field, current: &str, key: &KeyEvent) -> Option<String> {
    match &field.kind {
        FieldKind::Text { .. } => edit_text(current, key),
        FieldKind::Date => edit_date(current, key),
        FieldKind::Select { options } => edit_select(options, current, key),
        FieldKind::Radio { options } => edit_radio(options, current, key),
        FieldKind::Unknown(_) => None,
    }
}

pub(crate) fn edit_text(current: &str, key: &KeyEvent) -> Option<String> {
    match key.code {
        KeyCode::Char(ch) => {
            if key.modifiers.contains(KeyModifiers::CONTROL) {
                return None;
            }
            let mut next = current.to_string();
            next.push(ch);
            Some(next)
        }
        KeyCode::Backspace => {
            let mut next = current.to_string();
            next.pop()?;
            Some(next)
        }
        KeyCode::Delete if !current.is_empty() => Some(String::new()),
        _ => None,
    }
}

fn edit_date(current: &str, key: &KeyEvent) -> Option<String> {
    match key.code {
        KeyCode::Char(ch) if ch.is_ascii_digit() || ch == '-' => {
            let next = edit_text(current, key)?;
            PARTIAL_DATE.is_match(&next).then_some(next)
        }
        KeyCode::Char(_) => None,
        KeyCode::Left => step_date(current, -1),
        KeyCode::Right => step_date(current, 1),
        _ => edit_text(current, key),
    }
}

fn step_date(current: &str, days: i64) -> Option<String> {
    let date = if current.is_empty() {
        Local::now().date_naive()
    } else {
        let parsed = NaiveDate::parse_from_str(current, DATE_FORMAT).ok()?;
        if days >= 0 {
            parsed.succ_opt()?
        } else {
            parsed.pred_opt()?
        }
    };
    Some(date.format(DATE_FORMAT).to_string())
}

fn edit_select(options: &[String], current: &str, key: &KeyEvent) -> Option<String> {
    // Position 0 is the empty choice.
    let len = options.len() + 1;
    let position = options
        .iter()
        .position(|option| option == current)
        .map(|index| index + 1)
        .unwrap_or(0);
    let next = match key.code {
        KeyCode::Left => (position + len - 1) % len,
        KeyCode::Right => (position + 1) % len,
        KeyCode::Backspace | KeyCode::Delete => 0,
        _ => return None,
    };
    let value = if next == 0 {
        String::new()
    } else {
        options[next - 1].clone()
    };
    (value != current).then_some(value)
}

fn edit_radio(options: &[String], current: &str, key: &KeyEvent) -> Option<String> {
    if options.is_empty() {
        return None;
    }
    let len = options.len();
    let position = options.iter().position(|option| option == current);
    let next = match (key.code, position) {
        (KeyCode::Right | KeyCode::Char(' '), None) => 0,
        (KeyCode::Left, None) => len - 1,
        (KeyCode::Right | KeyCode::Char(' '), Some(at)) => (at + 1) % len,
        (KeyCode::Left, Some(at)) => (at + len - 1) % len,
        _ => return None,
    };
    let value = options[next].clone();
    (value != current).then_some(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn date_field() -> Field {
        Field::new("d", "D", FieldKind::Date)
    }

    #[test]
    fn text_ignores_control_chords() {
        let chord = KeyEvent::new(KeyCode::Char('s'), KeyModifiers::CONTROL);
        assert_eq!(edit_text("ab", &chord), None);
        assert_eq!(edit_text("ab", &key(KeyCode::Char('c'))).as_deref(), Some("abc"));
    }

    #[test]
    fn backspace_on_empty_text_changes_nothing() {
        assert_eq!(edit_text("", &key(KeyCode::Backspace)), None);
        assert_eq!(edit_text("松山", &key(KeyCode::Backspace)).as_deref(), Some("松"));
    }

    #[test]
    fn date_mask_accepts_only_date_prefixes() {
        let field = date_field();
        assert_eq!(
            edit_value(&field, "2024", &key(KeyCode::Char('-'))).as_deref(),
            Some("2024-")
        );
        assert_eq!(edit_value(&field, "20", &key(KeyCode::Char('-'))), None);
        assert_eq!(edit_value(&field, "2024-1", &key(KeyCode::Char('x'))), None);
        assert_eq!(edit_value(&field, "2024-12-31", &key(KeyCode::Char('1'))), None);
    }

    #[test]
    fn date_arrows_step_whole_days() {
        let field = date_field();
        assert_eq!(
            edit_value(&field, "2024-02-28", &key(KeyCode::Right)).as_deref(),
            Some("2024-02-29")
        );
        assert_eq!(
            edit_value(&field, "2024-03-01", &key(KeyCode::Left)).as_deref(),
            Some("2024-02-29")
        );
        assert_eq!(edit_value(&field, "2024-0", &key(KeyCode::Right)), None);
    }

    #[test]
    fn select_cycles_through_empty_choice() {
        let field = Field::new(
            "f1",
            "F1",
            FieldKind::Select {
                options: vec!["A".into(), "B".into()],
            },
        );
        assert_eq!(edit_value(&field, "", &key(KeyCode::Right)).as_deref(), Some("A"));
        assert_eq!(edit_value(&field, "B", &key(KeyCode::Right)).as_deref(), Some(""));
        assert_eq!(edit_value(&field, "", &key(KeyCode::Left)).as_deref(), Some("B"));
        assert_eq!(edit_value(&field, "", &key(KeyCode::Delete)), None);
    }

    #[test]
    fn radio_starts_from_first_option() {
        let field = Field::new(
            "r",
            "R",
            FieldKind::Radio {
                options: vec!["x".into(), "y".into()],
            },
        );
        assert_eq!(edit_value(&field, "", &key(KeyCode::Right)).as_deref(), Some("x"));
        assert_eq!(edit_value(&field, "x", &key(KeyCode::Left)).as_deref(), Some("y"));
        assert_eq!(edit_value(&field, "x", &key(KeyCode::Char('z'))), None);
    }

    #[test]
    fn unknown_fields_never_change() {
        let field = Field::new("u", "U", FieldKind::Unknown("slider".into()));
        assert_eq!(edit_value(&field, "", &key(KeyCode::Char('a'))), None);
    }
}
