use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use tabform::{
    Field, FieldKind,
    form::{Background, FieldControl, edit_value, render_field},
};

fn key(code: KeyCode) -> KeyEvent {
    KeyEvent::new(code, KeyModifiers::NONE)
}

#[test]
fn controls_reflect_store_value() {
    let field = Field::new(
        "kind",
        "Kind",
        FieldKind::Select {
            options: vec!["A".into(), "B".into()],
        },
    );
    let control = render_field(&field, "B");
    assert_eq!(control.choices().map(|(_, selected)| selected), Some(2));
    assert_eq!(control.background(), Some(Background::Yellow));
}

#[test]
fn date_keyed_text_is_highlighted() {
    let field = Field::new("claim_date", "Claim date", FieldKind::Text { placeholder: None });
    assert_eq!(render_field(&field, "").background(), Some(Background::Yellow));
}

#[test]
fn radio_group_is_named_after_the_field() {
    let field = Field::new(
        "plan",
        "Plan",
        FieldKind::Radio {
            options: vec!["basic".into(), "premium".into()],
        },
    );
    match render_field(&field, "premium") {
        FieldControl::RadioGroup { group, checked, .. } => {
            assert_eq!(group, "plan");
            assert_eq!(checked, Some(1));
        }
        other => panic!("unexpected control {other:?}"),
    }
}

#[test]
fn unknown_type_renders_nothing_and_ignores_keys() {
    let field = Field::new("x", "X", FieldKind::from_parts("slider", None, None));
    assert_eq!(render_field(&field, "5"), FieldControl::Nothing);
    assert_eq!(edit_value(&field, "5", &key(KeyCode::Char('1'))), None);
}

#[test]
fn date_input_rejects_non_date_characters() {
    let field = Field::new("d", "D", FieldKind::Date);
    assert_eq!(edit_value(&field, "2024", &key(KeyCode::Char('x'))), None);
    assert_eq!(
        edit_value(&field, "2024", &key(KeyCode::Char('-'))),
        Some("2024-".to_string())
    );
    assert_eq!(
        edit_value(&field, "2024-02-28", &key(KeyCode::Right)),
        Some("2024-02-29".to_string())
    );
}

#[test]
fn select_cycles_through_empty_choice() {
    let field = Field::new(
        "kind",
        "Kind",
        FieldKind::Select {
            options: vec!["A".into(), "B".into()],
        },
    );
    assert_eq!(edit_value(&field, "B", &key(KeyCode::Right)), Some(String::new()));
    assert_eq!(edit_value(&field, "", &key(KeyCode::Right)), Some("A".to_string()));
}
