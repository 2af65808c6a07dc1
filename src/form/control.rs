use crate::domain::{Field, FieldKind};

/// Cosmetic background hint carried over from the paper form: yellow marks
/// the boxes that were filled in red ink. It has no validation meaning.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Background {
    Yellow,
    White,
}

/// Description of the control drawn for one field. Always built from the
/// value held in the form store; controls keep no state of their own.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldControl {
    TextInput {
        value: String,
        placeholder: Option<String>,
        background: Background,
    },
    DatePicker {
        value: String,
        background: Background,
    },
    /// `choices[0]` is the empty, unselected choice.
    Dropdown {
        choices: Vec<String>,
        selected: usize,
        background: Background,
    },
    RadioGroup {
        group: String,
        options: Vec<String>,
        checked: Option<usize>,
        background: Background,
    },
    Nothing,
}

impl FieldControl {
    pub fn background(&self) -> Option<Background> {
        match self {
            FieldControl::TextInput { background, .. }
            | FieldControl::DatePicker { background, .. }
            | FieldControl::Dropdown { background, .. }
            | FieldControl::RadioGroup { background, .. } => Some(*background),
            FieldControl::Nothing => None,
        }
    }

    /// Values selectable through a choice list, with the current position.
    pub fn choices(&self) -> Option<(&[String], usize)> {
        match self {
            FieldControl::Dropdown {
                choices, selected, ..
            } => Some((choices, *selected)),
            FieldControl::RadioGroup {
                options, checked, ..
            } => Some((options, checked.unwrap_or(0))),
            _ => None,
        }
    }

    /// Value written to the store when choice `index` is picked.
    pub fn choice_value(&self, index: usize) -> Option<String> {
        self.choices()
            .and_then(|(choices, _)| choices.get(index))
            .cloned()
    }
}

/// Map a field and its current value to the control that represents it.
pub fn render_field(field: &Field, current: &str) -> FieldControl {
    match &field.kind {
        FieldKind::Text { placeholder } => FieldControl::TextInput {
            value: current.to_string(),
            placeholder: placeholder.clone(),
            background: if field.id.contains("date") {
                Background::Yellow
            } else {
                Background::White
            },
        },
        FieldKind::Date => FieldControl::DatePicker {
            value: current.to_string(),
            background: Background::Yellow,
        },
        FieldKind::Select { options } => {
            let mut choices = Vec::with_capacity(options.len() + 1);
            choices.push(String::new());
            choices.extend(options.iter().cloned());
            let selected = options
                .iter()
                .position(|option| option == current)
                .map(|index| index + 1)
                .unwrap_or(0);
            FieldControl::Dropdown {
                choices,
                selected,
                background: Background::Yellow,
            }
        }
        FieldKind::Radio { options } => FieldControl::RadioGroup {
            group: field.id.clone(),
            options: options.clone(),
            checked: options.iter().position(|option| option == current),
            background: Background::White,
        },
        FieldKind::Unknown(_) => FieldControl::Nothing,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn text_background_follows_id() {
        let plain = Field::new("name", "Name", FieldKind::Text { placeholder: None });
        let dated = Field::new("start_date", "Start", FieldKind::Text { placeholder: None });
        assert_eq!(render_field(&plain, "").background(), Some(Background::White));
        assert_eq!(render_field(&dated, "").background(), Some(Background::Yellow));
    }

    #[test]
    fn dropdown_with_unlisted_value_shows_empty_choice() {
        let field = Field::new(
            "f",
            "F",
            FieldKind::Select {
                options: vec!["A".into()],
            },
        );
        let control = render_field(&field, "Z");
        assert_eq!(control.choices(), Some((&["".to_string(), "A".to_string()][..], 0)));
    }

    #[test]
    fn radio_choice_value_maps_index_to_option() {
        let field = Field::new(
            "g",
            "G",
            FieldKind::Radio {
                options: vec!["yes".into(), "no".into()],
            },
        );
        let control = render_field(&field, "no");
        assert_eq!(control.choices().map(|(_, at)| at), Some(1));
        assert_eq!(control.choice_value(0).as_deref(), Some("yes"));
        assert_eq!(control.choice_value(9), None);
    }
}
