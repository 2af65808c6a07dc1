use crate::{
    form::FieldControl,
    presentation::PopupRender,
};

const EMPTY_CHOICE_LABEL: &str = "(none)";

/// Choice list opened over a dropdown or radio group.
pub(crate) struct PopupState {
    field_id: String,
    title: String,
    control: FieldControl,
    labels: Vec<String>,
    selected: usize,
}

impl PopupState {
    pub(crate) fn from_control(
        field_id: impl Into<String>,
        title: impl Into<String>,
        control: FieldControl,
    ) -> Option<Self> {
        let (choices, selected) = control.choices()?;
        if choices.is_empty() {
            return None;
        }
        let labels = choices
            .iter()
            .map(|choice| {
                if choice.is_empty() {
                    EMPTY_CHOICE_LABEL.to_string()
                } else {
                    choice.clone()
                }
            })
            .collect();
        Some(Self {
            field_id: field_id.into(),
            title: title.into(),
            labels,
            selected,
            control,
        })
    }

    pub(crate) fn select_previous(&mut self) {
        if self.labels.is_empty() {
            return;
        }
        if self.selected == 0 {
            self.selected = self.labels.len().saturating_sub(1);
        } else {
            self.selected -= 1;
        }
    }

    pub(crate) fn select_next(&mut self) {
        if self.labels.is_empty() {
            return;
        }
        self.selected = (self.selected + 1) % self.labels.len();
    }

    pub(crate) fn field_id(&self) -> &str {
        &self.field_id
    }

    /// Value to store for the highlighted choice.
    pub(crate) fn chosen_value(&self) -> Option<String> {
        self.control.choice_value(self.selected)
    }

    pub(crate) fn as_render(&self) -> PopupRender<'_> {
        PopupRender {
            title: &self.title,
            options: &self.labels,
            selected: self.selected,
        }
    }
}
