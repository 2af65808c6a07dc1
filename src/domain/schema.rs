/// A tabbed form configuration. Tab order is display order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FormSchema {
    pub tabs: Vec<Tab>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Tab {
    pub id: String,
    pub label: String,
    pub fields: Vec<Field>,
}

/// A single form field. `id` is the key used in the form store and is only
/// unique within its tab.
#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    pub id: String,
    pub label: String,
    pub kind: FieldKind,
}

#[derive(Debug, Clone, PartialEq)]
pub enum FieldKind {
    Text { placeholder: Option<String> },
    Date,
    Select { options: Vec<String> },
    Radio { options: Vec<String> },
    /// Unrecognised `type`; such fields render no control.
    Unknown(String),
}

impl FieldKind {
    /// Build a kind from the raw document attributes. This is the only place
    /// the `type` string is inspected.
    pub fn from_parts(
        kind: &str,
        options: Option<Vec<String>>,
        placeholder: Option<String>,
    ) -> Self {
        match kind {
            "text" => FieldKind::Text { placeholder },
            "date" => FieldKind::Date,
            "select" => FieldKind::Select {
                options: options.unwrap_or_default(),
            },
            "radio" => FieldKind::Radio {
                options: options.unwrap_or_default(),
            },
            other => FieldKind::Unknown(other.to_string()),
        }
    }

    pub fn type_name(&self) -> &str {
        match self {
            FieldKind::Text { .. } => "text",
            FieldKind::Date => "date",
            FieldKind::Select { .. } => "select",
            FieldKind::Radio { .. } => "radio",
            FieldKind::Unknown(raw) => raw,
        }
    }

    pub fn options(&self) -> Option<&[String]> {
        match self {
            FieldKind::Select { options } | FieldKind::Radio { options } => Some(options),
            _ => None,
        }
    }

    pub fn placeholder(&self) -> Option<&str> {
        match self {
            FieldKind::Text { placeholder } => placeholder.as_deref(),
            _ => None,
        }
    }

    pub fn is_unknown(&self) -> bool {
        matches!(self, FieldKind::Unknown(_))
    }
}

impl FormSchema {
    pub fn new(tabs: Vec<Tab>) -> Self {
        Self { tabs }
    }

    pub fn is_empty(&self) -> bool {
        self.tabs.is_empty()
    }

    pub fn first_tab(&self) -> Option<&Tab> {
        self.tabs.first()
    }

    pub fn tab(&self, id: &str) -> Option<&Tab> {
        self.tabs.iter().find(|tab| tab.id == id)
    }

    pub fn tab_position(&self, id: &str) -> Option<usize> {
        self.tabs.iter().position(|tab| tab.id == id)
    }
}

impl Tab {
    pub fn new(id: impl Into<String>, label: impl Into<String>, fields: Vec<Field>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            fields,
        }
    }

    pub fn field(&self, id: &str) -> Option<&Field> {
        self.fields.iter().find(|field| field.id == id)
    }
}

impl Field {
    pub fn new(id: impl Into<String>, label: impl Into<String>, kind: FieldKind) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            kind,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_type_keeps_raw_name() {
        let kind = FieldKind::from_parts("checkbox", Some(vec!["x".into()]), None);
        assert_eq!(kind, FieldKind::Unknown("checkbox".into()));
        assert_eq!(kind.type_name(), "checkbox");
        assert!(kind.options().is_none());
    }

    #[test]
    fn options_only_survive_on_choice_kinds() {
        let text = FieldKind::from_parts("text", Some(vec!["a".into()]), Some("hint".into()));
        assert_eq!(
            text,
            FieldKind::Text {
                placeholder: Some("hint".into())
            }
        );
        let select = FieldKind::from_parts("select", None, Some("ignored".into()));
        assert_eq!(select, FieldKind::Select { options: vec![] });
        assert!(select.placeholder().is_none());
    }
}
