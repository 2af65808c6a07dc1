use super::{
    control::{Background, FieldControl},
    store::FormStore,
};

/// One of the fixed identification fields shown above the tabs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HeaderField {
    /// Store key; doubles as the display label.
    pub key: &'static str,
    /// Shown while the store has no value for `key`. Never written to the store.
    pub display_default: &'static str,
    pub background: Background,
}

pub const HEADER_FIELDS: [HeaderField; 3] = [
    HeaderField {
        key: "証番号",
        display_default: "0646349",
        background: Background::Yellow,
    },
    HeaderField {
        key: "組合員番号",
        display_default: "1300570",
        background: Background::White,
    },
    HeaderField {
        key: "氏名",
        display_default: "松山 英樹",
        background: Background::White,
    },
];

impl HeaderField {
    pub fn label(&self) -> &'static str {
        self.key
    }

    pub fn display_value<'a>(&self, store: &'a FormStore) -> &'a str {
        store.value(self.key).unwrap_or(self.display_default)
    }

    /// True while nothing has been entered and the display default is showing.
    pub fn shows_default(&self, store: &FormStore) -> bool {
        store.value(self.key).is_none()
    }

    pub fn control(&self, store: &FormStore) -> FieldControl {
        FieldControl::TextInput {
            value: self.display_value(store).to_string(),
            placeholder: None,
            background: self.background,
        }
    }
}
