use crossterm::event::KeyEvent;

use super::keymap::{self, KeymapContext};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum KeyAction {
    FieldStep(i32),
    TabStep(i32),
    OpenPopup,
    Complete,
    ExportData,
    Clear,
    Reload,
    EditSchema,
    ResetStatus,
    Quit,
    ApplyEdit,
    CancelEdit,
}

#[derive(Debug, Clone, Copy)]
pub(crate) enum KeyCommand {
    Action(KeyAction),
    /// Not bound in the active context; forwarded to the focused control.
    Input(KeyEvent),
}

pub(crate) fn route(key: &KeyEvent, context: KeymapContext) -> KeyCommand {
    match keymap::classify_key(key, context) {
        Some(action) => KeyCommand::Action(action),
        None => KeyCommand::Input(*key),
    }
}
