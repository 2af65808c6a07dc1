use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout},
};

use crate::form::FormSession;

use super::components::{render_body, render_editor, render_footer, render_popup};

/// Focused control: one of the header fields or a field of the active tab
/// (index into the tab's field list).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Focus {
    Header(usize),
    Field(usize),
}

pub(crate) struct UiContext<'a> {
    pub title: Option<&'a str>,
    pub session: &'a FormSession,
    pub source_label: &'a str,
    pub focus: Option<Focus>,
    pub status_message: &'a str,
    pub help: Option<&'a str>,
    pub popup: Option<PopupRender<'a>>,
    pub editor: Option<EditorRender<'a>>,
}

pub(crate) struct PopupRender<'a> {
    pub title: &'a str,
    pub options: &'a [String],
    pub selected: usize,
}

pub(crate) struct EditorRender<'a> {
    pub lines: &'a [String],
    /// (row, column in characters)
    pub cursor: (usize, usize),
    pub error: Option<&'a str>,
}

pub(crate) fn draw(frame: &mut Frame<'_>, ctx: UiContext<'_>) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(7), Constraint::Length(4)])
        .split(frame.area());

    let cursor_enabled = ctx.popup.is_none() && ctx.editor.is_none();
    render_body(frame, chunks[0], &ctx, cursor_enabled);
    render_footer(frame, chunks[1], &ctx);

    if let Some(editor) = &ctx.editor {
        render_editor(frame, editor);
    } else if let Some(popup) = &ctx.popup {
        render_popup(frame, popup);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        domain::{Field, FieldKind, FormSchema, Tab},
        error::FormError,
    };
    use ratatui::{Terminal, backend::TestBackend};

    fn screen_text(session: &FormSession, focus: Option<Focus>) -> String {
        let mut terminal = Terminal::new(TestBackend::new(100, 30)).unwrap();
        terminal
            .draw(|frame| {
                draw(
                    frame,
                    UiContext {
                        title: Some("Claim Form"),
                        session,
                        source_label: "form_config.json",
                        focus,
                        status_message: "Ready",
                        help: Some("Ctrl+Q quit"),
                        popup: None,
                        editor: None,
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
    fn loading_state_is_announced() {
        let text = screen_text(&FormSession::new(), None);
        assert!(text.contains("Loading form schema"));
    }

    #[test]
    fn missing_schema_shows_blocking_notice() {
        let mut session = FormSession::new();
        let _ = session.apply_load(Err(FormError::SchemaFetch {
            source_label: "form_config.json".into(),
            message: "no such file".into(),
        }));
        let text = screen_text(&session, None);
        assert!(text.contains("Schema not found"));
        assert!(text.contains("no such file"));
    }

    #[test]
    fn ready_state_draws_tabs_and_active_fields() {
        let schema = FormSchema::new(vec![
            Tab::new(
                "basic",
                "Basic",
                vec![
                    Field::new("kind", "Kind", FieldKind::Select { options: vec!["Alpha".into()] }),
                    Field::new("odd", "Oddity", FieldKind::Unknown("slider".into())),
                ],
            ),
            Tab::new(
                "extra",
                "Extra",
                vec![Field::new("note", "Remark", FieldKind::Text { placeholder: None })],
            ),
        ]);
        let mut session = FormSession::with_schema(schema).unwrap();
        session.set_value("kind", "Alpha");
        let text = screen_text(&session, Some(Focus::Field(0)));
        assert!(text.contains("Basic"));
        assert!(text.contains("Extra"));
        assert!(text.contains("Kind"));
        assert!(text.contains("Alpha"));
        assert!(text.contains("Oddity"));
        assert!(!text.contains("Remark"), "inactive tab fields stay hidden");
        assert!(text.contains("Claim Form"));
    }
}
