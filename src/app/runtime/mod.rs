use anyhow::Result;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use ratatui::layout::Rect;
use tracing::{debug, info, warn};

use crate::{
    error::FormError,
    form::{FormSession, FormStore, HEADER_FIELDS, SchemaStatus, edit_text, edit_value, render_field},
    io::{export_artifact, export_form_data},
    presentation::{self, Focus, UiContext},
    schema::{LoadResult, PendingLoad, SchemaLoader},
};

use super::{
    input::{KeyAction, KeyCommand, route},
    keymap::{KeymapContext, help_text},
    options::UiOptions,
    popup::PopupState,
    status::StatusLine,
    terminal::TerminalGuard,
};

mod editor;

use editor::SchemaEditor;

const EMPTY_SCHEMA_TEMPLATE: &str = "{\n  \"tabs\": []\n}";

pub(crate) struct App {
    session: FormSession,
    loader: SchemaLoader,
    pending: Vec<PendingLoad>,
    options: UiOptions,
    status: StatusLine,
    title: Option<String>,
    /// Index into `focus_targets()`.
    focus: usize,
    popup: Option<PopupState>,
    editor: Option<SchemaEditor>,
    clear_armed: bool,
    should_quit: bool,
}

impl App {
    pub fn new(loader: SchemaLoader, options: UiOptions, title: Option<String>) -> Self {
        Self {
            session: FormSession::new(),
            loader,
            pending: Vec::new(),
            options,
            status: StatusLine::new(),
            title,
            focus: 0,
            popup: None,
            editor: None,
            clear_armed: false,
            should_quit: false,
        }
    }

    pub fn run(&mut self) -> Result<FormStore> {
        let mut terminal = TerminalGuard::new()?;
        self.reload();
        while !self.should_quit {
            self.poll_loads();
            terminal.draw(|frame| self.draw(frame))?;
            if !event::poll(self.options.tick_rate)? {
                continue;
            }
            match event::read()? {
                Event::Key(key) => self.handle_key(key)?,
                Event::Resize(width, height) => {
                    terminal.resize(Rect::new(0, 0, width, height))?;
                }
                Event::Mouse(_) | Event::FocusGained | Event::FocusLost | Event::Paste(_) => {}
            }
        }
        info!(entries = self.session.values().len(), "form closed");
        Ok(self.session.values().clone())
    }

    fn draw(&self, frame: &mut ratatui::Frame<'_>) {
        let help = if self.options.show_help {
            let context = if self.editor.is_some() {
                KeymapContext::Editor
            } else {
                KeymapContext::Default
            };
            help_text(context)
        } else {
            None
        };
        let source_label = self.loader.source().to_string();
        presentation::draw(
            frame,
            UiContext {
                title: self.title.as_deref(),
                session: &self.session,
                source_label: &source_label,
                focus: self.current_focus(),
                status_message: self.status.message(),
                help: help.as_deref(),
                popup: self.popup.as_ref().map(PopupState::as_render),
                editor: self.editor.as_ref().map(SchemaEditor::as_render),
            },
        );
    }

    fn reload(&mut self) {
        let label = self.loader.source().to_string();
        debug!(source = %label, in_flight = self.pending.len(), "schema load requested");
        self.status.loading(&label);
        self.pending.push(self.loader.spawn());
    }

    /// Apply every load that resolved since the last tick, in resolution
    /// order. Whichever resolves last leaves its mark.
    fn poll_loads(&mut self) {
        let mut resolved = Vec::new();
        self.pending.retain(|pending| match pending.try_take() {
            Some(result) => {
                resolved.push(result);
                false
            }
            None => true,
        });
        for result in resolved {
            self.apply_load_result(result);
        }
    }

    fn apply_load_result(&mut self, result: LoadResult) {
        let had_schema = self.session.schema().is_some();
        match self.session.apply_load(result) {
            Ok(()) => {
                let tabs = self.session.schema().map_or(0, |schema| schema.tabs.len());
                self.status.schema_loaded(tabs);
                self.clamp_focus();
            }
            Err(err) if had_schema => self.status.reload_failed(&err.to_string()),
            Err(err) => self.status.set_raw(format!("Schema unavailable: {err}")),
        }
    }

    fn handle_key(&mut self, key: KeyEvent) -> Result<()> {
        if key.kind != KeyEventKind::Press {
            return Ok(());
        }
        if self.editor.is_some() {
            self.handle_editor_key(key);
            return Ok(());
        }
        if self.popup.is_some() {
            self.handle_popup_key(key);
            return Ok(());
        }

        match route(&key, KeymapContext::Default) {
            KeyCommand::Action(action) => {
                if action != KeyAction::Clear {
                    self.clear_armed = false;
                }
                self.handle_action(action);
            }
            KeyCommand::Input(event) => {
                self.clear_armed = false;
                self.handle_field_input(&event);
            }
        }
        Ok(())
    }

    fn handle_action(&mut self, action: KeyAction) {
        match action {
            KeyAction::FieldStep(delta) => self.step_focus(delta),
            KeyAction::TabStep(delta) => {
                if self.session.step_tab(delta) {
                    self.focus_first_field();
                    if let Some(tab) = self.session.active_tab() {
                        self.status.set_raw(format!("Tab: {}", tab.label));
                    }
                }
            }
            KeyAction::OpenPopup => self.open_popup(),
            KeyAction::Complete => self.on_complete(),
            KeyAction::ExportData => self.on_export(),
            KeyAction::Clear => self.on_clear(),
            KeyAction::Reload => self.reload(),
            KeyAction::EditSchema => self.open_editor(),
            KeyAction::ResetStatus => self.status.ready(),
            KeyAction::Quit => self.should_quit = true,
            KeyAction::ApplyEdit | KeyAction::CancelEdit => {}
        }
    }

    /// Headers first, then the active tab's fields that draw a control.
    fn focus_targets(&self) -> Vec<Focus> {
        if self.session.status() != SchemaStatus::Ready {
            return Vec::new();
        }
        let mut targets = (0..HEADER_FIELDS.len())
            .map(Focus::Header)
            .collect::<Vec<_>>();
        targets.extend(
            self.session
                .visible_fields()
                .iter()
                .enumerate()
                .filter(|(_, field)| !field.kind.is_unknown())
                .map(|(index, _)| Focus::Field(index)),
        );
        targets
    }

    fn current_focus(&self) -> Option<Focus> {
        self.focus_targets().get(self.focus).copied()
    }

    fn step_focus(&mut self, delta: i32) {
        let len = self.focus_targets().len() as i32;
        if len == 0 {
            return;
        }
        let next = ((self.focus as i32 + delta) % len + len) % len;
        self.focus = next as usize;
    }

    fn focus_first_field(&mut self) {
        self.focus = self
            .focus_targets()
            .iter()
            .position(|target| matches!(target, Focus::Field(_)))
            .unwrap_or(0);
    }

    fn clamp_focus(&mut self) {
        let len = self.focus_targets().len();
        if self.focus >= len {
            self.focus = 0;
        }
    }

    fn handle_field_input(&mut self, event: &KeyEvent) {
        match self.current_focus() {
            Some(Focus::Header(index)) => {
                let header = HEADER_FIELDS[index];
                let current = header.display_value(self.session.values()).to_string();
                if let Some(next) = edit_text(&current, event) {
                    self.session.set_value(header.key, next);
                    self.status.editing(header.label());
                }
            }
            Some(Focus::Field(index)) => {
                let Some(field) = self.session.visible_fields().get(index).cloned() else {
                    return;
                };
                let current = self.session.value(&field.id).to_string();
                if let Some(next) = edit_value(&field, &current, event) {
                    self.session.set_value(field.id, next);
                    self.status.editing(&field.label);
                }
            }
            None => {}
        }
    }

    fn open_popup(&mut self) {
        let Some(Focus::Field(index)) = self.current_focus() else {
            return;
        };
        let Some(field) = self.session.visible_fields().get(index) else {
            return;
        };
        let control = render_field(field, self.session.value(&field.id));
        if let Some(popup) = PopupState::from_control(field.id.clone(), field.label.clone(), control)
        {
            self.status.set_raw("Use ↑/↓ and Enter to choose");
            self.popup = Some(popup);
        }
    }

    fn handle_popup_key(&mut self, key: KeyEvent) {
        let Some(popup) = self.popup.as_mut() else {
            return;
        };
        match key.code {
            KeyCode::Esc => {
                self.popup = None;
                self.status.ready();
            }
            KeyCode::Up => popup.select_previous(),
            KeyCode::Down => popup.select_next(),
            KeyCode::Enter => {
                if let Some(value) = popup.chosen_value() {
                    let id = popup.field_id().to_string();
                    self.session.set_value(id, value);
                }
                self.popup = None;
                self.status.ready();
            }
            _ => {}
        }
    }

    fn open_editor(&mut self) {
        let text = self
            .session
            .schema_json()
            .unwrap_or_else(|| EMPTY_SCHEMA_TEMPLATE.to_string());
        self.editor = Some(SchemaEditor::new(&text));
        self.status.set_raw("Editing schema. Ctrl+S applies it to this session only.");
    }

    fn handle_editor_key(&mut self, key: KeyEvent) {
        let Some(editor) = self.editor.as_mut() else {
            return;
        };
        match route(&key, KeymapContext::Editor) {
            KeyCommand::Action(KeyAction::ApplyEdit) => {
                match self.session.apply_schema_text(&editor.text()) {
                    Ok(()) => {
                        self.editor = None;
                        self.clamp_focus();
                        self.status.set_raw("Schema applied (not saved to the source)");
                    }
                    Err(err) => {
                        editor.set_error(err.to_string());
                        self.status.set_raw("Schema not applied; fix the errors or press Esc");
                    }
                }
            }
            KeyCommand::Action(KeyAction::CancelEdit) => {
                self.editor = None;
                self.status.ready();
            }
            KeyCommand::Action(_) => {}
            KeyCommand::Input(event) => {
                editor.handle_key(&event);
            }
        }
    }

    fn on_complete(&mut self) {
        match self.session.complete() {
            Err(FormError::MissingRequiredFields(labels)) => self.status.missing_fields(&labels),
            Err(err) => self.status.set_raw(err.to_string()),
            Ok(()) => match &self.options.artifact {
                None => self.status.set_raw("Form complete. No artifact configured."),
                Some(source) => match export_artifact(source, &self.options.output_dir) {
                    Ok(path) => self.status.exported("Artifact", &path),
                    Err(err) => {
                        warn!(error = %err, "artifact export failed");
                        self.status.set_raw(format!("Artifact export failed: {err:#}"));
                    }
                },
            },
        }
    }

    fn on_export(&mut self) {
        match export_form_data(
            self.session.values(),
            &self.options.output_dir,
            self.options.export_format,
        ) {
            Ok(path) => self.status.exported("Form data", &path),
            Err(err) => {
                warn!(error = %err, "form data export failed");
                self.status.set_raw(format!("Export failed: {err:#}"));
            }
        }
    }

    fn on_clear(&mut self) {
        if self.options.confirm_clear && !self.clear_armed {
            self.clear_armed = true;
            self.status.pending_clear();
            return;
        }
        self.clear_armed = false;
        self.session.clear_values();
        self.status.cleared();
    }
}

#[cfg(test)]
impl App {
    /// Block until every in-flight load has resolved, then apply them.
    fn settle_loads(&mut self) {
        for pending in std::mem::take(&mut self.pending) {
            let result = pending.wait();
            self.apply_load_result(result);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        domain::{Field, FieldKind, FormSchema, Tab},
        schema::SchemaSource,
    };
    use crossterm::event::KeyModifiers;
    use std::fs;

    fn schema() -> FormSchema {
        FormSchema::new(vec![
            Tab::new(
                "basic",
                "Basic",
                vec![Field::new("name", "Name", FieldKind::Text { placeholder: None })],
            ),
            Tab::new(
                "extra",
                "Extra",
                vec![
                    Field::new("odd", "Oddity", FieldKind::Unknown("slider".into())),
                    Field::new(
                        "kind",
                        "Kind",
                        FieldKind::Select {
                            options: vec!["A".into(), "B".into()],
                        },
                    ),
                ],
            ),
        ])
    }

    fn app_with(options: UiOptions) -> App {
        let loader = SchemaLoader::new(SchemaSource::parse("missing-form.json"));
        let mut app = App::new(loader, options, None);
        app.apply_load_result(Ok(schema()));
        app
    }

    fn press(app: &mut App, code: KeyCode, modifiers: KeyModifiers) {
        app.handle_key(KeyEvent::new(code, modifiers)).unwrap();
    }

    fn ctrl(app: &mut App, ch: char) {
        press(app, KeyCode::Char(ch), KeyModifiers::CONTROL);
    }

    fn type_text(app: &mut App, text: &str) {
        for ch in text.chars() {
            press(app, KeyCode::Char(ch), KeyModifiers::NONE);
        }
    }

    fn fill_headers(app: &mut App) {
        for header in HEADER_FIELDS {
            app.session.set_value(header.key, "x");
        }
    }

    #[test]
    fn switching_tabs_keeps_entered_values() {
        let mut app = app_with(UiOptions::default());
        app.focus_first_field();
        type_text(&mut app, "ab");
        press(&mut app, KeyCode::Right, KeyModifiers::CONTROL);
        assert_eq!(app.session.active_tab_id(), "extra");
        press(&mut app, KeyCode::Left, KeyModifiers::CONTROL);
        assert_eq!(app.session.active_tab_id(), "basic");
        assert_eq!(app.session.value("name"), "ab");
    }

    #[test]
    fn unknown_fields_are_skipped_by_focus() {
        let mut app = app_with(UiOptions::default());
        press(&mut app, KeyCode::Right, KeyModifiers::CONTROL);
        assert_eq!(app.current_focus(), Some(Focus::Field(1)));
        assert_eq!(app.focus_targets().len(), HEADER_FIELDS.len() + 1);
    }

    #[test]
    fn popup_selection_writes_store() {
        let mut app = app_with(UiOptions::default());
        press(&mut app, KeyCode::Right, KeyModifiers::CONTROL);
        press(&mut app, KeyCode::Enter, KeyModifiers::NONE);
        assert!(app.popup.is_some());
        press(&mut app, KeyCode::Down, KeyModifiers::NONE);
        press(&mut app, KeyCode::Down, KeyModifiers::NONE);
        press(&mut app, KeyCode::Enter, KeyModifiers::NONE);
        assert!(app.popup.is_none());
        assert_eq!(app.session.value("kind"), "B");
    }

    #[test]
    fn invalid_schema_edit_keeps_modal_and_schema() {
        let mut app = app_with(UiOptions::default());
        let before = app.session.schema().cloned();
        ctrl(&mut app, 'o');
        assert!(app.editor.is_some());
        type_text(&mut app, "oops");
        ctrl(&mut app, 's');
        let editor = app.editor.as_ref().expect("editor stays open");
        assert!(editor.as_render().error.is_some());
        assert_eq!(app.session.schema().cloned(), before);
        assert_eq!(app.session.active_tab_id(), "basic");
    }

    #[test]
    fn cancelled_edit_changes_nothing() {
        let mut app = app_with(UiOptions::default());
        ctrl(&mut app, 'o');
        type_text(&mut app, "junk");
        press(&mut app, KeyCode::Esc, KeyModifiers::NONE);
        assert!(app.editor.is_none());
        assert_eq!(app.session.schema().map(|s| s.tabs.len()), Some(2));
    }

    #[test]
    fn completion_reports_missing_headers() {
        let mut app = app_with(UiOptions::default());
        ctrl(&mut app, 's');
        assert!(app.status.message().starts_with("Required: "));
        assert!(app.status.message().contains("証番号"));
    }

    #[test]
    fn clear_needs_second_press() {
        let mut app = app_with(UiOptions::default());
        app.session.set_value("name", "kept");
        ctrl(&mut app, 'x');
        assert_eq!(app.session.value("name"), "kept");
        ctrl(&mut app, 'x');
        assert!(app.session.values().is_empty());
    }

    #[test]
    fn clear_is_disarmed_by_other_keys() {
        let mut app = app_with(UiOptions::default());
        app.session.set_value("name", "kept");
        ctrl(&mut app, 'x');
        press(&mut app, KeyCode::Tab, KeyModifiers::NONE);
        ctrl(&mut app, 'x');
        assert_eq!(app.session.value("name"), "kept");
    }

    #[test]
    fn failed_reload_keeps_current_form() {
        let mut app = app_with(UiOptions::default());
        app.session.set_value("name", "kept");
        ctrl(&mut app, 'r');
        app.settle_loads();
        assert_eq!(app.session.status(), SchemaStatus::Ready);
        assert_eq!(app.session.value("name"), "kept");
        assert!(app.status.message().starts_with("Reload failed"));
    }

    #[test]
    fn first_load_from_file_makes_form_ready() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("form.json");
        fs::write(
            &path,
            r#"{"tabs":[{"id":"t1","label":"One","fields":[{"id":"a","label":"A","type":"text"}]}]}"#,
        )
        .unwrap();
        let loader = SchemaLoader::new(SchemaSource::File(path));
        let mut app = App::new(loader, UiOptions::default(), None);
        assert_eq!(app.session.status(), SchemaStatus::Loading);
        app.reload();
        app.settle_loads();
        assert_eq!(app.session.status(), SchemaStatus::Ready);
        assert_eq!(app.session.active_tab_id(), "t1");
    }

    #[test]
    fn completion_copies_artifact_once() {
        let source_dir = tempfile::tempdir().unwrap();
        let output_dir = tempfile::tempdir().unwrap();
        let artifact = source_dir.path().join("claim.csv");
        fs::write(&artifact, "a,b\n1,2\n").unwrap();
        let options = UiOptions::default()
            .with_artifact(&artifact)
            .with_output_dir(output_dir.path());
        let mut app = app_with(options);
        fill_headers(&mut app);
        ctrl(&mut app, 's');
        let written = fs::read_dir(output_dir.path()).unwrap().count();
        assert_eq!(written, 1);
        assert!(app.status.message().starts_with("Artifact written to"));
    }

    #[test]
    fn completion_without_artifact_only_reports() {
        let output_dir = tempfile::tempdir().unwrap();
        let mut app = app_with(UiOptions::default().with_output_dir(output_dir.path()));
        fill_headers(&mut app);
        ctrl(&mut app, 's');
        assert_eq!(fs::read_dir(output_dir.path()).unwrap().count(), 0);
        assert!(app.status.message().contains("No artifact configured"));
    }

    #[test]
    fn header_typing_starts_from_display_default() {
        let mut app = app_with(UiOptions::default());
        type_text(&mut app, "9");
        assert_eq!(app.session.value(HEADER_FIELDS[0].key), "06463499");
    }
}
