use tracing::{debug, info, warn};

use crate::{
    domain::{Field, FormSchema, Tab, parse_form_schema_str},
    error::FormError,
    io::DocumentFormat,
    schema::{LoadResult, resolve_active_tab},
};

use super::{completion::check_required, store::FormStore};

/// What the body of the form can show right now.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchemaStatus {
    /// No load has resolved yet.
    Loading,
    /// Every load so far failed; nothing to render.
    Missing,
    Ready,
}

/// Application state: the loaded schema, the active tab pointer and the
/// entered values. All mutation goes through these methods.
#[derive(Debug, Clone, Default)]
pub struct FormSession {
    schema: Option<FormSchema>,
    active_tab: String,
    values: FormStore,
    load_settled: bool,
    last_error: Option<String>,
}

impl FormSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_schema(schema: FormSchema) -> Result<Self, FormError> {
        let mut session = Self::new();
        session.apply_load(Ok(schema))?;
        Ok(session)
    }

    pub fn schema(&self) -> Option<&FormSchema> {
        self.schema.as_ref()
    }

    pub fn status(&self) -> SchemaStatus {
        match (&self.schema, self.load_settled) {
            (Some(_), _) => SchemaStatus::Ready,
            (None, true) => SchemaStatus::Missing,
            (None, false) => SchemaStatus::Loading,
        }
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    pub fn active_tab_id(&self) -> &str {
        &self.active_tab
    }

    pub fn active_tab(&self) -> Option<&Tab> {
        self.schema.as_ref()?.tab(&self.active_tab)
    }

    /// Fields of the active tab, in display order.
    pub fn visible_fields(&self) -> &[Field] {
        self.active_tab()
            .map(|tab| tab.fields.as_slice())
            .unwrap_or(&[])
    }

    pub fn values(&self) -> &FormStore {
        &self.values
    }

    /// Replace the schema wholesale and re-resolve the active tab. An empty
    /// schema is rejected and the current one stays in place.
    pub fn apply_schema(&mut self, schema: FormSchema) -> Result<(), FormError> {
        let active = resolve_active_tab(&schema, &self.active_tab)?;
        if active != self.active_tab {
            debug!(from = %self.active_tab, to = %active, "active tab reset by schema change");
        }
        self.schema = Some(schema);
        self.active_tab = active;
        self.last_error = None;
        Ok(())
    }

    /// Apply the outcome of a load. Failures never discard a working schema;
    /// entered values are untouched either way.
    pub fn apply_load(&mut self, result: LoadResult) -> Result<(), FormError> {
        self.load_settled = true;
        let outcome = result.and_then(|schema| self.apply_schema(schema));
        if let Err(err) = &outcome {
            warn!(error = %err, kept_previous = self.schema.is_some(), "schema load not applied");
            self.last_error = Some(err.to_string());
        }
        outcome
    }

    /// Parse text from the schema editor and apply it in memory only.
    pub fn apply_schema_text(&mut self, text: &str) -> Result<(), FormError> {
        let schema = parse_form_schema_str(text, DocumentFormat::Json)
            .map_err(|err| FormError::SchemaEditParse(err.to_string()))?;
        self.apply_schema(schema)
            .map_err(|err| FormError::SchemaEditParse(err.to_string()))?;
        info!(tabs = self.schema.as_ref().map_or(0, |s| s.tabs.len()), "schema replaced from editor");
        Ok(())
    }

    /// Current schema as formatted JSON, for seeding the editor.
    pub fn schema_json(&self) -> Option<String> {
        self.schema
            .as_ref()
            .and_then(|schema| schema.to_pretty_json().ok())
    }

    pub fn switch_tab(&mut self, id: &str) -> bool {
        let exists = self
            .schema
            .as_ref()
            .is_some_and(|schema| schema.tab(id).is_some());
        if exists && self.active_tab != id {
            debug!(tab = %id, "switched tab");
            self.active_tab = id.to_string();
            return true;
        }
        false
    }

    /// Move the active tab by `delta`, wrapping at both ends.
    pub fn step_tab(&mut self, delta: i32) -> bool {
        let Some(schema) = &self.schema else {
            return false;
        };
        if schema.tabs.is_empty() {
            return false;
        }
        let len = schema.tabs.len() as i32;
        let current = schema.tab_position(&self.active_tab).unwrap_or(0) as i32;
        let next = (((current + delta) % len) + len) % len;
        let id = schema.tabs[next as usize].id.clone();
        self.switch_tab(&id)
    }

    pub fn value(&self, id: &str) -> &str {
        self.values.get(id)
    }

    pub fn set_value(&mut self, id: impl Into<String>, value: impl Into<String>) {
        self.values.set(id, value);
    }

    pub fn clear_values(&mut self) {
        info!(entries = self.values.len(), "cleared form values");
        self.values.clear();
    }

    /// Gate for the completion action.
    pub fn complete(&self) -> Result<(), FormError> {
        check_required(&self.values)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::FieldKind;

    fn tab(id: &str, fields: &[&str]) -> Tab {
        Tab::new(
            id,
            id.to_uppercase(),
            fields
                .iter()
                .map(|field| Field::new(*field, *field, FieldKind::Text { placeholder: None }))
                .collect(),
        )
    }

    fn schema(tabs: Vec<Tab>) -> FormSchema {
        FormSchema::new(tabs)
    }

    #[test]
    fn fresh_session_is_loading() {
        assert_eq!(FormSession::new().status(), SchemaStatus::Loading);
    }

    #[test]
    fn failed_first_load_is_missing() {
        let mut session = FormSession::new();
        let err = session.apply_load(Err(FormError::SchemaFetch {
            source_label: "form_config.json".into(),
            message: "not found".into(),
        }));
        assert!(err.is_err());
        assert_eq!(session.status(), SchemaStatus::Missing);
        assert!(session.last_error().unwrap().contains("not found"));
    }

    #[test]
    fn empty_first_load_is_missing() {
        let mut session = FormSession::new();
        assert!(matches!(
            session.apply_load(Ok(schema(vec![]))),
            Err(FormError::EmptySchema)
        ));
        assert_eq!(session.status(), SchemaStatus::Missing);
    }

    #[test]
    fn failed_reload_keeps_schema_and_tab() {
        let mut session = FormSession::with_schema(schema(vec![tab("a", &[]), tab("b", &[])])).unwrap();
        session.switch_tab("b");
        let _ = session.apply_load(Err(FormError::EmptySchema));
        assert_eq!(session.status(), SchemaStatus::Ready);
        assert_eq!(session.active_tab_id(), "b");
        assert_eq!(session.schema().unwrap().tabs.len(), 2);
    }

    #[test]
    fn step_tab_wraps_both_ways() {
        let mut session =
            FormSession::with_schema(schema(vec![tab("a", &[]), tab("b", &[]), tab("c", &[])]))
                .unwrap();
        session.step_tab(-1);
        assert_eq!(session.active_tab_id(), "c");
        session.step_tab(1);
        assert_eq!(session.active_tab_id(), "a");
        session.step_tab(4);
        assert_eq!(session.active_tab_id(), "b");
    }

    #[test]
    fn switch_to_unknown_tab_is_ignored() {
        let mut session = FormSession::with_schema(schema(vec![tab("a", &[])])).unwrap();
        assert!(!session.switch_tab("zzz"));
        assert_eq!(session.active_tab_id(), "a");
    }

    #[test]
    fn visible_fields_follow_active_tab() {
        let mut session =
            FormSession::with_schema(schema(vec![tab("a", &["x"]), tab("b", &["y", "z"])])).unwrap();
        assert_eq!(session.visible_fields().len(), 1);
        session.switch_tab("b");
        let ids: Vec<_> = session.visible_fields().iter().map(|f| f.id.as_str()).collect();
        assert_eq!(ids, vec!["y", "z"]);
    }
}
