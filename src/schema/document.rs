use std::sync::LazyLock;

use jsonschema::{Validator, validator_for};
use schemars::{JsonSchema, schema_for};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{
    domain::{Field, FieldKind, FormSchema, Tab},
    error::FormError,
};

/// On-disk shape of a form configuration:
/// `{ tabs: [ { id, label, fields: [ { id, label, type, options?, placeholder? } ] } ] }`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct RawFormDocument {
    pub tabs: Vec<RawTab>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct RawTab {
    pub id: String,
    #[serde(default)]
    pub label: String,
    #[serde(default)]
    pub fields: Vec<RawField>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct RawField {
    pub id: String,
    #[serde(default)]
    pub label: String,
    /// Any string is accepted; unrecognised types render no control.
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<String>,
}

static DOCUMENT_VALIDATOR: LazyLock<Validator> = LazyLock::new(|| {
    validator_for(&document_schema()).expect("derived form document schema must compile")
});

/// JSON Schema describing a form configuration document.
pub fn document_schema() -> Value {
    serde_json::to_value(schema_for!(RawFormDocument))
        .expect("derived JSON Schema is always serializable")
}

/// Check a document against the form configuration shape, collecting every
/// violation as `"<pointer>: <message>"`.
pub fn validate_document(value: &Value) -> Result<(), FormError> {
    let issues = DOCUMENT_VALIDATOR
        .iter_errors(value)
        .map(|error| {
            let pointer = error.instance_path.to_string();
            let prefix = if pointer.is_empty() {
                "<root>".to_string()
            } else {
                pointer
            };
            format!("{prefix}: {error}")
        })
        .collect::<Vec<_>>();
    if issues.is_empty() {
        Ok(())
    } else {
        Err(FormError::InvalidDocument(issues))
    }
}

pub(crate) fn build_form_schema(value: &Value) -> Result<FormSchema, FormError> {
    validate_document(value)?;
    let raw: RawFormDocument = serde_json::from_value(value.clone())
        .map_err(|err| FormError::InvalidDocument(vec![err.to_string()]))?;
    Ok(raw.into())
}

impl From<RawFormDocument> for FormSchema {
    fn from(raw: RawFormDocument) -> Self {
        FormSchema::new(raw.tabs.into_iter().map(Tab::from).collect())
    }
}

impl From<RawTab> for Tab {
    fn from(raw: RawTab) -> Self {
        Tab::new(
            raw.id,
            raw.label,
            raw.fields.into_iter().map(Field::from).collect(),
        )
    }
}

impl From<RawField> for Field {
    fn from(raw: RawField) -> Self {
        let kind = FieldKind::from_parts(&raw.kind, raw.options, raw.placeholder);
        Field::new(raw.id, raw.label, kind)
    }
}

impl From<&FormSchema> for RawFormDocument {
    fn from(schema: &FormSchema) -> Self {
        Self {
            tabs: schema.tabs.iter().map(RawTab::from).collect(),
        }
    }
}

impl From<&Tab> for RawTab {
    fn from(tab: &Tab) -> Self {
        Self {
            id: tab.id.clone(),
            label: tab.label.clone(),
            fields: tab.fields.iter().map(RawField::from).collect(),
        }
    }
}

impl From<&Field> for RawField {
    fn from(field: &Field) -> Self {
        Self {
            id: field.id.clone(),
            label: field.label.clone(),
            kind: field.kind.type_name().to_string(),
            options: field.kind.options().map(<[String]>::to_vec),
            placeholder: field.kind.placeholder().map(str::to_string),
        }
    }
}

impl FormSchema {
    pub fn to_document(&self) -> RawFormDocument {
        RawFormDocument::from(self)
    }

    /// Formatted JSON used to seed the schema editor.
    pub fn to_pretty_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(&self.to_document())
    }
}
