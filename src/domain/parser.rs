use serde_json::Value;

use crate::{error::FormError, io::DocumentFormat, schema::build_form_schema};

use super::schema::FormSchema;

/// Parse a form configuration document into the internal `FormSchema`.
pub fn parse_form_schema(value: &Value) -> Result<FormSchema, FormError> {
    build_form_schema(value)
}

/// Parse form configuration text in the given format.
pub fn parse_form_schema_str(contents: &str, format: DocumentFormat) -> Result<FormSchema, FormError> {
    let value = crate::io::parse_document_str(contents, format).map_err(|err| FormError::Parse {
        format,
        message: format!("{err:#}"),
    })?;
    parse_form_schema(&value)
}
