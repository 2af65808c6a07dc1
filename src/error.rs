use thiserror::Error;

use crate::io::DocumentFormat;

#[derive(Debug, Error)]
pub enum FormError {
    /// Transport or parse failure while loading the form schema.
    #[error("failed to load form schema from {source_label}: {message}")]
    SchemaFetch {
        source_label: String,
        message: String,
    },

    /// Text typed into the schema editor could not be applied.
    #[error("schema edit rejected: {0}")]
    SchemaEditParse(String),

    #[error("failed to parse {format} document: {message}")]
    Parse {
        format: DocumentFormat,
        message: String,
    },

    #[error("form schema does not match the expected shape: {}", .0.join("; "))]
    InvalidDocument(Vec<String>),

    #[error("form schema has no tabs")]
    EmptySchema,

    /// Labels of the required header fields that are still empty, in check order.
    #[error("missing required fields: {}", .0.join(", "))]
    MissingRequiredFields(Vec<String>),
}
