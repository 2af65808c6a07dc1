#![deny(rust_2018_idioms)]

mod app;
pub mod domain;
mod error;
pub mod form;
pub mod io;
mod presentation;
pub mod schema;

pub use app::{FormUI, UiOptions};
pub use domain::{Field, FieldKind, FormSchema, Tab, parse_form_schema, parse_form_schema_str};
pub use error::FormError;
pub use form::{FormSession, FormStore, SchemaStatus};
pub use io::{DocumentFormat, export_artifact, export_form_data, parse_document_str};
pub use schema::{SchemaLoader, SchemaSource};

pub mod prelude {
    pub use super::{FormSchema, FormSession, FormStore, FormUI, SchemaSource, UiOptions};
}
