mod parser;
mod schema;

pub use parser::{parse_form_schema, parse_form_schema_str};
pub use schema::{Field, FieldKind, FormSchema, Tab};
