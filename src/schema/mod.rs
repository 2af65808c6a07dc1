mod document;
mod loader;
mod resolver;
mod source;

pub(crate) use document::build_form_schema;
pub use document::{RawField, RawFormDocument, RawTab, document_schema, validate_document};
pub use loader::{LoadResult, PendingLoad, SchemaLoader};
pub use resolver::resolve_active_tab;
pub use source::{SchemaSource, cache_busted_url};
