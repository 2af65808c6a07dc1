mod completion;
mod control;
mod editing;
mod header;
mod session;
mod store;

pub use completion::{check_required, missing_required};
pub use control::{Background, FieldControl, render_field};
pub(crate) use editing::edit_text;
pub use editing::edit_value;
pub use header::{HEADER_FIELDS, HeaderField};
pub use session::{FormSession, SchemaStatus};
pub use store::FormStore;
