mod body;
mod editor;
mod fields;
mod footer;
mod header;
mod layout;
mod popup;
mod tabstrip;

pub(crate) use body::render_body;
pub(crate) use editor::render_editor;
pub(crate) use footer::render_footer;
pub(crate) use popup::render_popup;
