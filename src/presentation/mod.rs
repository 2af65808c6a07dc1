mod components;
mod view;

pub(crate) use view::{EditorRender, Focus, PopupRender, UiContext, draw};
