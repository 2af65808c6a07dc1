use std::path::Path;

#[derive(Debug, Clone)]
pub struct StatusLine {
    message: String,
}

pub const READY_STATUS: &str = "Ready. Press Ctrl+S to complete, Ctrl+E to export.";

impl Default for StatusLine {
    fn default() -> Self {
        Self {
            message: READY_STATUS.to_string(),
        }
    }
}

impl StatusLine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_raw(&mut self, msg: impl Into<String>) {
        self.message = msg.into();
    }

    pub fn ready(&mut self) {
        self.message = READY_STATUS.to_string();
    }

    pub fn editing(&mut self, label: &str) {
        self.message = format!("Editing {label}");
    }

    pub fn loading(&mut self, source: &str) {
        self.message = format!("Loading schema from {source}…");
    }

    pub fn schema_loaded(&mut self, tabs: usize) {
        self.message = format!("Schema loaded ({tabs} tab(s))");
    }

    pub fn reload_failed(&mut self, error: &str) {
        self.message = format!("Reload failed, keeping current form: {error}");
    }

    pub fn missing_fields(&mut self, labels: &[String]) {
        self.message = format!("Required: {}", labels.join(", "));
    }

    pub fn exported(&mut self, what: &str, path: &Path) {
        self.message = format!("{what} written to {}", path.display());
    }

    pub fn pending_clear(&mut self) {
        self.message = "Press Ctrl+X again to clear every entered value.".to_string();
    }

    pub fn cleared(&mut self) {
        self.message = "Form cleared".to_string();
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}
