use std::{
    path::{Path, PathBuf},
    time::Duration,
};

use crate::io::DocumentFormat;

#[derive(Debug, Clone)]
pub struct UiOptions {
    pub tick_rate: Duration,
    pub show_help: bool,
    /// Ask for a second key press before clearing every entered value.
    pub confirm_clear: bool,
    /// Directory receiving data exports and completion artifacts.
    pub output_dir: PathBuf,
    /// Pre-existing CSV copied out on completion.
    pub artifact: Option<PathBuf>,
    pub export_format: DocumentFormat,
}

impl Default for UiOptions {
    fn default() -> Self {
        Self {
            tick_rate: Duration::from_millis(250),
            show_help: true,
            confirm_clear: true,
            output_dir: PathBuf::from("."),
            artifact: None,
            export_format: DocumentFormat::Json,
        }
    }
}

impl UiOptions {
    pub fn with_tick_rate(mut self, tick_rate: Duration) -> Self {
        self.tick_rate = tick_rate;
        self
    }

    pub fn with_help(mut self, show: bool) -> Self {
        self.show_help = show;
        self
    }

    pub fn with_confirm_clear(mut self, confirm: bool) -> Self {
        self.confirm_clear = confirm;
        self
    }

    pub fn with_output_dir(mut self, dir: impl AsRef<Path>) -> Self {
        self.output_dir = dir.as_ref().to_path_buf();
        self
    }

    pub fn with_artifact(mut self, artifact: impl AsRef<Path>) -> Self {
        self.artifact = Some(artifact.as_ref().to_path_buf());
        self
    }

    pub fn with_export_format(mut self, format: DocumentFormat) -> Self {
        self.export_format = format;
        self
    }
}
