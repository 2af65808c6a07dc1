use anyhow::Result;
use tracing::info;

use crate::{form::FormStore, schema::{SchemaLoader, SchemaSource}};

use super::{options::UiOptions, runtime::App};

/// Entry point: load a form schema from `source` and run the terminal form
/// until the user quits. Returns the values entered.
#[derive(Debug)]
pub struct FormUI {
    source: SchemaSource,
    title: Option<String>,
    options: UiOptions,
}

impl FormUI {
    pub fn new(source: SchemaSource) -> Self {
        Self {
            source,
            title: None,
            options: UiOptions::default(),
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_options(mut self, options: UiOptions) -> Self {
        self.options = options;
        self
    }

    pub fn run(self) -> Result<FormStore> {
        let FormUI {
            source,
            title,
            options,
        } = self;
        info!(source = %source, "starting form");
        let mut app = App::new(SchemaLoader::new(source), options, title);
        app.run()
    }
}
