use std::{
    sync::mpsc::{self, Receiver, TryRecvError},
    thread,
};

use tracing::{info, warn};

use crate::{
    domain::{FormSchema, parse_form_schema_str},
    error::FormError,
};

use super::source::SchemaSource;

pub type LoadResult = Result<FormSchema, FormError>;

/// Loads the form schema from its source. Every call replaces nothing by
/// itself; applying the result is the caller's decision.
#[derive(Debug, Clone)]
pub struct SchemaLoader {
    source: SchemaSource,
}

impl SchemaLoader {
    pub fn new(source: SchemaSource) -> Self {
        Self { source }
    }

    pub fn source(&self) -> &SchemaSource {
        &self.source
    }

    /// Fetch and parse the document, blocking the calling thread.
    pub fn load(&self) -> LoadResult {
        info!(source = %self.source, "loading form schema");
        let outcome = self
            .source
            .read()
            .map_err(|err| format!("{err:#}"))
            .and_then(|contents| {
                parse_form_schema_str(&contents, self.source.format()).map_err(|err| err.to_string())
            });
        match outcome {
            Ok(schema) => {
                info!(source = %self.source, tabs = schema.tabs.len(), "form schema loaded");
                Ok(schema)
            }
            Err(message) => {
                warn!(source = %self.source, error = %message, "form schema load failed");
                Err(FormError::SchemaFetch {
                    source_label: self.source.to_string(),
                    message,
                })
            }
        }
    }

    /// Run `load` on a worker thread. Loads are never cancelled; each one
    /// resolves on its own.
    pub fn spawn(&self) -> PendingLoad {
        let (sender, receiver) = mpsc::channel();
        let loader = self.clone();
        thread::spawn(move || {
            let _ = sender.send(loader.load());
        });
        PendingLoad {
            source_label: self.source.to_string(),
            receiver,
        }
    }
}

/// Handle to an in-flight load, polled from the UI tick.
#[derive(Debug)]
pub struct PendingLoad {
    source_label: String,
    receiver: Receiver<LoadResult>,
}

impl PendingLoad {
    /// Returns the result once the load has resolved.
    pub fn try_take(&self) -> Option<LoadResult> {
        match self.receiver.try_recv() {
            Ok(result) => Some(result),
            Err(TryRecvError::Empty) => None,
            Err(TryRecvError::Disconnected) => Some(Err(self.worker_gone())),
        }
    }

    /// Block until the load resolves.
    pub fn wait(self) -> LoadResult {
        self.receiver
            .recv()
            .unwrap_or_else(|_| Err(self.worker_gone()))
    }

    fn worker_gone(&self) -> FormError {
        FormError::SchemaFetch {
            source_label: self.source_label.clone(),
            message: "loader thread exited before reporting a result".to_string(),
        }
    }
}
