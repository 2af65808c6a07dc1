use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use chrono::{DateTime, Local};
use serde::Serialize;
use tracing::info;

use super::DocumentFormat;
use crate::form::FormStore;

const TIMESTAMP_FORMAT: &str = "%Y%m%d_%H%M%S";
const FORM_DATA_PREFIX: &str = "form_data";

/// Serialize the whole form store and write it into `dir` under a timestamped name.
pub fn export_form_data(store: &FormStore, dir: &Path, format: DocumentFormat) -> Result<PathBuf> {
    let payload = serialize_value(store, format, true)?;
    let path = dir.join(timestamped_name(FORM_DATA_PREFIX, format.extension(), Local::now()));
    write_payload(&path, &payload)?;
    info!(path = %path.display(), entries = store.len(), "exported form data");
    Ok(path)
}

/// Copy the fixed completion artifact into `dir` under a timestamped name.
///
/// The artifact is a pre-existing CSV resource; its contents do not reflect
/// the values entered in the form.
pub fn export_artifact(source: &Path, dir: &Path) -> Result<PathBuf> {
    if !source.is_file() {
        bail!("completion artifact {} does not exist", source.display());
    }
    let stem = source
        .file_stem()
        .and_then(|stem| stem.to_str())
        .unwrap_or("export");
    let extension = source
        .extension()
        .and_then(|ext| ext.to_str())
        .unwrap_or("csv");
    ensure_dir(dir)?;
    let target = dir.join(timestamped_name(stem, extension, Local::now()));
    fs::copy(source, &target).with_context(|| {
        format!(
            "failed to copy {} to {}",
            source.display(),
            target.display()
        )
    })?;
    info!(path = %target.display(), "exported completion artifact");
    Ok(target)
}

pub(crate) fn timestamped_name(prefix: &str, extension: &str, at: DateTime<Local>) -> String {
    format!("{prefix}_{}.{extension}", at.format(TIMESTAMP_FORMAT))
}

fn serialize_value<T: Serialize>(value: &T, format: DocumentFormat, pretty: bool) -> Result<String> {
    match format {
        DocumentFormat::Json => {
            if pretty {
                serde_json::to_string_pretty(value).context("failed to serialize JSON")
            } else {
                serde_json::to_string(value).context("failed to serialize JSON")
            }
        }
        #[cfg(feature = "yaml")]
        DocumentFormat::Yaml => serde_yaml::to_string(value).context("failed to serialize YAML"),
        #[cfg(feature = "toml")]
        DocumentFormat::Toml => {
            if pretty {
                toml::to_string_pretty(value).context("failed to serialize TOML")
            } else {
                toml::to_string(value).context("failed to serialize TOML")
            }
        }
    }
}

fn ensure_dir(dir: &Path) -> Result<()> {
    fs::create_dir_all(dir)
        .with_context(|| format!("failed to create output directory {}", dir.display()))
}

fn write_payload(path: &Path, payload: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        ensure_dir(parent)?;
    }
    let mut contents = payload.to_string();
    if !contents.ends_with('\n') {
        contents.push('\n');
    }
    fs::write(path, contents).with_context(|| format!("failed to write {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn timestamped_name_uses_local_clock_format() {
        let at = Local.with_ymd_and_hms(2024, 3, 9, 7, 5, 1).unwrap();
        assert_eq!(
            timestamped_name("form_data", "json", at),
            "form_data_20240309_070501.json"
        );
    }

    #[test]
    fn compact_json_has_no_newlines() {
        let mut store = FormStore::new();
        store.set("a", "1");
        store.set("b", "2");
        let text = serialize_value(&store, DocumentFormat::Json, false).unwrap();
        assert_eq!(text, r#"{"a":"1","b":"2"}"#);
    }
}
