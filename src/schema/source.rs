use std::{fmt, fs, path::PathBuf};

use anyhow::{Context, Result, bail};
use chrono::Utc;

use crate::io::DocumentFormat;

const CACHE_BUST_PARAM: &str = "t";

/// Where the form configuration document is read from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SchemaSource {
    File(PathBuf),
    Url(String),
}

impl SchemaSource {
    /// `http://` and `https://` specs are fetched over HTTP; anything else is a path.
    pub fn parse(spec: &str) -> Self {
        let trimmed = spec.trim();
        let lower = trimmed.to_ascii_lowercase();
        if lower.starts_with("http://") || lower.starts_with("https://") {
            SchemaSource::Url(trimmed.to_string())
        } else {
            SchemaSource::File(PathBuf::from(trimmed))
        }
    }

    pub fn format(&self) -> DocumentFormat {
        match self {
            SchemaSource::File(path) => DocumentFormat::from_path(path),
            SchemaSource::Url(url) => {
                let path = url.split(['?', '#']).next().unwrap_or(url);
                path.rsplit_once('.')
                    .and_then(|(_, ext)| DocumentFormat::from_extension(ext))
                    .unwrap_or_default()
            }
        }
    }

    pub(crate) fn read(&self) -> Result<String> {
        match self {
            SchemaSource::File(path) => fs::read_to_string(path)
                .with_context(|| format!("failed to read file {}", path.display())),
            SchemaSource::Url(url) => {
                let target = cache_busted_url(url, Utc::now().timestamp_millis());
                let response = reqwest::blocking::get(&target)
                    .with_context(|| format!("request to {target} failed"))?;
                let status = response.status();
                if !status.is_success() {
                    bail!("{target} responded with {status}");
                }
                response
                    .text()
                    .with_context(|| format!("failed to read response body from {target}"))
            }
        }
    }
}

impl fmt::Display for SchemaSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SchemaSource::File(path) => write!(f, "{}", path.display()),
            SchemaSource::Url(url) => f.write_str(url),
        }
    }
}

/// Append the `t=<stamp>` cache-busting query parameter, keeping any fragment last.
pub fn cache_busted_url(url: &str, stamp: i64) -> String {
    let (base, fragment) = match url.split_once('#') {
        Some((base, fragment)) => (base, Some(fragment)),
        None => (url, None),
    };
    let separator = match base.find('?') {
        None => "?",
        Some(_) if base.ends_with('?') || base.ends_with('&') => "",
        Some(_) => "&",
    };
    let mut busted = format!("{base}{separator}{CACHE_BUST_PARAM}={stamp}");
    if let Some(fragment) = fragment {
        busted.push('#');
        busted.push_str(fragment);
    }
    busted
}
