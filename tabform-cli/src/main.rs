use std::fmt::Write as FmtWrite;
use std::fs::{self, File, OpenOptions};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::Duration;

use clap::Parser;
use color_eyre::eyre::{Report, Result, WrapErr, eyre};
use tracing::info;
use tracing_subscriber::EnvFilter;

use tabform::{DocumentFormat, FormUI, SchemaSource, UiOptions};

const DEFAULT_SCHEMA: &str = "form_config.json";

#[derive(Debug, Parser)]
#[command(
    name = "tabform",
    version,
    about = "Fill in tabbed forms described by a JSON configuration"
)]
struct Cli {
    /// Form schema: file path or http(s) URL
    #[arg(short = 's', long = "schema", value_name = "SPEC", default_value = DEFAULT_SCHEMA)]
    schema: String,

    /// Title shown above the header fields
    #[arg(long = "title", value_name = "TEXT")]
    title: Option<String>,

    /// Pre-existing file copied to the output directory when the form is completed
    #[arg(short = 'a', long = "artifact", value_name = "PATH")]
    artifact: Option<PathBuf>,

    /// Directory receiving exports and completion artifacts
    #[arg(short = 'o', long = "output-dir", value_name = "DIR", default_value = ".")]
    output_dir: PathBuf,

    /// Format used by the data export action
    #[arg(long = "export-format", value_name = "FORMAT", default_value_t = DocumentFormat::default())]
    export_format: DocumentFormat,

    /// UI refresh interval in milliseconds; pending schema loads are checked on every tick
    #[arg(long = "tick-rate", value_name = "MS", default_value_t = 250)]
    tick_rate: u64,

    /// Hide the key binding hints
    #[arg(long = "no-help")]
    no_help: bool,

    /// Clear every entered value on the first Ctrl+X
    #[arg(long = "no-confirm-clear")]
    no_confirm_clear: bool,

    /// Print the entered values as JSON after the form closes
    #[arg(long = "print-values")]
    print_values: bool,

    /// Append diagnostic logs to this file (filter with RUST_LOG)
    #[arg(long = "log-file", value_name = "PATH")]
    log_file: Option<PathBuf>,
}

fn main() -> Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();

    let mut diagnostics = DiagnosticCollector::default();
    check_inputs(&cli, &mut diagnostics);
    diagnostics.into_result()?;

    if let Some(path) = cli.log_file.as_deref() {
        init_logging(path)?;
    }

    let source = SchemaSource::parse(&cli.schema);
    info!(source = %source, "tabform starting");

    let mut ui = FormUI::new(source).with_options(build_options(&cli));
    if let Some(title) = cli.title.as_ref() {
        ui = ui.with_title(title.clone());
    }
    let values = ui.run().map_err(Report::msg)?;

    if cli.print_values {
        let rendered = serde_json::to_string_pretty(&values.to_json())
            .wrap_err("failed to serialize entered values")?;
        println!("{rendered}");
    }
    Ok(())
}

fn build_options(cli: &Cli) -> UiOptions {
    let mut options = UiOptions::default()
        .with_tick_rate(Duration::from_millis(cli.tick_rate.max(1)))
        .with_help(!cli.no_help)
        .with_confirm_clear(!cli.no_confirm_clear)
        .with_output_dir(&cli.output_dir)
        .with_export_format(cli.export_format);
    if let Some(artifact) = cli.artifact.as_ref() {
        options = options.with_artifact(artifact);
    }
    options
}

/// Problems worth refusing to start over. A missing schema file is not one
/// of them: the form reports it and offers a retry.
fn check_inputs(cli: &Cli, diagnostics: &mut DiagnosticCollector) {
    if cli.schema.trim().is_empty() {
        diagnostics.push_input("schema", "schema source cannot be empty");
    }
    if let Some(artifact) = cli.artifact.as_deref()
        && !artifact.is_file()
    {
        diagnostics.push_input(
            "artifact",
            format!("{} does not exist or is not a file", artifact.display()),
        );
    }
    if cli.output_dir.exists() && !cli.output_dir.is_dir() {
        diagnostics.push_output(format!(
            "{} exists and is not a directory",
            cli.output_dir.display()
        ));
    }
}

fn init_logging(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)
            .wrap_err_with(|| format!("failed to create log directory {}", parent.display()))?;
    }
    let file: File = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .wrap_err_with(|| format!("failed to open log file {}", path.display()))?;
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .try_init()
        .map_err(|err| eyre!("failed to install log subscriber: {err}"))
}

#[derive(Default)]
struct DiagnosticCollector {
    messages: Vec<String>,
}

impl DiagnosticCollector {
    fn push_input(&mut self, label: &str, message: impl Into<String>) {
        self.messages
            .push(format!("input ({label}): {}", message.into()));
    }

    fn push_output(&mut self, message: impl Into<String>) {
        self.messages.push(format!("output: {}", message.into()));
    }

    fn into_result(self) -> Result<()> {
        if self.messages.is_empty() {
            return Ok(());
        }
        let mut body = String::from("encountered input/output issues:\n");
        for (idx, msg) in self.messages.iter().enumerate() {
            let _ = writeln!(body, "  {}. {}", idx + 1, msg);
        }
        Err(eyre!(body))
    }
}
