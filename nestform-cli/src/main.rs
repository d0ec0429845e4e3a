//! Drive a nested form from an edit script and write the submitted values.
//!
//! ```text
//! nestform --script edits.txt -o values.yaml
//! printf 'set tableConfig t\nsubmit\n' | nestform --script - --outline
//! ```

use std::fmt::{self, Write as FmtWrite};
use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

use clap::{ArgAction, Parser};
use color_eyre::eyre::{Report, Result, WrapErr, eyre};
use tracing::Level;

use nestform::{
    DataModel, DocumentFormat, FormSession, OutputDestination, SessionOptions, SubmissionWriter,
    SubmitOutcome, load_data_model, load_values, render_outline,
};

#[derive(Debug, Parser)]
#[command(
    name = "nestform",
    version,
    about = "Edit nested schema-list forms from scripts and emit the submitted values"
)]
struct Cli {
    /// Edit script: file path, inline script, or "-" for stdin
    #[arg(short = 's', long = "script", value_name = "SOURCE")]
    script: Option<String>,

    /// Option sets overriding the builtin ones: file path, inline payload, or "-"
    #[arg(long = "options", value_name = "SOURCE")]
    options: Option<String>,

    /// Seed values for the form: file path, inline payload, or "-"
    #[arg(short = 'c', long = "values", alias = "data", value_name = "SOURCE")]
    values: Option<String>,

    /// Output destinations ("-" writes to stdout). Accepts multiple values per flag use.
    #[arg(
        short = 'o',
        long = "output",
        value_name = "DEST",
        num_args = 1..,
        action = ArgAction::Append
    )]
    outputs: Vec<String>,

    /// Print an outline of the form to stderr once the script has run
    #[arg(long = "outline")]
    outline: bool,

    /// Do not submit automatically when the script never does
    #[arg(long = "no-submit")]
    no_submit: bool,

    /// Only validate on submit instead of after every edit
    #[arg(long = "lazy-validation")]
    lazy_validation: bool,

    /// Emit compact JSON/TOML rather than pretty formatting
    #[arg(long = "no-pretty")]
    no_pretty: bool,

    /// Overwrite output files even if they already exist
    #[arg(short = 'f', long = "force", short_alias = 'y', alias = "yes")]
    force: bool,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short = 'v', long = "verbose", action = ArgAction::Count)]
    verbose: u8,
}

#[derive(Debug)]
enum InputSource {
    File(PathBuf),
    Stdin,
}

fn main() -> Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let mut diagnostics = DiagnosticCollector::default();

    let stdin_users = [&cli.script, &cli.options, &cli.values]
        .into_iter()
        .filter(|source| source.as_deref() == Some("-"))
        .count();
    if stdin_users > 1 {
        diagnostics.push_input(
            "stdin",
            "only one of --script, --options and --values can read from stdin",
        );
    }
    let stdin_blocked = stdin_users > 1;

    let options_hint = format_hint(cli.options.as_deref());
    let values_hint = format_hint(cli.values.as_deref());

    let data_model = load_optional(
        cli.options.as_deref(),
        "options",
        stdin_blocked,
        &mut diagnostics,
        |contents| parse_with_fallback(contents, options_hint, "options", load_data_model),
    );
    let values = load_optional(
        cli.values.as_deref(),
        "values",
        stdin_blocked,
        &mut diagnostics,
        |contents| parse_with_fallback(contents, values_hint, "values", load_values),
    );
    let script = load_optional(
        cli.script.as_deref(),
        "script",
        stdin_blocked,
        &mut diagnostics,
        |contents| Ok(contents.to_string()),
    );

    let writer = build_writer(&cli, values_hint, &mut diagnostics);
    ensure_output_paths_available(&writer, cli.force, &mut diagnostics);

    diagnostics.into_result()?;

    let mut session = FormSession::new().with_options(
        SessionOptions::default()
            .with_submit_at_end(!cli.no_submit)
            .with_validate_on_change(!cli.lazy_validation),
    );
    if let Some(overrides) = data_model {
        session = session.with_data_model(DataModel::builtin().merged(overrides));
    }
    if let Some(values) = values {
        session = session.with_values(values);
    }

    let report = session
        .run_script(script.as_deref().unwrap_or_default())
        .map_err(|err| eyre!("{err:#}"))?;

    if cli.outline {
        eprint!("{}", render_outline(&report.model));
    }

    let Some(outcome) = report.outcome else {
        return Ok(());
    };
    if let SubmitOutcome::Invalid { issues } = &outcome {
        let mut body = format!("submission blocked by {} issue(s):\n", issues.len());
        for issue in issues {
            let _ = writeln!(body, "  {}: {}", issue.path, issue.message);
        }
        return Err(eyre!(body));
    }
    writer.deliver(&outcome).map_err(|err| eyre!("{err:#}"))?;
    Ok(())
}

fn init_tracing(verbosity: u8) {
    let level = match verbosity {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_max_level(level)
        .with_target(false)
        .init();
}

fn format_hint(source: Option<&str>) -> Option<DocumentFormat> {
    source
        .filter(|source| *source != "-")
        .and_then(|source| DocumentFormat::from_extension(Path::new(source)))
}

fn load_optional<T>(
    source: Option<&str>,
    label: &str,
    skip: bool,
    diagnostics: &mut DiagnosticCollector,
    parse: impl FnOnce(&str) -> Result<T>,
) -> Option<T> {
    if skip {
        return None;
    }
    let raw = source?;
    match read_input(raw, label).and_then(|contents| parse(&contents)) {
        Ok(value) => Some(value),
        Err(err) => {
            diagnostics.push_input(label, format!("{err:#}"));
            None
        }
    }
}

/// File contents, stdin, or the argument itself when no such file exists.
fn read_input(source: &str, label: &str) -> Result<String> {
    if source == "-" {
        return read_from_source(&InputSource::Stdin);
    }
    let path = PathBuf::from(source);
    match read_from_source(&InputSource::File(path.clone())) {
        Ok(contents) => Ok(contents),
        Err(err) if is_not_found(&err) => Ok(source.to_string()),
        Err(err) => Err(err.wrap_err(format!("failed to load {label} from {}", path.display()))),
    }
}

fn read_from_source(source: &InputSource) -> Result<String> {
    match source {
        InputSource::Stdin => {
            let mut buffer = String::new();
            io::stdin()
                .read_to_string(&mut buffer)
                .wrap_err("failed to read from stdin")?;
            Ok(buffer)
        }
        InputSource::File(path) => fs::read_to_string(path)
            .wrap_err_with(|| format!("failed to read file {}", path.display())),
    }
}

fn is_not_found(err: &Report) -> bool {
    err.downcast_ref::<io::Error>()
        .is_some_and(|io_err| io_err.kind() == io::ErrorKind::NotFound)
}

/// Parse with the hinted format first, then every other compiled-in format.
fn parse_with_fallback<T, E: fmt::Display>(
    contents: &str,
    hint: Option<DocumentFormat>,
    label: &str,
    parse: fn(&str, DocumentFormat) -> std::result::Result<T, E>,
) -> Result<T> {
    let primary = hint.unwrap_or_default();
    let first_error = match parse(contents, primary) {
        Ok(value) => return Ok(value),
        Err(err) => err,
    };
    for candidate in DocumentFormat::available_formats() {
        if candidate == primary {
            continue;
        }
        if let Ok(value) = parse(contents, candidate) {
            return Ok(value);
        }
    }
    Err(eyre!(
        "failed to parse {label}: tried {} (first error: {first_error:#})",
        format_list()
    ))
}

fn format_list() -> String {
    let items: Vec<String> = DocumentFormat::available_formats()
        .into_iter()
        .map(|fmt| fmt.to_string())
        .collect();
    items.join(", ")
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

/// Stdout unless `-o` says otherwise; the format follows the file extensions,
/// then the seed values' extension, then JSON.
fn build_writer(
    cli: &Cli,
    values_hint: Option<DocumentFormat>,
    diagnostics: &mut DiagnosticCollector,
) -> SubmissionWriter {
    let mut destinations = Vec::new();
    for raw in &cli.outputs {
        if raw.trim().is_empty() {
            diagnostics.push_output("output destination cannot be empty");
        } else {
            destinations.push(OutputDestination::parse(raw));
        }
    }
    if cli.outputs.is_empty() {
        destinations.push(OutputDestination::Stdout);
    }

    let file_paths: Vec<PathBuf> = destinations
        .iter()
        .filter_map(OutputDestination::as_file)
        .cloned()
        .collect();
    let format = if file_paths.is_empty() {
        values_hint.unwrap_or_default()
    } else {
        infer_format_from_files(&file_paths, diagnostics).unwrap_or_default()
    };

    SubmissionWriter::new(format, destinations).compact(cli.no_pretty)
}

fn infer_format_from_files(
    file_paths: &[PathBuf],
    diagnostics: &mut DiagnosticCollector,
) -> Option<DocumentFormat> {
    let mut detected: Option<DocumentFormat> = None;
    for path in file_paths {
        match DocumentFormat::from_extension(path) {
            Some(format) => match detected {
                Some(existing) if existing != format => diagnostics.push_output(format!(
                    "output file {} uses {format} but other destinations use {existing}; align extensions",
                    path.display()
                )),
                Some(_) => {}
                None => detected = Some(format),
            },
            None => diagnostics.push_output(format!(
                "cannot infer format from output file {}; use one of: {}",
                path.display(),
                format_list()
            )),
        }
    }
    detected
}

fn ensure_output_paths_available(
    writer: &SubmissionWriter,
    force: bool,
    diagnostics: &mut DiagnosticCollector,
) {
    if force {
        return;
    }
    for path in writer.destinations().iter().filter_map(OutputDestination::as_file) {
        if path.exists() {
            diagnostics.push_output(format!(
                "file {} already exists (pass --force to overwrite)",
                path.display()
            ));
        }
    }
}
