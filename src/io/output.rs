use std::fmt;
use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};

use crate::domain::FormValues;
use crate::form::SubmitOutcome;

use super::DocumentFormat;

/// Where a rendered submission is written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputDestination {
    Stdout,
    File(PathBuf),
}

impl OutputDestination {
    /// `-` names stdout, anything else a file.
    pub fn parse(raw: &str) -> Self {
        if raw == "-" {
            OutputDestination::Stdout
        } else {
            OutputDestination::File(PathBuf::from(raw))
        }
    }

    pub fn as_file(&self) -> Option<&PathBuf> {
        match self {
            OutputDestination::File(path) => Some(path),
            OutputDestination::Stdout => None,
        }
    }
}

impl fmt::Display for OutputDestination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputDestination::Stdout => write!(f, "stdout"),
            OutputDestination::File(path) => write!(f, "{}", path.display()),
        }
    }
}

/// Renders submitted [`FormValues`] in one format and hands the document to
/// every destination.
#[derive(Debug, Clone)]
pub struct SubmissionWriter {
    format: DocumentFormat,
    compact: bool,
    destinations: Vec<OutputDestination>,
}

impl SubmissionWriter {
    pub fn new(format: DocumentFormat, destinations: Vec<OutputDestination>) -> Self {
        Self {
            format,
            compact: false,
            destinations,
        }
    }

    /// Single-line JSON, plain TOML tables. YAML has one layout.
    pub fn compact(mut self, compact: bool) -> Self {
        self.compact = compact;
        self
    }

    pub fn format(&self) -> DocumentFormat {
        self.format
    }

    pub fn destinations(&self) -> &[OutputDestination] {
        &self.destinations
    }

    /// The document for `values`, always newline terminated.
    pub fn render(&self, values: &FormValues) -> Result<String> {
        let mut document = match self.format {
            DocumentFormat::Json if self.compact => {
                serde_json::to_string(values).context("failed to serialize JSON")?
            }
            DocumentFormat::Json => {
                serde_json::to_string_pretty(values).context("failed to serialize JSON")?
            }
            #[cfg(feature = "yaml")]
            DocumentFormat::Yaml => {
                serde_yaml::to_string(values).context("failed to serialize YAML")?
            }
            #[cfg(feature = "toml")]
            DocumentFormat::Toml if self.compact => {
                toml::to_string(values).context("failed to serialize TOML")?
            }
            #[cfg(feature = "toml")]
            DocumentFormat::Toml => {
                toml::to_string_pretty(values).context("failed to serialize TOML")?
            }
        };
        if !document.ends_with('\n') {
            document.push('\n');
        }
        Ok(document)
    }

    /// Write the values of an accepted submission. A blocked submission
    /// writes nothing and reports `false`.
    pub fn deliver(&self, outcome: &SubmitOutcome) -> Result<bool> {
        let SubmitOutcome::Submitted(values) = outcome else {
            return Ok(false);
        };
        let document = self.render(values)?;
        for destination in &self.destinations {
            match destination {
                OutputDestination::Stdout => {
                    let mut stdout = io::stdout().lock();
                    stdout
                        .write_all(document.as_bytes())
                        .and_then(|()| stdout.flush())
                        .context("failed to write to stdout")?;
                }
                OutputDestination::File(path) => fs::write(path, &document)
                    .with_context(|| format!("failed to write to file {}", path.display()))?,
            }
            tracing::debug!(%destination, format = %self.format, "submission written");
        }
        Ok(true)
    }
}
