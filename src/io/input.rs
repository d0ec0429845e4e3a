use anyhow::{Context, Result, bail};
use serde_json::Value;

use crate::domain::DataModel;
use crate::tree::ValueNode;

use super::DocumentFormat;

/// Parse structured data in any supported format into a `serde_json::Value`.
pub fn parse_document_str(contents: &str, format: DocumentFormat) -> Result<Value> {
    match format {
        DocumentFormat::Json => {
            serde_json::from_str::<Value>(contents).with_context(|| "failed to parse JSON document")
        }
        #[cfg(feature = "yaml")]
        DocumentFormat::Yaml => {
            serde_yaml::from_str::<Value>(contents).with_context(|| "failed to parse YAML document")
        }
        #[cfg(feature = "toml")]
        DocumentFormat::Toml => contents
            .parse::<toml::Value>()
            .with_context(|| "failed to parse TOML document")
            .and_then(|value| {
                serde_json::to_value(value).context("failed to convert TOML to JSON")
            }),
    }
}

/// Option sets document, e.g. `{"typeOptions": [{"name": "date", "label": "date"}]}`.
pub fn load_data_model(contents: &str, format: DocumentFormat) -> Result<DataModel> {
    let value = parse_document_str(contents, format)?;
    serde_json::from_value(value).context("option sets must map names to lists of {name, label}")
}

/// Seed values for a form. Leaves must be strings or null.
pub fn load_values(contents: &str, format: DocumentFormat) -> Result<ValueNode> {
    let value = parse_document_str(contents, format)?;
    let values = ValueNode::try_from(value)
        .context("form values may only contain strings, nulls, lists and maps")?;
    if let Some(path) = values.first_flag() {
        bail!("form values may only contain strings and nulls, found a boolean at '{path}'");
    }
    Ok(values)
}
