use std::fmt;

use anyhow::{Context, Result};
use jsonschema::{ValidationError, Validator, error::ValidationErrorKind, validator_for};
use serde_json::{Value, json};

use crate::domain::{DataModel, JOB_TYPES, TYPE_OPTIONS};
use crate::tree::{FieldPath, ValueNode, resolve, set_in_place};

/// Message stored for missing, null or empty required fields.
pub const REQUIRED: &str = "Required";

/// Key under which errors about the form as a whole are stored.
pub const FORM_ERROR_KEY: &str = "_form";

/// Maps a value tree to an error tree addressed by the same paths.
pub trait Validate: fmt::Debug {
    fn validate(&self, values: &ValueNode) -> ValueNode;
}

/// Accepts everything.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopValidator;

impl Validate for NoopValidator {
    fn validate(&self, _values: &ValueNode) -> ValueNode {
        ValueNode::default()
    }
}

/// JSON Schema backed validation of the fixed form shape.
pub struct SchemaValidator {
    schema: Value,
    validator: Validator,
}

impl fmt::Debug for SchemaValidator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SchemaValidator")
            .field("schema", &self.schema)
            .finish_non_exhaustive()
    }
}

impl SchemaValidator {
    pub fn new(data_model: &DataModel) -> Result<Self> {
        Self::from_schema(form_schema(data_model))
    }

    pub fn from_schema(schema: Value) -> Result<Self> {
        let validator = validator_for(&schema).context("failed to compile form schema")?;
        Ok(Self { schema, validator })
    }

    pub fn schema(&self) -> &Value {
        &self.schema
    }
}

impl Validate for SchemaValidator {
    fn validate(&self, values: &ValueNode) -> ValueNode {
        let instance = Value::from(values);
        let mut errors = ValueNode::default();
        for error in self.validator.iter_errors(&instance) {
            let (pointer, message) = describe(&error);
            let path = match FieldPath::from_pointer(&pointer) {
                Ok(path) if path.is_empty() => FieldPath::root().child(FORM_ERROR_KEY),
                Ok(path) => path,
                Err(err) => {
                    tracing::warn!(%pointer, %err, "dropping validation error");
                    continue;
                }
            };
            record_message(&mut errors, &path, message);
        }
        errors
    }
}

fn describe(error: &ValidationError<'_>) -> (String, String) {
    let pointer = error.instance_path.to_string();
    match &error.kind {
        ValidationErrorKind::Required { property } => {
            let name = property
                .as_str()
                .map(str::to_string)
                .unwrap_or_else(|| property.to_string());
            let child = FieldPath::root().child(name).to_pointer();
            (format!("{pointer}{child}"), REQUIRED.to_string())
        }
        ValidationErrorKind::MinLength { .. } | ValidationErrorKind::Type { .. } => {
            (pointer, REQUIRED.to_string())
        }
        _ => (pointer, error.to_string()),
    }
}

/// Store `message` at `path` unless a message already covers it. "Required"
/// wins over any other message for the same field.
fn record_message(errors: &mut ValueNode, path: &FieldPath, message: String) {
    if path
        .ancestors()
        .any(|ancestor| resolve(errors, &ancestor).is_some_and(ValueNode::is_scalar))
    {
        return;
    }
    if let Some(existing) = resolve(errors, path) {
        if existing.as_text() == Some(REQUIRED) || message != REQUIRED {
            return;
        }
    }
    if let Err(err) = set_in_place(errors, path, ValueNode::text(message)) {
        tracing::warn!(%path, %err, "cannot place validation error");
    }
}

/// JSON Schema for the form: every leaf is a required, non-empty string and
/// choice leaves must name an option of their set.
pub fn form_schema(data_model: &DataModel) -> Value {
    let text = json!({"type": "string", "minLength": 1});
    let choice = |set: &str| {
        let mut schema = text.clone();
        if let Some(options) = data_model.get(set) {
            let names = options.names();
            if !names.is_empty() {
                schema["enum"] = json!(names);
            }
        }
        schema
    };

    let third_level = json!({
        "type": "object",
        "required": ["name", "random"],
        "properties": {
            "name": text,
            "random": choice(TYPE_OPTIONS),
        }
    });
    let second_level = json!({
        "type": "object",
        "required": ["name", "type"],
        "properties": {
            "name": text,
            "type": choice(TYPE_OPTIONS),
            "thirdLevel": {"type": "array", "items": third_level},
        }
    });
    let schema_entry = json!({
        "type": "object",
        "required": ["jobTypes", "config"],
        "properties": {
            "jobTypes": choice(JOB_TYPES),
            "config": text,
            "secondLevel": {"type": "array", "items": second_level},
        }
    });
    json!({
        "$schema": "http://json-schema.org/draft-07/schema#",
        "title": "Schema list form",
        "type": "object",
        "required": ["tableConfig"],
        "properties": {
            "tableConfig": text,
            "schemaList": {"type": "array", "items": schema_entry},
        }
    })
}
