use std::sync::Arc;

use anyhow::{Context, Result};

use crate::domain::{DataModel, FormValues};
use crate::form::{
    CommandOutcome, FormModel, SchemaValidator, SubmitOutcome, apply_command, log_submission,
    parse_script,
};
use crate::tree::ValueNode;

use super::options::SessionOptions;

/// Entry point for hosts: wires option sets, seed values and the schema
/// validator into a [`FormModel`].
#[derive(Debug, Default)]
pub struct FormSession {
    data_model: DataModel,
    values: Option<ValueNode>,
    options: SessionOptions,
}

/// State left behind by [`FormSession::run_script`].
#[derive(Debug)]
pub struct SessionReport {
    pub model: FormModel,
    pub outcome: Option<SubmitOutcome>,
}

impl SessionReport {
    pub fn submitted(&self) -> Option<&FormValues> {
        match &self.outcome {
            Some(SubmitOutcome::Submitted(values)) => Some(values),
            _ => None,
        }
    }
}

impl FormSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_data_model(mut self, data_model: DataModel) -> Self {
        self.data_model = data_model;
        self
    }

    pub fn with_values(mut self, values: ValueNode) -> Self {
        self.values = Some(values);
        self
    }

    pub fn with_options(mut self, options: SessionOptions) -> Self {
        self.options = options;
        self
    }

    pub fn build(self) -> Result<FormModel> {
        let FormSession {
            data_model,
            values,
            options,
        } = self;

        let validator = SchemaValidator::new(&data_model)?;
        let mut model = FormModel::new(Arc::new(data_model), Box::new(validator))
            .with_validate_on_change(options.validate_on_change);
        if let Some(values) = values {
            model = model.with_values(values).context("invalid seed values")?;
        }
        Ok(model)
    }

    /// Apply every command of `script` in order, then submit if the script
    /// did not and the options ask for it.
    pub fn run_script(self, script: &str) -> Result<SessionReport> {
        let lines = parse_script(script)?;
        let submit_at_end = self.options.submit_at_end;
        let mut model = self.build()?;

        let mut outcome = None;
        for line in lines {
            let result = apply_command(&mut model, line.command)
                .with_context(|| format!("line {}", line.line))?;
            if let CommandOutcome::Submitted(submitted) = result {
                outcome = Some(submitted);
            }
        }
        if outcome.is_none() && submit_at_end {
            outcome = Some(model.submit(log_submission)?);
        }
        Ok(SessionReport { model, outcome })
    }
}
