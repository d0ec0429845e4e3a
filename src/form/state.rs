use std::sync::Arc;

use crate::domain::{DataModel, FormValues, GroupKind};
use crate::tree::{
    FieldPath, Scalar, ValueNode, append_in_place, remove_in_place, resolve, set_in_place,
};

use super::{
    error::FormError,
    validation::{NoopValidator, Validate},
};

/// A validation message that blocks submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldIssue {
    pub path: FieldPath,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    Submitted(FormValues),
    Invalid { issues: Vec<FieldIssue> },
}

/// Owner of a form's value, error and touched trees.
///
/// Every mutation goes through the tree editor against the current tree and
/// bumps [`FormModel::revision`] when something actually changed.
#[derive(Debug)]
pub struct FormModel {
    values: ValueNode,
    errors: ValueNode,
    touched: ValueNode,
    data_model: Arc<DataModel>,
    validator: Box<dyn Validate>,
    validate_on_change: bool,
    revision: u64,
}

impl FormModel {
    pub fn new(data_model: Arc<DataModel>, validator: Box<dyn Validate>) -> Self {
        Self {
            values: ValueNode::from(&FormValues::initial()),
            errors: ValueNode::default(),
            touched: ValueNode::default(),
            data_model,
            validator,
            validate_on_change: true,
            revision: 0,
        }
    }

    /// Builtin option sets, no validation.
    pub fn unvalidated() -> Self {
        Self::new(Arc::new(DataModel::builtin()), Box::new(NoopValidator))
    }

    pub fn with_values(mut self, values: ValueNode) -> Result<Self, FormError> {
        if values.as_record().is_none() {
            return Err(FormError::InvalidRoot);
        }
        if let Some(path) = values.first_flag() {
            return Err(FormError::FlagValue(path.to_string()));
        }
        self.values = values;
        self.errors = ValueNode::default();
        self.touched = ValueNode::default();
        Ok(self)
    }

    pub fn with_validate_on_change(mut self, enabled: bool) -> Self {
        self.validate_on_change = enabled;
        self
    }

    pub fn values(&self) -> &ValueNode {
        &self.values
    }

    pub fn errors(&self) -> &ValueNode {
        &self.errors
    }

    pub fn touched(&self) -> &ValueNode {
        &self.touched
    }

    pub fn data_model(&self) -> &DataModel {
        &self.data_model
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn get_value(&self, path: &FieldPath) -> Option<&ValueNode> {
        resolve(&self.values, path)
    }

    pub fn get_scalar(&self, path: &FieldPath) -> Option<&Scalar> {
        self.get_value(path).and_then(ValueNode::as_scalar)
    }

    pub fn get_error(&self, path: &FieldPath) -> Option<&str> {
        resolve(&self.errors, path).and_then(ValueNode::as_text)
    }

    pub fn is_touched(&self, path: &FieldPath) -> bool {
        resolve(&self.touched, path)
            .and_then(ValueNode::as_flag)
            .unwrap_or(false)
    }

    /// Error message to display at `path`: only once the field was touched.
    pub fn visible_error(&self, path: &FieldPath) -> Option<&str> {
        if self.is_touched(path) {
            self.get_error(path)
        } else {
            None
        }
    }

    /// Replace the leaf at `path`.
    pub fn set_value(
        &mut self,
        path: &FieldPath,
        value: impl Into<Scalar>,
    ) -> Result<bool, FormError> {
        let value = value.into();
        if matches!(value, Scalar::Bool(_)) {
            return Err(FormError::FlagValue(path.to_string()));
        }
        let changed = set_in_place(&mut self.values, path, ValueNode::Scalar(value))?;
        if changed {
            tracing::debug!(%path, "field edited");
            self.after_edit();
        }
        Ok(changed)
    }

    /// Mark `path` as interacted with (blur).
    pub fn touch(&mut self, path: &FieldPath) -> Result<bool, FormError> {
        let changed = set_in_place(&mut self.touched, path, ValueNode::flag(true))?;
        if self.validate_on_change {
            self.validate();
        }
        Ok(changed)
    }

    /// Append a blank entry to the group at `group`, shaped like its siblings.
    /// Nested groups are only reachable through an existing parent entry.
    pub fn append(&mut self, group: &FieldPath) -> Result<usize, FormError> {
        let unknown = || FormError::UnknownGroup(group.to_string());
        let kind = GroupKind::from_path(group).ok_or_else(unknown)?;
        if kind != GroupKind::SchemaList {
            let entry = group.parent().ok_or_else(unknown)?;
            if self.get_value(&entry).and_then(ValueNode::as_record).is_none() {
                return Err(unknown());
            }
        }
        self.append_with(group, &kind.template())
    }

    pub fn append_with(
        &mut self,
        group: &FieldPath,
        template: &ValueNode,
    ) -> Result<usize, FormError> {
        let len = append_in_place(&mut self.values, group, template)?;
        tracing::debug!(%group, len, "entry appended");
        self.after_edit();
        Ok(len)
    }

    /// Remove entry `index` of `group`. Error and touched state follow the
    /// surviving entries. Out-of-range indices are ignored.
    pub fn remove_at(&mut self, group: &FieldPath, index: usize) -> bool {
        if !remove_in_place(&mut self.values, group, index) {
            tracing::debug!(%group, index, "remove ignored");
            return false;
        }
        remove_in_place(&mut self.errors, group, index);
        remove_in_place(&mut self.touched, group, index);
        tracing::debug!(%group, index, "entry removed");
        self.after_edit();
        true
    }

    /// Re-run the validator over the current values.
    pub fn validate(&mut self) {
        self.errors = self.validator.validate(&self.values);
    }

    pub fn error_count(&self) -> usize {
        self.errors.text_leaf_count()
    }

    pub fn issues(&self) -> Vec<FieldIssue> {
        self.errors
            .leaves()
            .into_iter()
            .filter_map(|(path, scalar)| {
                scalar.as_text().map(|message| FieldIssue {
                    path,
                    message: message.to_string(),
                })
            })
            .collect()
    }

    pub fn leaf_paths(&self) -> Vec<FieldPath> {
        self.values
            .leaves()
            .into_iter()
            .map(|(path, _)| path)
            .collect()
    }

    /// Mark every leaf as touched, validate, and hand the typed values to
    /// `handler` when nothing is left to fix.
    pub fn submit<F>(&mut self, handler: F) -> Result<SubmitOutcome, FormError>
    where
        F: FnOnce(&FormValues),
    {
        for path in self.leaf_paths() {
            set_in_place(&mut self.touched, &path, ValueNode::flag(true))?;
        }
        self.validate();

        let issues = self.issues();
        if !issues.is_empty() {
            tracing::warn!(issues = issues.len(), "submission blocked by validation");
            return Ok(SubmitOutcome::Invalid { issues });
        }

        let values = FormValues::try_from(&self.values)?;
        handler(&values);
        Ok(SubmitOutcome::Submitted(values))
    }

    pub(crate) fn check_revision(&self, expected: u64) -> Result<(), FormError> {
        if expected != self.revision {
            return Err(FormError::StaleRevision {
                expected,
                actual: self.revision,
            });
        }
        Ok(())
    }

    fn after_edit(&mut self) {
        self.revision += 1;
        if self.validate_on_change {
            self.validate();
        }
    }
}

/// Default submission handler: log the submitted tree.
pub fn log_submission(values: &FormValues) {
    match serde_json::to_string(values) {
        Ok(payload) => tracing::info!(%payload, "form submitted"),
        Err(err) => tracing::warn!(%err, "form submitted but could not be serialized"),
    }
}
