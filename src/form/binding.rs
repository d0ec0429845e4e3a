use crate::domain::{OptionItem, OptionSet, paths};
use crate::tree::{FieldPath, Scalar};

use super::{error::FormError, state::FormModel};

/// What a widget needs to draw a field.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldView {
    pub value: String,
    pub error: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextField {
    pub path: FieldPath,
    pub label: String,
}

impl TextField {
    pub fn new(path: FieldPath, label: impl Into<String>) -> Self {
        Self {
            path,
            label: label.into(),
        }
    }

    pub fn view(&self, model: &FormModel) -> FieldView {
        FieldView {
            value: model
                .get_scalar(&self.path)
                .and_then(Scalar::as_text)
                .unwrap_or_default()
                .to_string(),
            error: model.visible_error(&self.path).map(str::to_string),
        }
    }

    pub fn change(
        &self,
        model: &mut FormModel,
        text: impl Into<String>,
    ) -> Result<bool, FormError> {
        model.set_value(&self.path, Scalar::Text(text.into()))
    }

    pub fn blur(&self, model: &mut FormModel) -> Result<bool, FormError> {
        model.touch(&self.path)
    }
}

/// Closed-choice field over one of the model's option sets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChoiceField {
    pub path: FieldPath,
    pub label: String,
    pub option_set: String,
}

impl ChoiceField {
    pub fn new(path: FieldPath, label: impl Into<String>, option_set: impl Into<String>) -> Self {
        Self {
            path,
            label: label.into(),
            option_set: option_set.into(),
        }
    }

    /// Binding for a known choice leaf of the form, using its usual option set.
    pub fn for_path(path: FieldPath, label: impl Into<String>) -> Result<Self, FormError> {
        let set = paths::choice_set(&path).ok_or_else(|| FormError::NotAChoice(path.to_string()))?;
        Ok(Self::new(path, label, set))
    }

    pub fn options<'a>(&self, model: &'a FormModel) -> Result<&'a OptionSet, FormError> {
        model
            .data_model()
            .get(&self.option_set)
            .ok_or_else(|| FormError::MissingOptionSet(self.option_set.clone()))
    }

    /// Option whose name equals the stored scalar; `None` for null or
    /// unknown names.
    pub fn selected<'a>(&self, model: &'a FormModel) -> Option<&'a OptionItem> {
        let options = self.options(model).ok()?;
        options.find_by_name(model.get_scalar(&self.path).and_then(Scalar::as_text))
    }

    pub fn view(&self, model: &FormModel) -> FieldView {
        FieldView {
            value: self
                .selected(model)
                .map(|item| item.label.clone())
                .unwrap_or_default(),
            error: model.visible_error(&self.path).map(str::to_string),
        }
    }

    /// Store the option's name, or null when cleared.
    pub fn select(
        &self,
        model: &mut FormModel,
        option: Option<&OptionItem>,
    ) -> Result<bool, FormError> {
        let name = option
            .and_then(|item| item.name.clone())
            .filter(|name| !name.is_empty());
        model.set_value(&self.path, Scalar::from(name))
    }

    /// Select by visible label. An empty label clears the field.
    pub fn select_label(&self, model: &mut FormModel, label: &str) -> Result<bool, FormError> {
        if label.is_empty() {
            return self.select(model, None);
        }
        let item = self
            .options(model)?
            .find_by_label(label)
            .cloned()
            .ok_or_else(|| FormError::UnknownOption {
                set: self.option_set.clone(),
                label: label.to_string(),
            })?;
        self.select(model, Some(&item))
    }

    pub fn blur(&self, model: &mut FormModel) -> Result<bool, FormError> {
        model.touch(&self.path)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldBinding {
    Text(TextField),
    Choice(ChoiceField),
}

impl FieldBinding {
    pub fn path(&self) -> &FieldPath {
        match self {
            FieldBinding::Text(field) => &field.path,
            FieldBinding::Choice(field) => &field.path,
        }
    }

    pub fn label(&self) -> &str {
        match self {
            FieldBinding::Text(field) => &field.label,
            FieldBinding::Choice(field) => &field.label,
        }
    }

    pub fn view(&self, model: &FormModel) -> FieldView {
        match self {
            FieldBinding::Text(field) => field.view(model),
            FieldBinding::Choice(field) => field.view(model),
        }
    }
}
