use crate::tree::FieldPath;

/// One user interaction with the form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormCommand {
    /// Store text at a leaf.
    Set { path: FieldPath, value: String },
    /// Store null at a leaf.
    Clear { path: FieldPath },
    /// Pick the option with `label` for a choice field; an empty label clears it.
    Choose { path: FieldPath, label: String },
    Touch { path: FieldPath },
    Append { group: FieldPath },
    Remove { group: FieldPath, index: usize },
    Submit,
}
