use thiserror::Error;

use crate::domain::ShapeError;
use crate::tree::PathError;

#[derive(Debug, Error)]
pub enum FormError {
    #[error(transparent)]
    Path(#[from] PathError),
    #[error("'{0}' is not a repeated group of this form")]
    UnknownGroup(String),
    #[error("'{0}' is not a choice field")]
    NotAChoice(String),
    #[error("option set '{0}' is not configured")]
    MissingOptionSet(String),
    #[error("'{label}' is not an option of {set}")]
    UnknownOption { set: String, label: String },
    #[error("form changed since revision {expected} (now at {actual})")]
    StaleRevision { expected: u64, actual: u64 },
    #[error("form values must be a record at the root")]
    InvalidRoot,
    #[error("'{0}' holds a flag; form values are text or null")]
    FlagValue(String),
    #[error(transparent)]
    Shape(#[from] ShapeError),
}
