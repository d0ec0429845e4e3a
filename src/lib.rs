#![deny(rust_2018_idioms)]

mod app;
pub mod domain;
mod form;
mod io;
pub mod tree;

pub use app::{FormSession, SessionOptions, SessionReport};
pub use domain::{
    DataModel, FormValues, GroupKind, OptionItem, OptionSet, SchemaListEntry, SecondLevelEntry,
    ThirdLevelEntry,
};
pub use form::{
    ChoiceField, CommandOutcome, EntryBlock, FORM_ERROR_KEY, FieldBinding, FieldIssue, FieldView,
    FormCommand, FormError, FormLayout, FormModel, GroupBlock, NoopValidator, REQUIRED,
    SchemaValidator, ScriptError, ScriptLine, SubmitOutcome, TextField, Validate, apply_command,
    form_schema, log_submission, parse_script, render_outline,
};
pub use io::{
    DocumentFormat, OutputDestination, SubmissionWriter, load_data_model, load_values,
    parse_document_str,
};
pub use tree::{FieldPath, Scalar, ValueNode};

pub mod prelude {
    pub use super::{
        DataModel, FieldPath, FormModel, FormSession, FormValues, SessionOptions, ValueNode,
    };
}

#[cfg(test)]
mod tests;
