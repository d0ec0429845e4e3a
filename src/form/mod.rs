mod actions;
mod binding;
mod error;
mod layout;
mod reducers;
mod script;
mod state;
mod validation;

pub use actions::FormCommand;
pub use binding::{ChoiceField, FieldBinding, FieldView, TextField};
pub use error::FormError;
pub use layout::{EntryBlock, FormLayout, GroupBlock, render_outline};
pub use reducers::{CommandOutcome, apply_command};
pub use script::{ScriptError, ScriptLine, parse_script};
pub use state::{FieldIssue, FormModel, SubmitOutcome, log_submission};
pub use validation::{
    FORM_ERROR_KEY, NoopValidator, REQUIRED, SchemaValidator, Validate, form_schema,
};
